pub mod action;
pub mod effects;
pub mod keys;
pub mod reducer;
pub mod reducers;
pub mod runtime;
pub mod state;
pub mod types;
pub mod view;
pub mod widgets;

pub use action::Action;
pub use effects::{DataEffects, Effect};
pub use keys::key_to_action;
pub use reducer::reduce;
pub use runtime::Runtime;
pub use state::AppState;
pub use types::{Panel, Tab};

use std::io;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::data_provider::SnookerDataProvider;

/// Main entry point for TUI mode
pub async fn run(client: Arc<dyn SnookerDataProvider>, mut config: Config) -> Result<(), io::Error> {
    let theme_name = config.display.theme_name.clone();
    config.display.apply_theme(theme_name.as_deref());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let data_effects = Arc::new(DataEffects::new(client, config.season));
    let mut runtime = Runtime::new(AppState::new(config), data_effects);

    // Trigger initial data load
    runtime.dispatch(Action::RefreshData);

    let result = event_loop(&mut terminal, &mut runtime).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &mut Runtime,
) -> Result<(), io::Error> {
    loop {
        // Process any actions from effects FIRST (so data loads trigger re-render)
        let actions_processed = runtime.process_actions();
        if actions_processed > 0 {
            tracing::debug!("LOOP: Processed {} actions", actions_processed);
        }

        let now = SystemTime::now();
        if runtime.state().system.refresh_due(now) {
            tracing::debug!("LOOP: Periodic refresh");
            runtime.dispatch(Action::RefreshData);
        }

        let today = Local::now().date_naive();
        terminal.draw(|f| {
            let area = f.area();
            view::render_app(runtime.state(), area, f.buffer_mut(), now, today);
        })?;

        // If actions were processed, continue loop immediately to check for more
        if actions_processed > 0 {
            continue;
        }

        // Poll for keyboard events without blocking the effect executor
        let has_event = tokio::task::block_in_place(|| event::poll(Duration::from_millis(100)))?;
        if !has_event {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(action) = key_to_action(key, runtime.state()) else {
                continue;
            };
            if matches!(action, Action::Quit) {
                tracing::debug!("ACTION: Quitting application");
                return Ok(());
            }
            runtime.dispatch(action);
        }
    }
}
