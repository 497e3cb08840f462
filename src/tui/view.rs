//! Draws the whole screen from an `AppState`
//!
//! Layout: main tab bar, then either the current tab's content or the panel
//! on top of the drill-down stack, then the status bar.

use std::time::SystemTime;

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::api::{CalendarTab, RankingType};
use crate::config::DisplayConfig;
use crate::match_list::{match_positions, round_label, MatchFilter};

use super::state::{AppState, LoadingKey, PanelState};
use super::types::{Panel, Tab};
use super::widgets::{
    Breadcrumb, EventHeader, HeadToHeadView, MatchDetail, MatchTable, Message, PlayerCard,
    RankingsTable, RenderableWidget, SettingsList, StatusBar, TabBar, TournamentList,
};

/// Render the application into `buf`
///
/// `now` drives the refresh countdown and `today` the ages on player cards.
pub fn render_app(state: &AppState, area: Rect, buf: &mut Buffer, now: SystemTime, today: NaiveDate) {
    let config = &state.system.config.display;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let nav = &state.navigation;
    let tab_bar_focused = !nav.content_focused && nav.panel_stack.is_empty();
    TabBar::new(Tab::ALL.iter().map(|t| t.label()), nav.current_tab.index(), tab_bar_focused)
        .render(chunks[0], buf, config);

    match state.current_panel() {
        Some(panel) => render_panel(state, panel, chunks[1], buf, today),
        None => render_tab(state, chunks[1], buf),
    }

    StatusBar {
        message: state.system.status_message.clone(),
        is_error: state.system.status_is_error,
        next_refresh_in: state.system.next_refresh_in(now),
        loading: !state.data.loading.is_empty(),
    }
    .render(chunks[2], buf, config);
}

/// Split off `height` lines from the top of `area`
fn take_top(area: Rect, height: u16) -> (Rect, Rect) {
    let height = height.min(area.height);
    (
        Rect::new(area.x, area.y, area.width, height),
        Rect::new(area.x, area.y + height, area.width, area.height - height),
    )
}

/// Loading or error placeholder for a resource that has no data yet
fn render_missing(state: &AppState, key: LoadingKey, what: &str, area: Rect, buf: &mut Buffer) {
    let config = &state.system.config.display;
    match state.data.error(&key) {
        Some(error) => Message::error(error).render(area, buf, config),
        None => Message::loading(what).render(area, buf, config),
    }
}

fn render_tab(state: &AppState, area: Rect, buf: &mut Buffer) {
    match state.navigation.current_tab {
        Tab::Calendar => render_calendar_tab(state, area, buf),
        Tab::Rankings => render_rankings_tab(state, area, buf),
        Tab::Settings => render_settings_tab(state, area, buf),
    }
}

fn render_calendar_tab(state: &AppState, area: Rect, buf: &mut Buffer) {
    let config = &state.system.config.display;
    let focused = state.navigation.content_focused;
    let tour = state.ui.calendar.tour;
    let selected_tour = CalendarTab::ALL.iter().position(|t| *t == tour).unwrap_or(0);

    let (bar_area, list_area) = take_top(area, 3);
    TabBar::new(CalendarTab::ALL.iter().map(|t| t.label()), selected_tour, focused)
        .render(bar_area, buf, config);

    match state.data.calendars.get(&tour) {
        Some(calendar) => TournamentList {
            calendar,
            selected: state.ui.calendar.selected_index,
            focused,
        }
        .render(list_area, buf, config),
        None => render_missing(state, LoadingKey::Calendar(tour), "calendar", list_area, buf),
    }
}

fn render_rankings_tab(state: &AppState, area: Rect, buf: &mut Buffer) {
    let config = &state.system.config.display;
    let focused = state.navigation.content_focused;
    let ranking_type = state.ui.rankings.ranking_type;
    let selected_type = RankingType::ALL
        .iter()
        .position(|t| *t == ranking_type)
        .unwrap_or(0);

    let (bar_area, table_area) = take_top(area, 3);
    TabBar::new(RankingType::ALL.iter().map(|t| t.short_label()), selected_type, focused)
        .render(bar_area, buf, config);

    match state.data.rankings.get(&ranking_type) {
        Some(table) => RankingsTable {
            table,
            ranking_type,
            selected: state.ui.rankings.selected_index,
            focused,
        }
        .render(table_area, buf, config),
        None => render_missing(state, LoadingKey::Rankings(ranking_type), "rankings", table_area, buf),
    }
}

fn render_settings_tab(state: &AppState, area: Rect, buf: &mut Buffer) {
    let (_, list_area) = take_top(area, 1);
    SettingsList {
        config: &state.system.config,
        selected: state.ui.settings.selected_index,
        focused: state.navigation.content_focused,
    }
    .render(list_area, buf, &state.system.config.display);
}

/// Breadcrumb label of a panel, using loaded data when available
fn panel_title(state: &AppState, panel: &Panel) -> String {
    let data = &state.data;
    match panel {
        Panel::Tournament { event_id } => data
            .events
            .get(event_id)
            .map(|e| e.display_name())
            .unwrap_or_else(|| panel.label()),
        Panel::Match {
            event_id,
            match_id,
            api_match_id,
        } => data
            .find_match(*event_id, *match_id, *api_match_id)
            .map(|m| format!("{} #{}", round_label(m.round), m.number))
            .unwrap_or_else(|| panel.label()),
        Panel::Player { player_id } => data
            .players
            .get(player_id)
            .map(|p| p.full_name())
            .unwrap_or_else(|| panel.label()),
        Panel::HeadToHead {
            player1_id,
            player2_id,
        } => data
            .head_to_head
            .get(&(*player1_id, *player2_id))
            .and_then(|h| Some(format!("{} v {}", h.player1_name.as_ref()?, h.player2_name.as_ref()?)))
            .unwrap_or_else(|| panel.label()),
    }
}

fn render_panel(state: &AppState, panel_state: &PanelState, area: Rect, buf: &mut Buffer, today: NaiveDate) {
    let config = &state.system.config.display;
    let mut items = vec![state.navigation.current_tab.label().to_string()];
    items.extend(
        state
            .navigation
            .panel_stack
            .iter()
            .map(|p| panel_title(state, &p.panel)),
    );

    let (crumb_area, rest) = take_top(area, 2);
    Breadcrumb::new(items).render(crumb_area, buf, config);

    let data = &state.data;
    match &panel_state.panel {
        Panel::Tournament { event_id } => render_tournament_panel(state, panel_state, *event_id, rest, buf),
        Panel::Match {
            event_id,
            match_id,
            api_match_id,
        } => match data.find_match(*event_id, *match_id, *api_match_id) {
            Some(record) => MatchDetail {
                record,
                time_format: &state.system.config.time_format,
            }
            .render(rest, buf, config),
            None => {
                let key = LoadingKey::match_source(*event_id, *api_match_id);
                render_missing(state, key, "match", rest, buf)
            }
        },
        Panel::Player { player_id } => match data.players.get(player_id) {
            Some(player) => PlayerCard { player, today }.render(rest, buf, config),
            None => render_missing(state, LoadingKey::Player(*player_id), "player", rest, buf),
        },
        Panel::HeadToHead {
            player1_id,
            player2_id,
        } => match data.head_to_head.get(&(*player1_id, *player2_id)) {
            Some(h2h) => HeadToHeadView { h2h }.render(rest, buf, config),
            None => render_missing(
                state,
                LoadingKey::HeadToHead(*player1_id, *player2_id),
                "head-to-head",
                rest,
                buf,
            ),
        },
    }
}

fn render_tournament_panel(state: &AppState, panel_state: &PanelState, event_id: i64, area: Rect, buf: &mut Buffer) {
    let config: &DisplayConfig = &state.system.config.display;
    let data = &state.data;

    let area = match data.events.get(&event_id) {
        Some(event) => {
            let header = EventHeader {
                event,
                prize: data.prize_money.get(&event_id),
            };
            let (header_area, rest) = take_top(area, header.height(config));
            header.render(header_area, buf, config);
            rest
        }
        None => {
            let (header_area, rest) = take_top(area, 3);
            render_missing(state, LoadingKey::Event(event_id), "event", header_area, buf);
            rest
        }
    };

    let filter = panel_state.filter;
    let selected_filter = MatchFilter::ALL.iter().position(|f| *f == filter).unwrap_or(0);
    let (bar_area, list_area) = take_top(area, 3);
    TabBar::new(MatchFilter::ALL.iter().map(|f| f.label()), selected_filter, true)
        .render(bar_area, buf, config);

    if !data.event_matches.contains_key(&event_id) {
        render_missing(state, LoadingKey::EventMatches(event_id), "matches", list_area, buf);
        return;
    }

    let entries = data.match_entries(event_id, filter);
    let selected = panel_state
        .selected_index
        .filter(|i| *i < match_positions(&entries).len());
    MatchTable {
        entries: &entries,
        selected,
        focused: true,
        time_format: &state.system.config.time_format,
        rounds: data.round_info.get(&event_id),
    }
    .render(list_area, buf, config);
}
