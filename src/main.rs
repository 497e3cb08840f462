use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use maxbreak::api::{CalendarTab, Client, RankingType};
use maxbreak::commands;
use maxbreak::config;
use maxbreak::data_provider::SnookerDataProvider;
use maxbreak::match_list::MatchCategory;
use maxbreak::tui;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "maxbreak")]
#[command(about = "Snooker tournaments, live scores and rankings", long_about = "Snooker tournaments, live scores and rankings\n\nIf no command is specified, the program starts in interactive mode.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Use fixture data instead of the live API
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display active, upcoming and recent tournaments
    Calendar {
        /// Tour: main, others or all (defaults to the configured tour)
        #[arg(short, long)]
        tour: Option<CalendarTab>,

        /// Season start year (optional, defaults to the current season)
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Display the matches of a tournament grouped by status and round
    Matches {
        /// Event ID
        event_id: i64,

        /// Only show one status: live, break, upcoming or finished
        #[arg(long)]
        status: Option<MatchCategory>,
    },
    /// Display a player's profile
    Player {
        /// Player ID
        player_id: i64,
    },
    /// Display a ranking table
    Rankings {
        /// MoneyRankings, MoneySeedings, OneYearMoneyRankings, QTRankings or WomensRankings
        #[arg(short = 't', long = "type", default_value = "MoneyRankings")]
        ranking_type: RankingType,

        /// Season start year (optional, defaults to the current season)
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Display the head-to-head record of two players
    H2h {
        /// First player ID
        player1_id: i64,
        /// Second player ID
        player2_id: i64,
    },
    /// Display current configuration
    Config,
}

fn create_client(config: &config::Config) -> Client {
    match Client::with_base_url(&config.api_base_url) {
        Ok(client) => client,
        Err(e) => {
            let error_msg = format!("Failed to create API client: {}", e);
            tracing::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "development")]
fn create_provider(cli: &Cli, config: &config::Config) -> Arc<dyn SnookerDataProvider> {
    if cli.mock {
        tracing::info!("Using mock data provider");
        return Arc::new(maxbreak::dev::MockClient::new());
    }
    Arc::new(create_client(config))
}

#[cfg(not(feature = "development"))]
fn create_provider(_cli: &Cli, config: &config::Config) -> Arc<dyn SnookerDataProvider> {
    Arc::new(create_client(config))
}

fn parse_log_level(log_level: &str) -> Level {
    match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter at `level`, refined by RUST_LOG-style directives when given
/// (e.g. `maxbreak::api=trace`)
fn build_log_filter(level: Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives.unwrap_or_default())
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = parse_log_level(log_level);
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_log_filter(level, directives.as_deref());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("refresh_interval: {} seconds", cfg.refresh_interval);
    println!("time_format: {}", cfg.time_format);
    println!("api_base_url: {}", cfg.api_base_url);
    println!(
        "season: {}",
        cfg.season.map(|s| s.to_string()).unwrap_or_else(|| "current".to_string())
    );
    println!("default_tour: {}", cfg.default_tab().as_str());
    println!();
    println!("[display]");
    println!("use_unicode: {}", cfg.display.use_unicode);
    println!("theme: {}", cfg.display.theme_name.as_deref().unwrap_or("none"));
    println!("selection_fg: {}", config::color_to_string(cfg.display.selection_color()));
    println!("unfocused_selection_fg: {}{}",
        config::color_to_string(cfg.display.unfocused_selection_color()),
        if cfg.display.unfocused_selection_fg.is_none() { " (auto: 50% darker)" } else { "" }
    );
    println!("header_fg: {}", config::color_to_string(cfg.display.header_color()));
    println!("live_fg: {}", config::color_to_string(cfg.display.live_fg));
    println!("error_fg: {}", config::color_to_string(cfg.display.error_fg));
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(
    client: &dyn SnookerDataProvider,
    config: &config::Config,
    command: Commands,
) -> anyhow::Result<()> {
    let display = &config.display;
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Calendar { tour, season } => {
            let tour = tour.unwrap_or_else(|| config.default_tab());
            commands::calendar::run(client, tour, season.or(config.season), display).await
        }
        Commands::Matches { event_id, status } => {
            commands::matches::run(client, event_id, status, &config.time_format, display).await
        }
        Commands::Player { player_id } => commands::player::run(client, player_id, display).await,
        Commands::Rankings { ranking_type, season } => {
            commands::rankings::run(client, ranking_type, season.or(config.season), display).await
        }
        Commands::H2h { player1_id, player2_id } => {
            commands::h2h::run(client, player1_id, player2_id, display).await
        }
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    let provider = create_provider(&cli, &config);

    let Some(command) = cli.command else {
        if let Err(e) = tui::run(provider, config).await {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
        return;
    };

    // Handle Config command separately (doesn't need a client)
    if let Commands::Config = command {
        handle_config_command();
        return;
    }

    if let Err(e) = execute_command(provider.as_ref(), &config, command).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
