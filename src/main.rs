//! Command Log Viewer - Entry Point

use clap::Parser;
use cmdlv::config::ResolvedConfig;
use cmdlv::model::{FilterKey, FilterParams, LogId, TimeDisplay};
use cmdlv::source::{Fetcher, LogClient};
use cmdlv::state::AppState;
use cmdlv::view::{ColorConfig, Styles};
use std::path::PathBuf;
use tracing::info;

/// Command Log Viewer - TUI for browsing command-generation session logs
#[derive(Parser, Debug)]
#[command(name = "cmdlv")]
#[command(version)]
#[command(about = "TUI application for browsing command-generation session logs")]
pub struct Args {
    /// Log server base URL (e.g. http://localhost:8765)
    #[arg(long)]
    pub server: Option<String>,

    /// Restore a filtered view from its query string
    /// (e.g. "status=rejected&search=docker")
    #[arg(short, long)]
    pub query: Option<String>,

    /// Open a log's detail view directly
    #[arg(short, long, value_parser = parse_log_id)]
    pub log: Option<LogId>,

    /// Rows per page (0 uses the server default)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Show absolute timestamps instead of relative ones
    #[arg(long)]
    pub absolute_time: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_log_id(raw: &str) -> Result<LogId, cmdlv::model::InvalidLogId> {
    LogId::new(raw)
}

/// Build the first `AppState` from the CLI and resolved configuration.
///
/// A `limit` in `--query` wins over the configured page size.
fn initial_state(args: &Args, config: &ResolvedConfig) -> AppState {
    let mut filters = args
        .query
        .as_deref()
        .map(FilterParams::from_query_str)
        .unwrap_or_default();
    if filters.limit.is_none() {
        if let Some(page_size) = config.page_size {
            filters.assign(FilterKey::Limit, Some(&page_size.to_string()));
        }
    }

    let time_display = if config.absolute_timestamps {
        TimeDisplay::Absolute
    } else {
        TimeDisplay::Relative
    };

    let state = AppState::new(filters)
        .with_search_debounce(config.search_debounce())
        .with_time_display(time_display);

    match &args.log {
        Some(id) => state.viewing(id.clone()),
        None => state,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = cmdlv::config::load_config_with_precedence(args.config.clone())?;
        let merged = cmdlv::config::merge_config(config_file);
        let with_env = cmdlv::config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let absolute_override = args.absolute_time.then_some(true);
        cmdlv::config::apply_cli_overrides(
            with_env,
            args.server.clone(),
            args.page_size,
            absolute_override,
        )
    };

    cmdlv::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let client = LogClient::new(&config.server_url, config.request_timeout())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let mut fetcher = Fetcher::new(client, runtime.handle().clone());

    let styles = Styles::new(ColorConfig::from_env_and_args(args.no_color));
    let state = initial_state(&args, &config);

    let result = cmdlv::view::run_app(state, styles, config.server_url.clone(), &mut fetcher);

    // In-flight requests are abandoned rather than awaited
    runtime.shutdown_background();
    info!("Exiting");

    result.map_err(Into::into)
}
