//! Campaign Manager Server
//!
//! Serves the HTML entry page and JSON API, and runs the periodic analysis.
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use campaign_manager_core::core::{config, factory::create_app_state, logging::LOG_TARGET, Config};
use campaign_manager_core::{log_info, log_warn};
use campaign_manager_server::{api::api_server::start_api_server, scheduler::spawn_scheduler};

fn cli() -> Command {
    Command::new("campaign-manager")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Campaign, ad set and ad manager with KPI analysis")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("http-addr")
                .long("http-addr")
                .value_name("ADDR")
                .help("HTTP bind address, e.g. 127.0.0.1:8080"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Data directory for the file storage backend"),
        )
        .arg(
            Arg::new("storage-type")
                .long("storage-type")
                .value_name("TYPE")
                .help("Storage backend: memory or file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level: trace, debug, info, warn, error"),
        )
}

/// Level used until RUST_LOG says otherwise: flag, then environment, then
/// the config file, then info
fn initial_log_level(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("log-level")
        .cloned()
        .or_else(|| std::env::var("CM_LOG_LEVEL").ok())
        .or_else(|| {
            matches
                .get_one::<String>("config")
                .and_then(|path| config::load_config(path).ok())
                .map(|config| config.logging.level)
        })
        .unwrap_or_else(|| "info".to_string())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},{}={}", level, LOG_TARGET, level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Command-line flags override file and environment settings
fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(addr) = matches.get_one::<String>("http-addr") {
        config.server.http_addr = addr.parse().with_context(|| format!("invalid --http-addr {}", addr))?;
    }
    if let Some(dir) = matches.get_one::<String>("data-dir") {
        config.storage.data_dir = dir.into();
    }
    if let Some(storage_type) = matches.get_one::<String>("storage-type") {
        config.storage.storage_type = storage_type.parse()?;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }
    config.validate()?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log_warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log_warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log_warn!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_logging(&initial_log_level(&matches));

    log_info!("Starting campaign manager {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let mut config = config::load_config_or_default(config_path)?;
    apply_cli_overrides(&mut config, &matches)?;

    // Create AppState using factory pattern
    let configured_app_state = create_app_state(config).context("failed to create application state")?;
    log_info!("AppState created successfully");

    let scheduler_handle = spawn_scheduler(&configured_app_state);

    start_api_server(&configured_app_state, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    if let Some(handle) = scheduler_handle {
        handle.abort();
    }
    log_info!("Shutdown complete");
    Ok(())
}
