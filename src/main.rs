use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::{self, EnvFilter};

use vacancy_stats::boards::{HeadHunterClient, JobBoard, SuperJobClient};
use vacancy_stats::config::Config;
use vacancy_stats::error::AppError;
use vacancy_stats::orchestrator::collect_statistics;
use vacancy_stats::report::{render_table, report_title};
use vacancy_stats::retry::RetryPolicy;

#[derive(Parser)]
#[command(name = "vacancy-stats")]
#[command(about = "Average programmer salaries per language from HeadHunter and SuperJob")]
#[command(version)]
struct Cli {
    /// City to collect statistics for, e.g. "Москва"
    city: String,

    /// Path to configuration file (can also be set via VACANCY_STATS_CONFIG env var)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Enable verbose logging (equivalent to --log-level debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Get config path from CLI arg or VACANCY_STATS_CONFIG environment variable
    fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var("VACANCY_STATS_CONFIG").ok().map(PathBuf::from))
    }
}

fn init_logging(config: &Config, cli: &Cli) -> Result<(), AppError> {
    // CLI flags take precedence over the config file
    let log_level = if cli.verbose {
        "debug"
    } else if let Some(ref level) = cli.log_level {
        level.as_str()
    } else {
        config.log_level()
    };

    // Validate log level
    let _level = match log_level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => {
            return Err(AppError::InvalidData(format!(
                "Invalid log level: {log_level}. Valid levels are: error, warn, info, debug, trace"
            )));
        }
    };

    // RUST_LOG wins over the configured level when set
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| AppError::InvalidData(format!("Failed to create log filter: {e}")))?;

    // Logs go to stderr so stdout carries only the tables
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Logging initialized with level: {}", log_level);
    Ok(())
}

/// Log an error at a level matching its kind; `Err` means the run must stop
fn handle_error(source: &str, error: AppError) -> Result<(), AppError> {
    match &error {
        AppError::Config(_) => {
            error!("{}", error);
            error!("Please check your configuration file and environment variables");
        }
        AppError::CityNotFound { .. } => {
            warn!("{}", error);
            println!("{source}: city not found, skipping");
        }
        AppError::Fetch(_) | AppError::Network(_) => {
            error!("{} request failed: {}", source, error);
        }
        AppError::InvalidData(_) => {
            error!("{} statistics failed: {}", source, error);
            debug!("Error details: {:?}", error);
        }
    }

    // Only configuration problems end the run, board failures never do
    if error.should_shutdown() {
        error!("Fatal error encountered, shutting down");
        return Err(error);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Load configuration first
    let config = match Config::load(cli.config_path()) {
        Ok(config) => config,
        Err(e) => {
            // Initialize basic logging for configuration errors
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            handle_error("configuration", AppError::Config(e))?;
            return Ok(());
        }
    };

    // Initialize structured logging
    if let Err(e) = init_logging(&config, &cli) {
        eprintln!("Failed to initialize logging: {e}");
        return Err(e);
    }

    info!("Starting vacancy-stats v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded successfully");
    debug!("Configuration file path: {:?}", cli.config_path());
    // Log configuration summary (without credentials)
    info!(
        "Languages: {} (max {} attempts per page, {}s timeout)",
        config.search.languages.join(", "),
        config.search.max_attempts,
        config.search.timeout_secs
    );

    run_application(&config, &cli.city).await
}

/// Run every board in turn; a failing board never stops the next one
async fn run_application(config: &Config, city: &str) -> Result<(), AppError> {
    let policy = RetryPolicy::new(config.search.max_attempts);

    // HeadHunter first, then SuperJob
    let mut boards: Vec<Box<dyn JobBoard>> = Vec::new();
    match HeadHunterClient::new(config.headhunter.clone(), &config.search) {
        Ok(client) => boards.push(Box::new(client)),
        Err(e) => handle_error("HeadHunter", e)?,
    }
    match SuperJobClient::new(config.superjob.clone(), &config.search) {
        Ok(client) => boards.push(Box::new(client)),
        Err(e) => handle_error("SuperJob", e)?,
    }

    for board in &boards {
        info!("Collecting statistics from {}", board.name());
        match collect_statistics(board.as_ref(), city, &config.search.languages, &policy).await {
            Ok(report) => {
                println!("{}", render_table(&report, &report_title(board.name(), city)));
                match report.to_json() {
                    Ok(json) => debug!("{} report: {}", board.name(), json),
                    Err(e) => debug!("Could not serialize {} report: {}", board.name(), e),
                }
            }
            Err(e) => handle_error(board.name(), e)?,
        }
    }

    Ok(())
}
