//! Muletrack CLI
//!
//! Command-line interface for the muletrack balance notifier.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use muletrack::models::{Notification, Observation};
use muletrack::notify::{render, DeliverySink, HttpSink};
use muletrack::source::JsonLineSource;
use muletrack::tracker::Tracker;
use muletrack::Config;

/// Muletrack - debounced mule balance notifier
#[derive(Parser)]
#[command(name = "muletrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MULETRACK_CONFIG")]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track balances from a JSON-lines host stream on stdin
    Run {
        /// Endpoint URL override
        #[arg(long, env = "MULETRACK_ENDPOINT_URL")]
        endpoint: Option<String>,
    },

    /// Send a single balance update and exit
    Send {
        /// Identity to report the balance under
        #[arg(long)]
        identity: String,

        /// Total coins to report
        #[arg(long)]
        total_coins: u64,

        /// Endpoint URL override
        #[arg(long, env = "MULETRACK_ENDPOINT_URL")]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Run { endpoint } => run_tracker(config, endpoint).await,
        Commands::Send {
            identity,
            total_coins,
            endpoint,
        } => run_send(config, identity, total_coins, endpoint).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_tracker(mut config: Config, endpoint: Option<String>) -> anyhow::Result<()> {
    if let Some(endpoint) = endpoint {
        config.endpoint.url = endpoint;
    }

    let timeout = Duration::from_secs(config.endpoint.timeout_seconds);
    let sink = HttpSink::new(timeout)?;
    let tracker = Tracker::new(config, sink);

    let source = JsonLineSource::new(tokio::io::stdin());
    tracker.run(source).await?;

    Ok(())
}

async fn run_send(
    mut config: Config,
    identity: String,
    total_coins: u64,
    endpoint: Option<String>,
) -> anyhow::Result<()> {
    if let Some(endpoint) = endpoint {
        config.endpoint.url = endpoint;
    }

    let endpoint = config.endpoint.url.trim().to_string();
    if endpoint.is_empty() {
        anyhow::bail!("no endpoint URL configured");
    }

    let now = chrono::Utc::now().timestamp_millis();
    let notification =
        Notification::from_observation(&Observation::new(identity, total_coins, now));
    let body = render(&endpoint, &notification)?;

    let sink = HttpSink::new(Duration::from_secs(config.endpoint.timeout_seconds))?;
    sink.post(&endpoint, body).await?;

    info!(total_coins, "Balance update sent");
    Ok(())
}
