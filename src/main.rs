//! Foody Harness - ordered end-to-end tests for the Foody REST API
//!
//! Logs in once, runs the create/edit/list/delete suite and its negative
//! cases in order, prints a per-step report and exits non-zero on failure.

use anyhow::Context;
use clap::Parser;
use foody_harness::{config::HarnessConfig, harness::Harness, metrics, suite};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Foody Harness - ordered, authenticated API tests
#[derive(Parser, Debug)]
#[command(name = "foody-harness")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults target the public deployment)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Override the service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the login username
    #[arg(long)]
    username: Option<String>,

    /// Override the login password
    #[arg(long)]
    password: Option<String>,

    /// Write Prometheus metrics to this file after the run, including a
    /// run whose setup failed
    #[arg(long)]
    metrics_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };

    // RUST_LOG wins over --log-level when set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Foody Harness v{}", foody_harness::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            let config = HarnessConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => HarnessConfig::default(),
    };

    if let Some(base_url) = args.base_url {
        config.target.base_url = base_url;
    }
    if let Some(username) = args.username {
        config.credentials.username = username;
    }
    if let Some(password) = args.password {
        config.credentials.password = password;
    }
    if let Some(path) = args.metrics_file {
        config.metrics.textfile = Some(path);
    }

    let textfile = config.metrics.textfile.clone();
    let steps = suite::steps_for(&config.checks);
    let harness = Harness::new(config, steps)?;
    let outcome = harness.run().await;

    if let Some(path) = textfile {
        metrics::write_textfile(&path)
            .with_context(|| format!("writing metrics to {}", path.display()))?;
    }

    let report = outcome?;
    println!("{}", report);

    if !report.success() {
        anyhow::bail!("{}", report.summary());
    }

    Ok(())
}
