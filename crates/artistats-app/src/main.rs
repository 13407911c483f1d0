//! artistats - Main Entry Point

use anyhow::{Context, Result};
use artistats_app::Pipeline;
use artistats_common::{init_logging, LoggingConfig};
use artistats_config::{AppConfig, ConfigLoader, SYSTEM_CONFIG_PATH, USER_CONFIG_PATH};
use artistats_graphs::HeadlessDisplay;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// System configuration file, read first
    #[arg(long, default_value = SYSTEM_CONFIG_PATH)]
    system_config: PathBuf,

    /// User configuration file, its keys override the system file
    #[arg(long, default_value = USER_CONFIG_PATH)]
    user_config: PathBuf,

    /// Chart output path (defaults to plot_save_path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (defaults to log_level from configuration)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Do not send the completion notification
    #[arg(long)]
    no_notify: bool,

    /// Save the chart without trying to display it
    #[arg(long)]
    headless: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = ConfigLoader::new([&args.system_config, &args.user_config])
        .with_env_overrides(true)
        .load()
        .context("Failed to load configuration")?;
    let config = AppConfig::from_settings(&settings).context("Invalid configuration")?;

    init_logging(LoggingConfig {
        level: args.log_level.clone().unwrap_or_else(|| config.log_level.clone()),
        json_format: args.json_logs,
        ..Default::default()
    })
    .map_err(|e| anyhow::anyhow!(e))?;

    info!("Starting artistats");
    info!(
        "Configuration loaded from {} and {}",
        args.system_config.display(),
        args.user_config.display()
    );

    let mut pipeline = Pipeline::new(&config)?;
    if let Some(output) = args.output {
        pipeline = pipeline.with_output(output);
    }
    if args.no_notify {
        pipeline = pipeline.without_notification();
    }
    if args.headless {
        pipeline = pipeline.with_display(Box::new(HeadlessDisplay));
    }

    let report = match pipeline.run().await {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return Err(e.into());
        }
    };

    println!("Artists analysed: {}", report.aggregate.len());
    println!("Mean popularity: {:.2}", report.mean());
    println!("Median popularity: {}", report.median());
    println!("Chart saved to: {}", report.figure.path.display());
    if report.notified {
        println!("Notification sent to topic {}", config.notify.topic);
    }

    Ok(())
}
