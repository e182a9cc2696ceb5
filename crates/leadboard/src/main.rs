use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use leadboard::{load_config, run, Args};
use leadboard_common::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(&config.logging.to_log_settings())?;

    info!("Starting Leadboard v{}", env!("CARGO_PKG_VERSION"));

    let output = run(&args, &config, Utc::now()).await?;
    println!("{output}");

    info!("Leadboard finished");
    Ok(())
}
