use std::process::ExitCode;

use anyhow::{bail, Result};
use chrono::Local;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_notification_cell::RunOrchestrator;
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== INTAKE FORM NOTIFICATION SYSTEM ===");
    info!("Starting process at: {}", Local::now().format("%Y-%m-%d %H:%M:%S %:z"));

    match run().await {
        Ok(()) => {
            info!("Process completed successfully at: {}", Local::now().format("%Y-%m-%d %H:%M:%S %:z"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Exiting: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env();
    if !config.is_configured() {
        bail!("Missing HEALTHIE_API_URL or HEALTHIE_API_KEY in environment");
    }

    let orchestrator = RunOrchestrator::new(&config);
    let summary = orchestrator.run().await?;

    info!(
        "{} notification(s) sent for {} appointment(s)",
        summary.notifications_sent, summary.appointments_found
    );
    Ok(())
}
