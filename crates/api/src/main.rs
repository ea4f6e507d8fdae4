//! PumpSync - fuel pump transaction bridge
//!
//! Main entry point: polls the site database and forwards pump transactions
//! to the collection API until interrupted.

use std::process::ExitCode;

use anyhow::Context;
use pumpsync_lib::utils::{bootstrap_subscriber, init_tracing};
use pumpsync_lib::{AppContext, RunOutcome};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Startup logs go through a scoped subscriber until the configured one exists
    let config = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "Loaded .env"),
            Err(e) => debug!(error = %e, "No .env file loaded"),
        }

        pumpsync_infra::config::load()
    })
    .context("failed to load configuration")?;

    init_tracing(&config.logging).context("failed to initialise logging")?;

    info!(
        organization = %config.site.organization_code,
        gas_station = %config.site.gas_station_code,
        db_host = %config.database.host,
        "PumpSync starting"
    );

    let mut context = AppContext::new(config).context("failed to build application context")?;

    match context.run_until(shutdown_signal()).await? {
        RunOutcome::Stopped => Ok(ExitCode::SUCCESS),
        RunOutcome::Fatal(err) => {
            error!(error = %err, "Exiting after unrecoverable error");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for Ctrl-C; only a fatal error will stop polling");
        std::future::pending::<()>().await;
    }
}
