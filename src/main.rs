use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_overlay::api::LiveClientGateway;
use rift_overlay::config::Config;
use rift_overlay::workers::{PollController, SummaryLoggerWorker};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rift_overlay=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting rift-overlay");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Initialize live client gateway
    let gateway = LiveClientGateway::new(&config.live_client_url, config.request_timeout)?;
    if gateway.is_game_in_progress().await {
        info!("Live client reachable at {}", gateway.base_url());
    } else {
        info!(
            "No match in progress yet, polling {} every {:?}",
            gateway.base_url(),
            config.poll_interval
        );
    }

    // Create workers
    let (controller, handle) = PollController::new(gateway, config.poll_interval);
    let summary_logger = SummaryLoggerWorker::new(handle.subscribe());

    let mut controller_handle = tokio::spawn(controller.run());
    let logger_handle = tokio::spawn(summary_logger.run());

    info!("All workers started");

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            if let Err(e) = handle.shutdown().await {
                warn!("Poll controller already stopped: {}", e);
            }
            if let Err(e) = (&mut controller_handle).await {
                error!("Poll controller failed during shutdown: {:?}", e);
            }
        }
        result = &mut controller_handle => {
            error!("Poll controller exited unexpectedly: {:?}", result);
        }
    }

    // Logger ends once the controller drops its state sender
    if let Err(e) = logger_handle.await {
        error!("Summary logger failed: {:?}", e);
    }

    info!("Shutting down rift-overlay");
    Ok(())
}
