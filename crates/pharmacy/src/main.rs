use anyhow::{Context, Result};
use dotenv::dotenv;
use pharmacy::handler::AppRouter;
use shared::{
    config::Config,
    state::AppState,
    utils::{LogOptions, Telemetry, init_logger},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::new("pharmacy", endpoint.clone())
                .init()
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _log_guard = init_logger(LogOptions {
        component: "pharmacy",
        dev_mode: config.dev_mode,
        enable_file_log: config.enable_file_log,
        otel: telemetry.as_ref().map(|providers| &providers.logger),
    });

    let port = config.port;

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    info!("🚀 Server started successfully");

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    if let Some(providers) = telemetry {
        providers.shutdown()?;
    }

    Ok(())
}
