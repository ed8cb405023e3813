use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;

use campus_template_service::config::Settings;
use campus_template_service::server::{create_app, AppState};
use campus_template_service::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing (keep the guard alive for the process lifetime)
    let _telemetry_guard = init_telemetry(&settings.otel)?;
    tracing::info!("Configuration loaded");

    // Create application state
    let state = AppState::new(settings.clone());
    tracing::info!("Application state initialized");

    // Seed the catalog from a raw template dump if configured
    if let Some(seed_file) = &settings.catalog.seed_file {
        let raw = std::fs::read_to_string(seed_file)
            .with_context(|| format!("Failed to read seed file {}", seed_file))?;
        let records: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("Seed file {} is not valid JSON", seed_file))?;
        let imported = state.catalog.import(&records);
        tracing::info!(imported, seed_file = %seed_file, "Catalog seeded");
    }

    // Create Axum app
    let app = create_app(state);

    // Start server
    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
