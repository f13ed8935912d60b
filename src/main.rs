use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use profile_api::app::{app, AppState};
use profile_api::config;
use profile_api::database::DatabaseManager;
use profile_api::project_management::ProjectDatabase;
use profile_api::storage::BlobSigner;

#[derive(Parser)]
#[command(name = "profile-api")]
#[command(about = "Employee profile API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Bind address (overrides PROFILE_API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Listen port (overrides PROFILE_API_PORT / PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AZURE_STORAGE_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("profile_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let config = config::config();
    info!("Starting Profile API in {:?} mode", config.environment);

    let profile_pool = DatabaseManager::connect_lazy(&config.database)
        .context("invalid profile database configuration")?;
    let project_pool = ProjectDatabase::connect_lazy(&config.project_database)
        .context("invalid project-management database configuration")?;
    let signer = BlobSigner::from_config(&config.storage)
        .context("invalid storage configuration (AZURE_STORAGE_CONNECTION_STRING / AZURE_STORAGE_CONTAINER_NAME)")?;

    let state = AppState::postgres(profile_pool.clone(), project_pool.clone(), signer);
    let app = app(state, &config.security);

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Profile API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&profile_pool).await;
    project_pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
