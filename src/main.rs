//! DropVault Server: personal file and folder metadata store.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use dropvault_api::AppState;
use dropvault_auth::JwtDecoder;
use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;
use dropvault_storage::UploadSigner;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and `DROPVAULT__*` environment variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DROPVAULT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DropVault v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Node store ───────────────────────────────────────
    tracing::info!("Opening node store...");
    let node_store = dropvault_database::open_node_store(&config.database).await?;
    tracing::info!(backend = node_store.backend(), "Node store ready");

    // ── Step 2: Blob store ───────────────────────────────────────
    tracing::info!("Initializing blob store...");
    let blob_store = dropvault_storage::build_blob_store(&config.storage).await?;
    tracing::info!(provider = blob_store.provider_type(), "Blob store ready");

    // ── Step 3: Identity ─────────────────────────────────────────
    let identity = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 4: Direct-upload signer ─────────────────────────────
    let upload_signer = match UploadSigner::from_config(&config.storage) {
        Ok(signer) => Some(signer),
        Err(e) => {
            tracing::warn!("Direct uploads disabled: {}", e);
            None
        }
    };

    // ── Step 5: Serve ────────────────────────────────────────────
    let state = AppState::new(config, identity, node_store, blob_store, upload_signer);
    dropvault_api::serve(state).await?;

    tracing::info!("DropVault server shut down gracefully");
    Ok(())
}
