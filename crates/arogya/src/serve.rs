// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `arogya serve` command implementation.
//!
//! Starts the REST facade: SQLite storage with migrations, then the axum
//! gateway serving the account and chat history routes.

use std::sync::Arc;

use arogya_config::model::ArogyaConfig;
use arogya_core::error::ArogyaError;
use arogya_core::{PluginAdapter, StorageAdapter};
use arogya_gateway::{GatewayState, ServerConfig, start_server};
use arogya_storage::SqliteStorage;
use tracing::info;

/// Runs the `arogya serve` command.
///
/// Initializes storage, builds the gateway router, and serves until the
/// process is terminated.
pub async fn run_serve(config: ArogyaConfig) -> Result<(), ArogyaError> {
    // Initialize tracing subscriber.
    init_tracing(&config.agent.log_level);

    info!("starting arogya serve");

    // Initialize SQLite storage.
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let status = storage.health_check().await?;
    info!(?status, path = %config.storage.database_path, "storage initialized");

    let storage: Arc<dyn StorageAdapter> = Arc::new(storage);

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    start_server(&server_config, GatewayState { storage }).await
}

/// Initializes the global tracing subscriber.
///
/// Respects `RUST_LOG` if set; otherwise uses the configured log level for
/// arogya crates and `warn` for everything else.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("arogya={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
