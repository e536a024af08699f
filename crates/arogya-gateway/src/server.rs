// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the REST facade.

use std::sync::Arc;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use arogya_core::{ArogyaError, StorageAdapter};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::auth_middleware;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Persistence backend for credentials, chats, and login tokens.
    pub storage: Arc<dyn StorageAdapter>,
}

/// Gateway server configuration (mirrors ServerConfig from arogya-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router.
///
/// Routes:
/// - GET /health (public)
/// - POST /api/signup, POST /api/login (public)
/// - POST /api/chats, GET /api/chats/{email}, DELETE /api/chats/{id}
///   (bearer token required)
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/signup", post(handlers::post_signup))
        .route("/api/login", post(handlers::post_login))
        .with_state(state.clone());

    // GET's path segment is the owner email, DELETE's is the chat id; one
    // route entry serves both since path params extract positionally.
    let chat_routes = Router::new()
        .route("/api/chats", post(handlers::post_chats))
        .route(
            "/api/chats/{key}",
            get(handlers::get_chats).delete(handlers::delete_chat),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(chat_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), ArogyaError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ArogyaError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| ArogyaError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
