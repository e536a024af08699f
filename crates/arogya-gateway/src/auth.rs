// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token authentication middleware for the chat history routes.
//!
//! Login hands out an opaque token; every chat route presents it as
//! `Authorization: Bearer <token>`. The middleware resolves the token back
//! to the email it was issued to and attaches that identity to the request,
//! so handlers can scope reads and deletes to the caller. Requests without
//! a resolvable token are rejected (fail-closed).

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::handlers::MsgResponse;
use crate::server::GatewayState;

/// The identity a bearer token resolved to, attached as a request extension.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub email: String,
}

/// Middleware that resolves the bearer token to its owning email.
///
/// Rejects with 401 when the header is missing, malformed, or the token was
/// never issued. On success, inserts [`AuthedUser`] into request extensions.
pub async fn auth_middleware(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| unauthorized("Missing bearer token"))?;

    let email = match state.storage.lookup_token(token).await {
        Ok(Some(email)) => email,
        Ok(None) => return Err(unauthorized("Invalid token")),
        Err(e) => {
            tracing::error!(error = %e, "token lookup failed");
            return Err(unauthorized("Invalid token"));
        }
    };

    request.extensions_mut().insert(AuthedUser { email });
    Ok(next.run(request).await)
}

fn unauthorized(msg: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(MsgResponse { msg: msg.to_string() }),
    )
        .into_response()
}
