// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the account and chat history API.
//!
//! Handles POST /api/signup, POST /api/login, POST /api/chats,
//! GET /api/chats/{email}, DELETE /api/chats/{id}.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use arogya_auth::{hash_password, issue_token, verify_password};
use arogya_core::ArogyaError;
use arogya_core::types::{Chat, ChatMessage, User, derive_title};

use crate::auth::AuthedUser;
use crate::server::GatewayState;

/// Request body for POST /api/signup and POST /api/login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Generic `{"msg": ...}` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MsgResponse {
    pub msg: String,
}

/// Response body for a successful POST /api/login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub msg: String,
    pub email: String,
    /// Opaque bearer token for the chat history routes.
    pub token: String,
}

/// Request body for POST /api/chats.
///
/// `userEmail` mirrors the field name history clients have always sent.
#[derive(Debug, Deserialize)]
pub struct SaveChatRequest {
    #[serde(rename = "userEmail")]
    pub user_email: String,
    pub messages: Vec<ChatMessage>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body shape for infrastructure failures, as opposed to the `msg` shape
/// the auth validation responses use.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn msg(status: StatusCode, text: &str) -> Response {
    (status, Json(MsgResponse { msg: text.to_string() })).into_response()
}

fn internal_error(e: ArogyaError) -> Response {
    tracing::error!(error = %e, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}

/// POST /api/signup
///
/// Creates an account. The insert is a single atomic insert-if-absent, so
/// two concurrent signups for the same email cannot both succeed.
pub async fn post_signup(
    State(state): State<GatewayState>,
    Json(body): Json<CredentialsRequest>,
) -> Response {
    let hash = match tokio::task::spawn_blocking(move || hash_password(&body.password)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(e)) => return internal_error(e),
        Err(e) => return internal_error(ArogyaError::Internal(format!("hashing task failed: {e}"))),
    };

    let user = User {
        email: body.email,
        password_hash: hash,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    match state.storage.create_user(&user).await {
        Ok(true) => msg(StatusCode::OK, "User created"),
        Ok(false) => msg(StatusCode::BAD_REQUEST, "User already exists"),
        Err(e) => internal_error(e),
    }
}

/// POST /api/login
///
/// Verifies credentials and issues an opaque bearer token. Unknown emails
/// and wrong passwords get the same answer.
pub async fn post_login(
    State(state): State<GatewayState>,
    Json(body): Json<CredentialsRequest>,
) -> Response {
    let user = match state.storage.get_user(&body.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return msg(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        Err(e) => return internal_error(e),
    };

    let hash = user.password_hash.clone();
    let verified =
        match tokio::task::spawn_blocking(move || verify_password(&body.password, &hash)).await {
            Ok(Ok(verified)) => verified,
            Ok(Err(e)) => return internal_error(e),
            Err(e) => {
                return internal_error(ArogyaError::Internal(format!(
                    "verification task failed: {e}"
                )));
            }
        };

    if !verified {
        return msg(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }

    let token = issue_token();
    if let Err(e) = state.storage.insert_token(&token, &user.email).await {
        return internal_error(e);
    }

    (
        StatusCode::OK,
        Json(LoginResponse {
            msg: "Login successful".to_string(),
            email: user.email,
            token,
        }),
    )
        .into_response()
}

/// POST /api/chats
///
/// Saves a transcript as a new chat record owned by the caller. The claimed
/// owner in the body must match the authenticated identity.
pub async fn post_chats(
    State(state): State<GatewayState>,
    Extension(authed): Extension<AuthedUser>,
    Json(body): Json<SaveChatRequest>,
) -> Response {
    if body.user_email != authed.email {
        return msg(StatusCode::FORBIDDEN, "Cannot save chats for another user");
    }

    let chat = Chat {
        id: uuid::Uuid::new_v4().to_string(),
        user_email: authed.email,
        title: derive_title(&body.messages),
        messages: body.messages,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    match state.storage.insert_chat(&chat).await {
        Ok(()) => (StatusCode::OK, Json(chat)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/chats/{email}
///
/// Lists the caller's chats, newest first. The path email must match the
/// authenticated identity; other users' history is never readable.
pub async fn get_chats(
    State(state): State<GatewayState>,
    Extension(authed): Extension<AuthedUser>,
    Path(email): Path<String>,
) -> Response {
    if email != authed.email {
        return msg(StatusCode::FORBIDDEN, "Cannot read another user's chats");
    }

    match state.storage.list_chats(&authed.email).await {
        Ok(chats) => (StatusCode::OK, Json(chats)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// DELETE /api/chats/{id}
///
/// Deletes one of the caller's chats. The delete is scoped to the
/// authenticated owner, so an id belonging to someone else reads as
/// not found.
pub async fn delete_chat(
    State(state): State<GatewayState>,
    Extension(authed): Extension<AuthedUser>,
    Path(id): Path<String>,
) -> Response {
    match state.storage.delete_chat(&id, &authed.email).await {
        Ok(true) => msg(StatusCode::OK, "Chat deleted"),
        Ok(false) => msg(StatusCode::NOT_FOUND, "Chat not found"),
        Err(e) => internal_error(e),
    }
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
