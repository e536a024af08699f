// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Arogya assistant.

use thiserror::Error;

/// The primary error type used across all Arogya adapter traits and core operations.
#[derive(Debug, Error)]
pub enum ArogyaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// LLM provider errors (API failure, malformed response, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Translation endpoint errors (request failure, undecodable response).
    #[error("translation error: {message}")]
    Translate {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// REST channel errors (bind failure, request failure, bad payload).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication failures (unknown user, bad password, invalid token).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Speech subsystem errors (synthesis or recognition failure).
    #[error("speech error: {0}")]
    Speech(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
