// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./arogya.toml` > `~/.config/arogya/arogya.toml` > `/etc/arogya/arogya.toml`
//! with environment variable overrides via `AROGYA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ArogyaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/arogya/arogya.toml` (system-wide)
/// 3. `~/.config/arogya/arogya.toml` (user XDG config)
/// 4. `./arogya.toml` (local directory)
/// 5. `AROGYA_*` environment variables
pub fn load_config() -> Result<ArogyaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ArogyaConfig::default()))
        .merge(Toml::file("/etc/arogya/arogya.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("arogya/arogya.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("arogya.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ArogyaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ArogyaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ArogyaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ArogyaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `AROGYA_OPENROUTER_API_KEY`
/// must map to `openrouter.api_key`, not `openrouter.api.key`.
fn env_provider() -> Env {
    Env::prefixed("AROGYA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: AROGYA_STORAGE_DATABASE_PATH -> "storage_database_path"
        // Only the leading section segment becomes a dot; `history_server_url`
        // must map to `history.server_url`, never `history.server.url`.
        let key_str = key.as_str();
        let mapped = match key_str.split_once('_') {
            Some((section, rest))
                if matches!(
                    section,
                    "agent"
                        | "server"
                        | "openrouter"
                        | "translate"
                        | "storage"
                        | "history"
                        | "assistant"
                        | "speech"
                ) =>
            {
                format!("{section}.{rest}")
            }
            _ => key_str.to_string(),
        };
        mapped.into()
    })
}
