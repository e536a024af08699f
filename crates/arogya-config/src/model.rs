// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Arogya assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Arogya configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArogyaConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// REST service bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenRouter completion API settings.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// Public translation endpoint settings.
    #[serde(default)]
    pub translate: TranslateConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat history persistence for the shell client.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Assistant behavior: language, category, system prompt.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Speech playback settings.
    #[serde(default)]
    pub speech: SpeechConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "arogya".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// REST service bind configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

/// OpenRouter completion API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterConfig {
    /// OpenRouter API key. Falls back to `OPENROUTER_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,

    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openrouter_base_url(),
            model: default_model(),
        }
    }
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "anthropic/claude-3-haiku".to_string()
}

/// Public translation endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranslateConfig {
    /// Enable romanized-input translation before completion calls.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Translation endpoint base URL.
    #[serde(default = "default_translate_base_url")]
    pub base_url: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_translate_base_url(),
        }
    }
}

fn default_translate_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_true() -> bool {
    true
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("arogya/arogya.db").display().to_string())
        .unwrap_or_else(|| "arogya.db".to_string())
}

/// Chat history persistence for the shell client.
///
/// `remote` saves transcripts through the REST facade; `local` serializes an
/// email-keyed account file on every mutation, for offline use.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Persistence mode: `remote` or `local`.
    #[serde(default = "default_history_mode")]
    pub mode: String,

    /// Base URL of the REST facade (remote mode).
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Path of the account file (local mode).
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            mode: default_history_mode(),
            server_url: default_server_url(),
            local_path: default_local_path(),
        }
    }
}

fn default_history_mode() -> String {
    "remote".to_string()
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_local_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("arogya/history.json").display().to_string())
        .unwrap_or_else(|| "arogya-history.json".to_string())
}

/// Assistant behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Reply language code: en, hi, mr, gu, te.
    #[serde(default = "default_language")]
    pub language: String,

    /// Health category: general, children, elderly, maternity, covid.
    #[serde(default = "default_category")]
    pub category: String,

    /// Inline system prompt override. When unset, the prompt is built from
    /// language and category.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            category: default_category(),
            system_prompt: None,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

/// Speech playback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// Enable spoken playback of bot replies.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Speaking rate used for simulated progress, in words per minute.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

fn default_words_per_minute() -> u32 {
    150
}
