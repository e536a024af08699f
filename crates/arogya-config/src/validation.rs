// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, known language/category codes,
//! and a positive speaking rate.

use std::str::FromStr;

use arogya_core::types::{HealthCategory, Language};

use crate::diagnostic::ConfigError;
use crate::model::ArogyaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ArogyaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate server.host looks like a valid IP or hostname
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate history.mode is a known variant
    let mode = config.history.mode.as_str();
    if mode != "remote" && mode != "local" {
        errors.push(ConfigError::Validation {
            message: format!("history.mode must be `remote` or `local`, got `{mode}`"),
        });
    }

    // Validate history.server_url parses as an http(s) URL prefix
    if mode == "remote"
        && !config.history.server_url.starts_with("http://")
        && !config.history.server_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "history.server_url must start with http:// or https://, got `{}`",
                config.history.server_url
            ),
        });
    }

    // Validate assistant.language is a supported code
    if Language::from_str(&config.assistant.language).is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "assistant.language must be one of en, hi, mr, gu, te, got `{}`",
                config.assistant.language
            ),
        });
    }

    // Validate assistant.category is a supported code
    if HealthCategory::from_str(&config.assistant.category).is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "assistant.category must be one of general, children, elderly, maternity, covid, got `{}`",
                config.assistant.category
            ),
        });
    }

    // Validate speech rate is positive; simulated progress divides by it
    if config.speech.words_per_minute == 0 {
        errors.push(ConfigError::Validation {
            message: "speech.words_per_minute must be positive".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ArogyaConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_language_is_rejected() {
        let mut config = ArogyaConfig::default();
        config.assistant.language = "fr".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("language")));
    }

    #[test]
    fn bad_history_mode_is_rejected() {
        let mut config = ArogyaConfig::default();
        config.history.mode = "browser".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("history.mode")));
    }

    #[test]
    fn zero_wpm_is_rejected() {
        let mut config = ArogyaConfig::default();
        config.speech.words_per_minute = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("words_per_minute"))
        );
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = ArogyaConfig::default();
        config.assistant.language = "xx".to_string();
        config.assistant.category = "dental".to_string();
        config.speech.words_per_minute = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
