// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter provider adapter for the Arogya assistant.
//!
//! This crate implements [`CompletionProvider`] over the OpenRouter
//! chat-completions API, which fronts hosted models (the default is
//! `anthropic/claude-3-haiku`) behind an OpenAI-dialect endpoint.

pub mod client;
pub mod types;

use std::str::FromStr;

use arogya_config::ArogyaConfig;
use arogya_core::error::ArogyaError;
use arogya_core::traits::{CompletionProvider, PluginAdapter};
use arogya_core::types::{
    AdapterType, CompletionReply, CompletionRequest, HealthCategory, HealthStatus, Language,
    system_prompt,
};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::client::OpenRouterClient;
use crate::types::{ApiMessage, ChatCompletionRequest};

/// OpenRouter completion provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `OPENROUTER_API_KEY` env var -> error.
pub struct OpenRouterProvider {
    client: OpenRouterClient,
    system_prompt: String,
}

impl OpenRouterProvider {
    /// Creates a new OpenRouter provider from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.openrouter.api_key` if set
    /// 2. `OPENROUTER_API_KEY` environment variable
    /// 3. Returns error if neither is available
    ///
    /// # System Prompt Resolution
    /// 1. `config.assistant.system_prompt` if set
    /// 2. Default: built from the configured language and category
    pub fn new(config: &ArogyaConfig) -> Result<Self, ArogyaError> {
        let api_key = resolve_api_key(&config.openrouter.api_key)?;
        let prompt = default_system_prompt(
            &config.assistant.system_prompt,
            &config.assistant.language,
            &config.assistant.category,
        )?;

        let client = OpenRouterClient::new(
            api_key,
            config.openrouter.base_url.clone(),
            config.openrouter.model.clone(),
        )?;

        info!(model = config.openrouter.model, "OpenRouter provider initialized");

        Ok(Self {
            client,
            system_prompt: prompt,
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OpenRouterClient, system_prompt: String) -> Self {
        Self {
            client,
            system_prompt,
        }
    }

    /// Converts a [`CompletionRequest`] to the wire representation.
    ///
    /// The system prompt becomes the leading `"system"` message; the request
    /// override wins over the provider default.
    fn to_api_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let prompt = request
            .system_prompt
            .as_deref()
            .unwrap_or(&self.system_prompt);

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ApiMessage::system(prompt));
        messages.extend(request.messages.iter().map(|m| ApiMessage {
            role: m.role.clone(),
            content: m.content.clone(),
        }));

        ChatCompletionRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.client.default_model().to_string()),
            messages,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ArogyaError> {
        // Verifying the client is constructable is enough; a live check
        // would consume tokens on every health probe.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ArogyaError> {
        debug!("OpenRouter provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, ArogyaError> {
        let api_request = self.to_api_request(&request);
        let response = self.client.complete_chat(&api_request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ArogyaError::Provider {
                message: "API response contained no choices".into(),
                source: None,
            })?;

        Ok(CompletionReply {
            content: choice.message.content,
            model: response.model,
        })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, ArogyaError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("OPENROUTER_API_KEY").map_err(|_| {
        ArogyaError::Config(
            "OpenRouter API key not found. Set openrouter.api_key in config or OPENROUTER_API_KEY environment variable.".into(),
        )
    })
}

/// Builds the default system prompt: inline override > language/category default.
fn default_system_prompt(
    inline: &Option<String>,
    language: &str,
    category: &str,
) -> Result<String, ArogyaError> {
    if let Some(prompt) = inline
        && !prompt.is_empty()
    {
        return Ok(prompt.clone());
    }

    let language = Language::from_str(language)
        .map_err(|_| ArogyaError::Config(format!("unknown assistant language: {language}")))?;
    let category = HealthCategory::from_str(category)
        .map_err(|_| ArogyaError::Config(format!("unknown health category: {category}")))?;
    Ok(system_prompt(language, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arogya_core::types::PromptMessage;

    fn test_provider(prompt: &str) -> OpenRouterProvider {
        let client = OpenRouterClient::new(
            "sk-or-test".into(),
            "https://openrouter.ai/api/v1".into(),
            "anthropic/claude-3-haiku".into(),
        )
        .unwrap();
        OpenRouterProvider::with_client(client, prompt.into())
    }

    #[test]
    fn resolve_api_key_from_config() {
        let result = resolve_api_key(&Some("sk-or-123".into()));
        assert_eq!(result.unwrap(), "sk-or-123");
    }

    #[test]
    fn resolve_api_key_empty_config_falls_back_to_env() {
        let result = resolve_api_key(&Some("".into()));
        // Only succeeds when OPENROUTER_API_KEY is set in the environment;
        // either way the empty config value must not be returned.
        if let Ok(key) = result {
            assert!(!key.is_empty());
        }
    }

    #[test]
    fn default_system_prompt_built_from_language_and_category() {
        let prompt = default_system_prompt(&None, "te", "elderly").unwrap();
        assert!(prompt.contains("తెలుగు"));
        assert!(prompt.contains("వృద్ధులు"));
    }

    #[test]
    fn default_system_prompt_inline_override_wins() {
        let prompt =
            default_system_prompt(&Some("Custom prompt.".into()), "en", "general").unwrap();
        assert_eq!(prompt, "Custom prompt.");
    }

    #[test]
    fn default_system_prompt_rejects_unknown_language() {
        assert!(default_system_prompt(&None, "fr", "general").is_err());
    }

    #[test]
    fn to_api_request_prepends_system_message() {
        let provider = test_provider("Default prompt.");
        let request = CompletionRequest {
            system_prompt: None,
            messages: vec![PromptMessage::user("I have a cough")],
            model: None,
        };

        let api_req = provider.to_api_request(&request);
        assert_eq!(api_req.model, "anthropic/claude-3-haiku");
        assert_eq!(api_req.messages.len(), 2);
        assert_eq!(api_req.messages[0].role, "system");
        assert_eq!(api_req.messages[0].content, "Default prompt.");
        assert_eq!(api_req.messages[1].role, "user");
    }

    #[test]
    fn to_api_request_request_prompt_overrides_default() {
        let provider = test_provider("Default prompt.");
        let request = CompletionRequest {
            system_prompt: Some("Override prompt.".into()),
            messages: vec![],
            model: Some("meta-llama/llama-3-8b-instruct".into()),
        };

        let api_req = provider.to_api_request(&request);
        assert_eq!(api_req.messages[0].content, "Override prompt.");
        assert_eq!(api_req.model, "meta-llama/llama-3-8b-instruct");
    }

    #[test]
    fn plugin_adapter_metadata() {
        let provider = test_provider("test");
        assert_eq!(provider.name(), "openrouter");
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
        assert_eq!(provider.version(), semver::Version::new(0, 1, 0));
    }
}
