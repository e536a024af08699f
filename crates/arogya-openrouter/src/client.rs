// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenRouter chat-completions API.
//!
//! Provides [`OpenRouterClient`] which handles request construction, bearer
//! authentication, and transient error retry.

use std::time::Duration;

use arogya_core::ArogyaError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client for OpenRouter API communication.
///
/// Manages the authorization header, connection pooling, and retry logic
/// for transient errors (429, 500, 502, 503).
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    default_model: String,
    max_retries: u32,
    base_url: String,
}

impl OpenRouterClient {
    /// Creates a new OpenRouter API client.
    ///
    /// # Arguments
    /// * `api_key` - OpenRouter API key, sent as a bearer credential
    /// * `base_url` - API base URL (e.g. "https://openrouter.ai/api/v1")
    /// * `model` - Default model identifier
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, ArogyaError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                ArogyaError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ArogyaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            max_retries: 1,
            base_url,
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Sends a chat-completion request and returns the full response.
    ///
    /// On transient errors (429, 500, 502, 503), retries once after a
    /// 1-second delay.
    pub async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ArogyaError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| ArogyaError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| ArogyaError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let completion: ChatCompletionResponse = serde_json::from_str(&body)
                    .map_err(|e| ArogyaError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return Ok(completion);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(ArogyaError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!("OpenRouter API error: {}", api_err.error.message)
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(ArogyaError::Provider {
                message: error_msg,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| ArogyaError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiMessage;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenRouterClient {
        OpenRouterClient::new(
            "sk-or-test-key".into(),
            base_url.to_string(),
            "anthropic/claude-3-haiku".into(),
        )
        .unwrap()
    }

    fn test_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "anthropic/claude-3-haiku".into(),
            messages: vec![
                ApiMessage::system("You are a caring health assistant."),
                ApiMessage {
                    role: "user".into(),
                    content: "I have a headache".into(),
                },
            ],
        }
    }

    fn success_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "gen-test",
            "model": "anthropic/claude-3-haiku",
            "choices": [
                {"message": {"role": "assistant", "content": content}}
            ]
        })
    }

    #[tokio::test]
    async fn complete_chat_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("• Rest 💤")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete_chat(&test_request()).await.unwrap();

        assert_eq!(result.choices.len(), 1);
        assert_eq!(result.choices[0].message.content, "• Rest 💤");
    }

    #[tokio::test]
    async fn complete_chat_retries_on_429() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 429, "message": "Rate limited"}
        });

        // First request returns 429, second returns 200.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("After retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete_chat(&test_request()).await.unwrap();
        assert_eq!(result.choices[0].message.content, "After retry");
    }

    #[tokio::test]
    async fn complete_chat_fails_on_400() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 400, "message": "Bad model"}
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete_chat(&test_request()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Bad model"), "got: {err}");
    }

    #[tokio::test]
    async fn complete_chat_exhausts_retries_on_503() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 503, "message": "Service overloaded"}
        });

        // Both attempts return 503.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete_chat(&test_request()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Service overloaded"), "got: {err}");
    }

    #[tokio::test]
    async fn client_sends_bearer_authorization() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-or-test-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete_chat(&test_request()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }
}
