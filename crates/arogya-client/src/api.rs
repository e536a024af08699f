// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Arogya REST facade.
//!
//! Thin wrapper over the gateway's wire contract: signup and login against
//! `/api/signup` and `/api/login`, then the chat history routes with the
//! bearer token login handed out.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use arogya_core::ArogyaError;
use arogya_core::traits::HistoryStore;
use arogya_core::types::{Chat, ChatMessage};

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct MsgBody {
    msg: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    email: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct SaveChatBody<'a> {
    #[serde(rename = "userEmail")]
    user_email: &'a str,
    messages: &'a [ChatMessage],
}

/// Client for the account and chat history API.
///
/// Construct, call [`ApiClient::login`] once, then use the [`HistoryStore`]
/// surface. History calls before login fail with an auth error.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client against the given server URL
    /// (e.g. "http://127.0.0.1:5000").
    pub fn new(base_url: String) -> Result<Self, ArogyaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ArogyaError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Registers a new account. The server's rejection message (for example
    /// a duplicate email) comes back as an auth error.
    pub async fn signup(&self, email: &str, password: &str) -> Result<(), ArogyaError> {
        let response = self
            .client
            .post(format!("{}/api/signup", self.base_url))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(request_error)?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(ArogyaError::Auth(error_msg(response).await))
    }

    /// Logs in and stores the bearer token for the history routes.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String, ArogyaError> {
        let response = self
            .client
            .post(format!("{}/api/login", self.base_url))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ArogyaError::Auth(error_msg(response).await));
        }

        let body: LoginBody = response.json().await.map_err(|e| ArogyaError::Channel {
            message: format!("failed to parse login response: {e}"),
            source: Some(Box::new(e)),
        })?;
        self.token = Some(body.token);
        Ok(body.email)
    }

    /// True once a login token is held.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    fn token(&self) -> Result<&str, ArogyaError> {
        self.token
            .as_deref()
            .ok_or_else(|| ArogyaError::Auth("not logged in".to_string()))
    }
}

#[async_trait]
impl HistoryStore for ApiClient {
    async fn save_chat(&self, email: &str, messages: &[ChatMessage]) -> Result<Chat, ArogyaError> {
        let response = self
            .client
            .post(format!("{}/api/chats", self.base_url))
            .bearer_auth(self.token()?)
            .json(&SaveChatBody {
                user_email: email,
                messages,
            })
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ArogyaError::Channel {
                message: error_msg(response).await,
                source: None,
            });
        }

        response.json().await.map_err(|e| ArogyaError::Channel {
            message: format!("failed to parse saved chat: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn list_chats(&self, email: &str) -> Result<Vec<Chat>, ArogyaError> {
        let response = self
            .client
            .get(format!("{}/api/chats/{email}", self.base_url))
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ArogyaError::Channel {
                message: error_msg(response).await,
                source: None,
            });
        }

        response.json().await.map_err(|e| ArogyaError::Channel {
            message: format!("failed to parse chat list: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn delete_chat(&self, _email: &str, id: &str) -> Result<(), ArogyaError> {
        let response = self
            .client
            .delete(format!("{}/api/chats/{id}", self.base_url))
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ArogyaError::Channel {
                message: error_msg(response).await,
                source: None,
            });
        }
        Ok(())
    }
}

fn request_error(e: reqwest::Error) -> ArogyaError {
    ArogyaError::Channel {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Extracts a `{"msg": ...}` body, falling back to the raw status.
async fn error_msg(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<MsgBody>().await {
        Ok(body) => body.msg,
        Err(_) => format!("server returned {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn logged_in_client(server: &MockServer) -> ApiClient {
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "msg": "Login successful",
                "email": "asha@example.com",
                "token": "tok-abc"
            })))
            .mount(server)
            .await;

        let mut client = ApiClient::new(server.uri()).unwrap();
        client.login("asha@example.com", "s3cret").await.unwrap();
        client
    }

    #[tokio::test]
    async fn login_stores_token() {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;
        assert!(client.is_logged_in());
    }

    #[tokio::test]
    async fn login_failure_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "msg": "Invalid credentials"
            })))
            .mount(&server)
            .await;

        let mut client = ApiClient::new(server.uri()).unwrap();
        let err = client.login("asha@example.com", "wrong").await.unwrap_err();
        assert!(err.to_string().contains("Invalid credentials"), "got: {err}");
    }

    #[tokio::test]
    async fn signup_duplicate_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/signup"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "msg": "User already exists"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.signup("asha@example.com", "s3cret").await.unwrap_err();
        assert!(err.to_string().contains("User already exists"), "got: {err}");
    }

    #[tokio::test]
    async fn save_chat_sends_bearer_and_owner_field() {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;

        let messages = vec![ChatMessage::user("I have a fever")];
        let expected_body = serde_json::json!({
            "userEmail": "asha@example.com",
            "messages": [{"sender": "user", "text": "I have a fever"}]
        });
        let saved = serde_json::json!({
            "id": "c1",
            "user_email": "asha@example.com",
            "title": "I have a fever",
            "messages": [{"sender": "user", "text": "I have a fever"}],
            "created_at": "2026-01-01T00:00:00Z"
        });

        Mock::given(method("POST"))
            .and(path("/api/chats"))
            .and(header("authorization", "Bearer tok-abc"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(&saved))
            .mount(&server)
            .await;

        let chat = client
            .save_chat("asha@example.com", &messages)
            .await
            .unwrap();
        assert_eq!(chat.id, "c1");
        assert_eq!(chat.title, "I have a fever");
    }

    #[tokio::test]
    async fn history_calls_before_login_fail() {
        let server = MockServer::start().await;
        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.list_chats("asha@example.com").await.unwrap_err();
        assert!(err.to_string().contains("not logged in"), "got: {err}");
    }

    #[tokio::test]
    async fn delete_chat_hits_id_route() {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/api/chats/c1"))
            .and(header("authorization", "Bearer tok-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "msg": "Chat deleted"
            })))
            .mount(&server)
            .await;

        client.delete_chat("asha@example.com", "c1").await.unwrap();
    }
}
