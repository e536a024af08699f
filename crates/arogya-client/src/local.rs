// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed history store for offline use.
//!
//! One JSON file holds every local account and its chats. Every mutation
//! rewrites the file; the volumes involved (a handful of transcripts) make
//! anything cleverer pointless. Password hashing matches the server side,
//! so a local store never holds plain passwords either.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use arogya_auth::{hash_password, verify_password};
use arogya_core::ArogyaError;
use arogya_core::traits::HistoryStore;
use arogya_core::types::{Chat, ChatMessage, derive_title};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LocalData {
    users: BTreeMap<String, LocalAccount>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LocalAccount {
    password_hash: String,
    chats: Vec<Chat>,
}

/// History store persisted to a single local JSON file.
pub struct LocalHistory {
    path: PathBuf,
    data: Mutex<LocalData>,
}

impl LocalHistory {
    /// Opens (or creates) the store at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ArogyaError> {
        let path = path.as_ref().to_path_buf();
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| ArogyaError::Storage {
                source: Box::new(e),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LocalData::default(),
            Err(e) => return Err(ArogyaError::Storage { source: Box::new(e) }),
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Registers a local account. Fails when the email is taken.
    pub async fn signup(&self, email: &str, password: &str) -> Result<(), ArogyaError> {
        let mut data = self.data.lock().await;
        if data.users.contains_key(email) {
            return Err(ArogyaError::Auth("User already exists".to_string()));
        }

        let hash = hash_password(password)?;
        data.users.insert(
            email.to_string(),
            LocalAccount {
                password_hash: hash,
                chats: Vec::new(),
            },
        );
        self.flush(&data).await
    }

    /// Verifies local credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ArogyaError> {
        let data = self.data.lock().await;
        let verified = match data.users.get(email) {
            Some(account) => verify_password(password, &account.password_hash)?,
            None => false,
        };
        if !verified {
            return Err(ArogyaError::Auth("Invalid credentials".to_string()));
        }
        Ok(())
    }

    async fn flush(&self, data: &LocalData) -> Result<(), ArogyaError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ArogyaError::Storage { source: Box::new(e) })?;
        }
        let contents = serde_json::to_string_pretty(data)
            .map_err(|e| ArogyaError::Storage { source: Box::new(e) })?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| ArogyaError::Storage { source: Box::new(e) })?;
        debug!(path = %self.path.display(), "local history flushed");
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for LocalHistory {
    async fn save_chat(&self, email: &str, messages: &[ChatMessage]) -> Result<Chat, ArogyaError> {
        let mut data = self.data.lock().await;
        let account = data
            .users
            .get_mut(email)
            .ok_or_else(|| ArogyaError::Auth(format!("no local account for {email}")))?;

        let chat = Chat {
            id: uuid::Uuid::new_v4().to_string(),
            user_email: email.to_string(),
            title: derive_title(messages),
            messages: messages.to_vec(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        account.chats.push(chat.clone());
        self.flush(&data).await?;
        Ok(chat)
    }

    async fn list_chats(&self, email: &str) -> Result<Vec<Chat>, ArogyaError> {
        let data = self.data.lock().await;
        let mut chats = data
            .users
            .get(email)
            .map(|account| account.chats.clone())
            .unwrap_or_default();
        // Newest first, matching the server's ordering.
        chats.reverse();
        Ok(chats)
    }

    async fn delete_chat(&self, email: &str, id: &str) -> Result<(), ArogyaError> {
        let mut data = self.data.lock().await;
        let account = data
            .users
            .get_mut(email)
            .ok_or_else(|| ArogyaError::Auth(format!("no local account for {email}")))?;

        let before = account.chats.len();
        account.chats.retain(|chat| chat.id != id);
        if account.chats.len() == before {
            return Err(ArogyaError::Internal("Chat not found".to_string()));
        }
        self.flush(&data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn store_with_account(dir: &tempfile::TempDir) -> LocalHistory {
        let store = LocalHistory::open(dir.path().join("history.json"))
            .await
            .unwrap();
        store.signup("asha@example.com", "s3cret").await.unwrap();
        store
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_and_hashes_password() {
        let dir = tempdir().unwrap();
        let store = store_with_account(&dir).await;

        let err = store.signup("asha@example.com", "other").await.unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // The file on disk never holds the plain password.
        let raw = std::fs::read_to_string(dir.path().join("history.json")).unwrap();
        assert!(!raw.contains("s3cret"));
        assert!(raw.contains("$argon2"));
    }

    #[tokio::test]
    async fn login_verifies_credentials() {
        let dir = tempdir().unwrap();
        let store = store_with_account(&dir).await;

        store.login("asha@example.com", "s3cret").await.unwrap();
        assert!(store.login("asha@example.com", "wrong").await.is_err());
        assert!(store.login("nobody@example.com", "s3cret").await.is_err());
    }

    #[tokio::test]
    async fn chats_roundtrip_and_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        {
            let store = LocalHistory::open(&path).await.unwrap();
            store.signup("asha@example.com", "s3cret").await.unwrap();
            store
                .save_chat("asha@example.com", &[ChatMessage::user("I have a fever")])
                .await
                .unwrap();
            store
                .save_chat("asha@example.com", &[ChatMessage::user("pet ma dard")])
                .await
                .unwrap();
        }

        let store = LocalHistory::open(&path).await.unwrap();
        let chats = store.list_chats("asha@example.com").await.unwrap();
        assert_eq!(chats.len(), 2);
        // Newest first.
        assert_eq!(chats[0].title, "pet ma dard");

        store
            .delete_chat("asha@example.com", &chats[0].id)
            .await
            .unwrap();
        assert_eq!(store.list_chats("asha@example.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_chat_errors() {
        let dir = tempdir().unwrap();
        let store = store_with_account(&dir).await;
        let err = store
            .delete_chat("asha@example.com", "no-such-id")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {err}");
    }
}
