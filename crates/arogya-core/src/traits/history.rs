// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History store trait: where the chat client persists transcripts.
//!
//! Two implementations exist: a remote store that calls the REST facade, and
//! a local file-backed store for offline use. The chat client only sees this
//! trait, so the persistence strategy is a configuration choice.

use async_trait::async_trait;

use crate::error::ArogyaError;
use crate::types::{Chat, ChatMessage};

/// Persistence seam for the chat client.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Saves a transcript as a new chat owned by `email`. Always inserts.
    async fn save_chat(&self, email: &str, messages: &[ChatMessage]) -> Result<Chat, ArogyaError>;

    /// Lists saved chats for `email`, newest first.
    async fn list_chats(&self, email: &str) -> Result<Vec<Chat>, ArogyaError>;

    /// Deletes one saved chat owned by `email`.
    async fn delete_chat(&self, email: &str, id: &str) -> Result<(), ArogyaError>;
}
