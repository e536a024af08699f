// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the credential and chat transcript stores.

use async_trait::async_trait;

use crate::error::ArogyaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Chat, User};

/// Adapter for the persistence backend behind the REST facade.
///
/// Covers both stores: user credentials keyed by email, and insert-only chat
/// transcripts keyed by owner email. Login tokens live here too so handlers
/// can resolve a bearer token back to its owning identity.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), ArogyaError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), ArogyaError>;

    // --- Credential store ---

    /// Inserts a user if the email is not already taken.
    ///
    /// This is a single atomic insert-if-absent; returns `false` when the
    /// email already exists. There is no separate existence check for a
    /// concurrent signup to race against.
    async fn create_user(&self, user: &User) -> Result<bool, ArogyaError>;

    /// Looks up a user by email.
    async fn get_user(&self, email: &str) -> Result<Option<User>, ArogyaError>;

    // --- Chat transcript store ---

    /// Inserts a new chat record. Saves never update in place.
    async fn insert_chat(&self, chat: &Chat) -> Result<(), ArogyaError>;

    /// Lists chats owned by the given email, newest first.
    async fn list_chats(&self, user_email: &str) -> Result<Vec<Chat>, ArogyaError>;

    /// Deletes a chat by id, but only when owned by `user_email`.
    ///
    /// Returns `false` when no such chat exists for that owner; other users'
    /// chats are never touched.
    async fn delete_chat(&self, id: &str, user_email: &str) -> Result<bool, ArogyaError>;

    // --- Login tokens ---

    /// Stores a freshly issued login token for the given email.
    async fn insert_token(&self, token: &str, email: &str) -> Result<(), ArogyaError>;

    /// Resolves a bearer token to the email it was issued to.
    async fn lookup_token(&self, token: &str) -> Result<Option<String>, ArogyaError>;
}
