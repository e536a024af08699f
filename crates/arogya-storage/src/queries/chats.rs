// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transcript store operations.
//!
//! Transcripts are stored as JSON text in the `messages` column; chats are
//! insert-only and deletes are always scoped to the owning email.

use arogya_core::ArogyaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Chat, ChatMessage};

/// Insert a new chat record.
pub async fn insert_chat(db: &Database, chat: &Chat) -> Result<(), ArogyaError> {
    let chat = chat.clone();
    let messages_json =
        serde_json::to_string(&chat.messages).map_err(|e| ArogyaError::Storage {
            source: Box::new(e),
        })?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chats (id, user_email, title, messages, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    chat.id,
                    chat.user_email,
                    chat.title,
                    messages_json,
                    chat.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List chats owned by `user_email`, newest first.
pub async fn list_chats(db: &Database, user_email: &str) -> Result<Vec<Chat>, ArogyaError> {
    let user_email = user_email.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_email, title, messages, created_at
                 FROM chats WHERE user_email = ?1 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![user_email], |row| {
                let raw: String = row.get(3)?;
                let messages = decode_messages(&raw)?;
                Ok(Chat {
                    id: row.get(0)?,
                    user_email: row.get(1)?,
                    title: row.get(2)?,
                    messages,
                    created_at: row.get(4)?,
                })
            })?;
            let mut chats = Vec::new();
            for row in rows {
                chats.push(row?);
            }
            Ok(chats)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a chat by id, scoped to its owner.
///
/// Returns `false` when no chat with that id belongs to `user_email`; a
/// caller can never remove another user's chat by guessing ids.
pub async fn delete_chat(db: &Database, id: &str, user_email: &str) -> Result<bool, ArogyaError> {
    let id = id.to_string();
    let user_email = user_email.to_string();
    db.connection()
        .call(move |conn| {
            let rows = conn.execute(
                "DELETE FROM chats WHERE id = ?1 AND user_email = ?2",
                params![id, user_email],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Decode the JSON `messages` column into typed transcript messages.
fn decode_messages(raw: &str) -> Result<Vec<ChatMessage>, rusqlite::Error> {
    serde_json::from_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })
}
