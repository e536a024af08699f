// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login token operations.

use arogya_core::ArogyaError;
use rusqlite::params;

use crate::database::Database;

/// Store a freshly issued login token.
pub async fn insert_token(
    db: &Database,
    token: &str,
    email: &str,
    created_at: &str,
) -> Result<(), ArogyaError> {
    let token = token.to_string();
    let email = email.to_string();
    let created_at = created_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO auth_tokens (token, email, created_at) VALUES (?1, ?2, ?3)",
                params![token, email, created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Resolve a bearer token back to the email it was issued to.
pub async fn lookup_token(db: &Database, token: &str) -> Result<Option<String>, ArogyaError> {
    let token = token.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT email FROM auth_tokens WHERE token = ?1")?;
            let result = stmt.query_row(params![token], |row| row.get::<_, String>(0));
            match result {
                Ok(email) => Ok(Some(email)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
