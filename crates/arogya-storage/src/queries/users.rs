// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential store CRUD operations.

use arogya_core::ArogyaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::User;

/// Insert a user if the email is not already taken.
///
/// The UNIQUE constraint on `users.email` makes this a single atomic
/// insert-if-absent: a concurrent signup with the same email cannot slip
/// between a check and an insert. Returns `false` when the email exists.
pub async fn create_user(db: &Database, user: &User) -> Result<bool, ArogyaError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            let rows = conn.execute(
                "INSERT INTO users (email, password_hash, created_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (email) DO NOTHING",
                params![user.email, user.password_hash, user.created_at],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by email.
pub async fn get_user(db: &Database, email: &str) -> Result<Option<User>, ArogyaError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT email, password_hash, created_at FROM users WHERE email = ?1",
            )?;
            let result = stmt.query_row(params![email], |row| {
                Ok(User {
                    email: row.get(0)?,
                    password_hash: row.get(1)?,
                    created_at: row.get(2)?,
                })
            });
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
