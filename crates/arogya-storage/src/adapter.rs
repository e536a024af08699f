// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use arogya_config::model::StorageConfig;
use arogya_core::types::{Chat, User};
use arogya_core::{AdapterType, ArogyaError, HealthStatus, PluginAdapter, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, ArogyaError> {
        self.db.get().ok_or_else(|| ArogyaError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ArogyaError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ArogyaError> {
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), ArogyaError> {
        let path = self.config.database_path.clone();
        let db = Database::open(&path).await?;
        self.db.set(db).map_err(|_| ArogyaError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), ArogyaError> {
        let db = self.db()?;
        // Checkpoint WAL; the connection itself closes on drop.
        db.connection()
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    // --- Credential store ---

    async fn create_user(&self, user: &User) -> Result<bool, ArogyaError> {
        queries::users::create_user(self.db()?, user).await
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>, ArogyaError> {
        queries::users::get_user(self.db()?, email).await
    }

    // --- Chat transcript store ---

    async fn insert_chat(&self, chat: &Chat) -> Result<(), ArogyaError> {
        queries::chats::insert_chat(self.db()?, chat).await
    }

    async fn list_chats(&self, user_email: &str) -> Result<Vec<Chat>, ArogyaError> {
        queries::chats::list_chats(self.db()?, user_email).await
    }

    async fn delete_chat(&self, id: &str, user_email: &str) -> Result<bool, ArogyaError> {
        queries::chats::delete_chat(self.db()?, id, user_email).await
    }

    // --- Login tokens ---

    async fn insert_token(&self, token: &str, email: &str) -> Result<(), ArogyaError> {
        let now = chrono::Utc::now().to_rfc3339();
        queries::tokens::insert_token(self.db()?, token, email, &now).await
    }

    async fn lookup_token(&self, token: &str) -> Result<Option<String>, ArogyaError> {
        queries::tokens::lookup_token(self.db()?, token).await
    }
}
