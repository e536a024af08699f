// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Arogya symptom-chat assistant.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common domain types used throughout the Arogya workspace. Concrete
//! backends (SQLite storage, the OpenRouter provider, the REST history
//! store, speech synthesis) implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ArogyaError;
pub use types::{AdapterType, HealthStatus, system_prompt};

// Re-export all adapter traits at crate root.
pub use traits::{
    CompletionProvider, HistoryStore, PluginAdapter, Recognizer, StorageAdapter, Synthesizer,
};
