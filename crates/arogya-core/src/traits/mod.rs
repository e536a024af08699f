// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Arogya workspace.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod history;
pub mod provider;
pub mod speech;
pub mod storage;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use history::HistoryStore;
pub use provider::CompletionProvider;
pub use speech::{Recognizer, Synthesizer};
pub use storage::StorageAdapter;
