// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat client for the Arogya assistant.
//!
//! [`ChatSession`] is the state machine behind any frontend: it owns the
//! transcript and runs the send pipeline (romanized-Gujarati handling,
//! completion call, reply append, persistence). Persistence goes through
//! the [`arogya_core::HistoryStore`] seam with two backends: [`ApiClient`]
//! against the REST facade and [`LocalHistory`] on a local JSON file.

pub mod api;
pub mod i18n;
pub mod local;
pub mod session;

pub use api::ApiClient;
pub use i18n::{UiText, keyword_shortcuts, ui_text};
pub use local::LocalHistory;
pub use session::ChatSession;
