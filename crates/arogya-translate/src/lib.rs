// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input-language handling for the Arogya assistant.
//!
//! Gujarati speakers commonly type in Latin script. This crate detects such
//! input heuristically and converts it to Gujarati script through the
//! unauthenticated Google Translate `gtx` endpoint before the text reaches
//! the completion provider.

pub mod client;
pub mod detect;

pub use client::Translator;
pub use detect::detect_gujarati_roman;
