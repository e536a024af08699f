// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for hosted completion endpoints.

use async_trait::async_trait;

use crate::error::ArogyaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionReply};

/// Adapter for hosted chat-completion APIs.
///
/// Providers receive an assembled transcript plus a system prompt and return
/// a single generated reply. There is no streaming surface: the chat client
/// renders replies whole.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends a completion request and returns the full reply.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, ArogyaError>;
}
