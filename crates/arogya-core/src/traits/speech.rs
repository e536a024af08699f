// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech adapter traits for synthesis and single-shot recognition.

use async_trait::async_trait;

use crate::error::ArogyaError;

/// Backend that turns text into audible speech.
///
/// Implementations start playback and return immediately; the playback
/// controller owns utterance lifecycle and guarantees at most one active
/// utterance, so `cancel` must stop whatever is currently audible.
pub trait Synthesizer: Send + Sync {
    /// Begins speaking `text` with a voice matching the BCP 47 `lang` tag.
    fn speak(&self, text: &str, lang: &str) -> Result<(), ArogyaError>;

    /// Stops any in-flight audio. A no-op when nothing is playing.
    fn cancel(&self);
}

/// Backend that captures one utterance of user speech.
///
/// Recognition is single-shot and non-continuous: one call captures one
/// result, which replaces the composer text wholesale.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Listens once and returns the transcript, or `None` when nothing was
    /// captured or no recognition backend is available.
    async fn recognize_once(&self, lang: &str) -> Result<Option<String>, ArogyaError>;
}
