// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fallback speech backends.
//!
//! Headless environments and disabled-speech configs still get a working
//! playback controller: the null synthesizer accepts every utterance
//! silently, so progress simulation and toggle semantics behave the same
//! with or without an audio device.

use arogya_core::{ArogyaError, Recognizer, Synthesizer};
use async_trait::async_trait;
use tracing::debug;

/// Synthesizer that produces no audio.
#[derive(Debug, Default)]
pub struct NullSynthesizer;

impl Synthesizer for NullSynthesizer {
    fn speak(&self, text: &str, lang: &str) -> Result<(), ArogyaError> {
        debug!(lang, chars = text.chars().count(), "null synthesizer: utterance dropped");
        Ok(())
    }

    fn cancel(&self) {}
}

/// Recognizer that never captures anything.
#[derive(Debug, Default)]
pub struct NullRecognizer;

#[async_trait]
impl Recognizer for NullRecognizer {
    async fn recognize_once(&self, lang: &str) -> Result<Option<String>, ArogyaError> {
        debug!(lang, "null recognizer: nothing captured");
        Ok(None)
    }
}
