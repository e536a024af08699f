// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech subsystem for the Arogya assistant.
//!
//! Owns utterance lifecycle on top of the [`arogya_core::Synthesizer`]
//! seam: at most one utterance is active, starting a new one cancels the
//! previous one, and progress is simulated from word count at a configured
//! speaking rate.

pub mod filter;
pub mod playback;
pub mod synth;

pub use filter::{strip_emoji, utterance_duration};
pub use playback::{PlaybackController, PlaybackStatus};
pub use synth::{NullRecognizer, NullSynthesizer};
