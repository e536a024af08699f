// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Playback control with simulated progress.
//!
//! Synthesis backends report nothing about playback position, so progress is
//! simulated from word count at a configured speaking rate: a timer ticks
//! every 100ms and advances a 0..=1 ratio until the estimated duration
//! elapses.

use std::sync::Arc;
use std::time::Duration;

use arogya_core::{ArogyaError, Synthesizer};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::filter::{strip_emoji, utterance_duration};

const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// Snapshot of the playback state for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackStatus {
    /// The message currently being spoken, if any.
    pub playing_id: Option<usize>,
    /// Simulated progress through the utterance, 0.0 to 1.0.
    pub progress: f32,
}

struct PlaybackState {
    playing_id: Option<usize>,
    progress: f32,
    /// Bumped on every start so a stale progress task can tell it lost
    /// ownership of the state.
    generation: u64,
    cancel: Option<CancellationToken>,
}

/// Drives a [`Synthesizer`] with at-most-one-active-utterance semantics.
///
/// Toggling the playing message stops it; toggling any other message stops
/// the current one before the new one starts. Progress resets to zero
/// whenever playback stops, whether by completion or cancellation.
pub struct PlaybackController {
    synthesizer: Arc<dyn Synthesizer>,
    words_per_minute: u32,
    state: Arc<Mutex<PlaybackState>>,
}

impl PlaybackController {
    pub fn new(synthesizer: Arc<dyn Synthesizer>, words_per_minute: u32) -> Self {
        Self {
            synthesizer,
            words_per_minute,
            state: Arc::new(Mutex::new(PlaybackState {
                playing_id: None,
                progress: 0.0,
                generation: 0,
                cancel: None,
            })),
        }
    }

    /// Play/pause toggle for the message with the given id.
    ///
    /// Returns `true` when the message is now playing, `false` when the
    /// toggle stopped it.
    pub async fn toggle(&self, id: usize, text: &str, lang: &str) -> Result<bool, ArogyaError> {
        let mut state = self.state.lock().await;

        // Toggling the active message stops it.
        if state.playing_id == Some(id) {
            self.stop_locked(&mut state);
            return Ok(false);
        }

        // Starting a new utterance always stops the previous one first.
        if state.playing_id.is_some() {
            self.stop_locked(&mut state);
        }

        let spoken = strip_emoji(text);
        self.synthesizer.speak(&spoken, lang)?;

        state.playing_id = Some(id);
        state.progress = 0.0;
        state.generation += 1;

        let cancel = CancellationToken::new();
        state.cancel = Some(cancel.clone());

        let duration = utterance_duration(&spoken, self.words_per_minute);
        debug!(id, ?duration, lang, "utterance started");
        self.spawn_progress_task(state.generation, duration, cancel);

        Ok(true)
    }

    /// Stops playback unconditionally. A no-op when nothing is playing.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        self.stop_locked(&mut state);
    }

    /// Returns the current playback snapshot.
    pub async fn status(&self) -> PlaybackStatus {
        let state = self.state.lock().await;
        PlaybackStatus {
            playing_id: state.playing_id,
            progress: state.progress,
        }
    }

    fn stop_locked(&self, state: &mut PlaybackState) {
        if let Some(cancel) = state.cancel.take() {
            cancel.cancel();
        }
        if state.playing_id.take().is_some() {
            self.synthesizer.cancel();
        }
        state.progress = 0.0;
    }

    fn spawn_progress_task(&self, generation: u64, duration: Duration, cancel: CancellationToken) {
        let shared = Arc::clone(&self.state);
        tokio::spawn(async move {
            let start = tokio::time::Instant::now();
            let mut ticker = tokio::time::interval(PROGRESS_TICK);
            // The first tick fires immediately; skip it so progress starts
            // at zero.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let elapsed = start.elapsed();
                        let done = elapsed >= duration;
                        let ratio = if done {
                            1.0
                        } else {
                            (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
                        };

                        let mut state = shared.lock().await;
                        if state.generation != generation {
                            break;
                        }
                        state.progress = ratio;
                        if done {
                            debug!("utterance finished");
                            state.playing_id = None;
                            state.progress = 0.0;
                            state.cancel = None;
                            break;
                        }
                    }
                }
            }
        });
    }
}
