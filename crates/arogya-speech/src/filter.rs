// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text preparation for speech synthesis.

use std::time::Duration;

/// Removes emoji before synthesis.
///
/// Bot replies are emoji-heavy by prompt design, and synthesis engines read
/// emoji out as their Unicode names. Strips the symbol planes U+1F300
/// through U+1FAFF; older dingbats like the error-marker cross survive.
pub fn strip_emoji(text: &str) -> String {
    text.chars()
        .filter(|c| !('\u{1F300}'..='\u{1FAFF}').contains(c))
        .collect()
}

/// Estimated utterance duration at the given speaking rate.
///
/// Words are whitespace-separated; an utterance with no words has zero
/// duration and completes on the first progress tick.
pub fn utterance_duration(text: &str, words_per_minute: u32) -> Duration {
    let words = text.split_whitespace().count();
    if words == 0 || words_per_minute == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(words as f64 / words_per_minute as f64 * 60.0)
}
