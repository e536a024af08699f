// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the unauthenticated Google Translate `gtx` endpoint.

use std::time::Duration;

use arogya_core::ArogyaError;
use tracing::debug;

/// Client for `GET /translate_a/single` with `client=gtx`.
///
/// The endpoint needs no API key and auto-detects the source language. The
/// response is a nested positional array, not an object; segment decoding
/// lives in [`decode_segments`].
#[derive(Debug, Clone)]
pub struct Translator {
    client: reqwest::Client,
    base_url: String,
}

impl Translator {
    /// Creates a translator against the given base URL
    /// (e.g. "https://translate.googleapis.com").
    pub fn new(base_url: String) -> Result<Self, ArogyaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ArogyaError::Translate {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, base_url })
    }

    /// Translates `text` into `target_lang`, auto-detecting the source.
    ///
    /// Multi-sentence inputs come back as several segments; they are joined
    /// with a single space.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ArogyaError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ArogyaError::Translate {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, target_lang, "translate response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArogyaError::Translate {
                message: format!("translate endpoint returned {status}: {body}"),
                source: None,
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| ArogyaError::Translate {
                message: format!("failed to parse translate response: {e}"),
                source: Some(Box::new(e)),
            })?;

        decode_segments(&body)
    }
}

/// Extracts translated text from the gtx positional-array response.
///
/// The shape is `[[[translated, original, ...], ...], ...]`: the outer
/// array's first element lists segment pairs whose first element is the
/// translated text.
fn decode_segments(body: &serde_json::Value) -> Result<String, ArogyaError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ArogyaError::Translate {
            message: "translate response missing segment array".into(),
            source: None,
        })?;

    let parts: Vec<&str> = segments
        .iter()
        .filter_map(|pair| pair.get(0).and_then(|v| v.as_str()))
        .collect();

    if parts.is_empty() {
        return Err(ArogyaError::Translate {
            message: "translate response contained no segments".into(),
            source: None,
        });
    }

    Ok(parts.join(" "))
}
