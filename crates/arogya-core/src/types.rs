// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Arogya workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Maximum number of characters carried into a derived chat title.
pub const TITLE_MAX_CHARS: usize = 30;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Provider,
    Storage,
    History,
    Speech,
}

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript message.
///
/// Bot messages carry a BCP 47 speech-language tag so playback can select a
/// matching voice; user messages leave it unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_lang: Option<String>,
}

impl ChatMessage {
    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            audio_lang: None,
        }
    }

    /// Creates a bot message tagged with a speech language.
    pub fn bot(text: impl Into<String>, audio_lang: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            audio_lang: Some(audio_lang.into()),
        }
    }
}

/// A persisted chat: one transcript owned by a user.
///
/// Chats are insert-only; every save creates a new record with a freshly
/// derived title and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub user_email: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: String,
}

/// Derives a chat title from the first message of a transcript.
///
/// Takes the first [`TITLE_MAX_CHARS`] characters (not bytes -- transcripts
/// are routinely Devanagari, Gujarati, or Telugu) of the first message text,
/// falling back to `"Chat"` for an empty transcript.
pub fn derive_title(messages: &[ChatMessage]) -> String {
    messages
        .first()
        .map(|m| m.text.chars().take(TITLE_MAX_CHARS).collect())
        .filter(|t: &String| !t.is_empty())
        .unwrap_or_else(|| "Chat".to_string())
}

/// A registered user account.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    /// Argon2id hash in PHC string format. Never the plain password.
    pub password_hash: String,
    pub created_at: String,
}

/// A login token issued at login and presented as a bearer credential.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
    pub email: String,
    pub created_at: String,
}

/// Languages the assistant can converse in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Mr,
    Gu,
    Te,
}

impl Language {
    /// The language name in its own script, for selection menus.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Mr => "मराठी",
            Language::Gu => "ગુજરાતી",
            Language::Te => "తెలుగు",
        }
    }

    /// The BCP 47 tag bot replies are tagged with for speech playback.
    ///
    /// Gujarati replies fall back to an Indian-English voice: no widely
    /// deployed synthesis voice covers `gu-IN`.
    pub fn speech_tag(self) -> &'static str {
        match self {
            Language::Hi => "hi-IN",
            Language::Gu => "en-IN",
            _ => "en-US",
        }
    }
}

/// Health topic a conversation is scoped to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HealthCategory {
    General,
    Children,
    Elderly,
    Maternity,
    Covid,
}

impl HealthCategory {
    /// The category label localized to the given language.
    pub fn label(self, language: Language) -> &'static str {
        use HealthCategory::*;
        use Language::*;
        match (self, language) {
            (General, En) => "General",
            (General, Hi) | (General, Mr) => "सामान्य",
            (General, Gu) => "સામાન્ય",
            (General, Te) => "సాధారణ",
            (Children, En) => "Children",
            (Children, Hi) => "बच्चे",
            (Children, Mr) => "मुले",
            (Children, Gu) => "બાળકો",
            (Children, Te) => "పిల్లలు",
            (Elderly, En) => "Elderly",
            (Elderly, Hi) => "वृद्ध",
            (Elderly, Mr) => "ज्येष्ठ",
            (Elderly, Gu) => "વૃદ્ધ",
            (Elderly, Te) => "వృద్ధులు",
            (Maternity, En) => "Maternity",
            (Maternity, Hi) | (Maternity, Mr) => "गर्भावस्था",
            (Maternity, Gu) => "ગર્ભાવસ્થા",
            (Maternity, Te) => "గర్భధారణ",
            (Covid, En) => "COVID-19",
            (Covid, Hi) => "कोविड-19",
            (Covid, Mr) => "कोविड-१९",
            (Covid, Gu) => "કોરોના",
            (Covid, Te) => "కోవిడ్-19",
        }
    }
}

/// Builds the assistant system prompt for a language and category.
///
/// Hindi and Gujarati conversations carry the user's own script through to
/// the model, so the prompt does not name a reply language; for every other
/// language the model is told explicitly which language to answer in.
pub fn system_prompt(language: Language, category: HealthCategory) -> String {
    let topic = category.label(language);
    match language {
        Language::Hi | Language::Gu => {
            format!("You are a caring health assistant. Use bullet points and emojis. Topic: {topic}.")
        }
        _ => format!(
            "You are a caring health assistant. Reply in {} using bullet points and emojis. Topic: {topic}.",
            language.label()
        ),
    }
}

/// A single prompt turn sent to a completion provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

impl PromptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// A request to a completion provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt for this call. `None` uses the provider's default.
    pub system_prompt: Option<String>,
    /// Conversation turns in chronological order.
    pub messages: Vec<PromptMessage>,
    /// Model override. `None` uses the provider's configured model.
    pub model: Option<String>,
}

/// A reply from a completion provider.
#[derive(Debug, Clone)]
pub struct CompletionReply {
    /// Generated reply text.
    pub content: String,
    /// Model that actually served the request, when reported.
    pub model: Option<String>,
}
