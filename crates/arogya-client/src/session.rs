// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat session state machine.
//!
//! Owns the running transcript and drives one exchange per send: normalize
//! the input, call the completion provider, append the reply, persist the
//! transcript. Provider failures surface as an inline bot message rather
//! than an error; persistence failures are logged and never interrupt the
//! conversation.

use std::sync::Arc;

use tracing::{error, warn};

use arogya_core::traits::{CompletionProvider, HistoryStore};
use arogya_core::types::{
    Chat, ChatMessage, CompletionRequest, HealthCategory, Language, PromptMessage, Sender,
    system_prompt,
};
use arogya_core::ArogyaError;
use arogya_translate::{Translator, detect_gujarati_roman};

/// Shown when the provider answers without any content.
const NO_REPLY: &str = "❌ No reply received.";
/// Shown inline when the completion call fails outright.
const PROVIDER_ERROR: &str = "❌ Error contacting OpenRouter.";

/// One user's running conversation.
pub struct ChatSession {
    provider: Arc<dyn CompletionProvider>,
    history: Arc<dyn HistoryStore>,
    translator: Option<Translator>,
    email: String,
    language: Language,
    category: HealthCategory,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        history: Arc<dyn HistoryStore>,
        translator: Option<Translator>,
        email: String,
        language: Language,
        category: HealthCategory,
    ) -> Self {
        Self {
            provider,
            history,
            translator,
            email,
            language,
            category,
            messages: Vec::new(),
        }
    }

    /// Sends one user message through the pipeline.
    ///
    /// Whitespace-only input is dropped before anything else happens: no
    /// transcript change, no provider call. Otherwise the user message is
    /// appended immediately and the returned message is the bot's reply
    /// (possibly an inline error).
    pub async fn send(&mut self, input: &str) -> Option<ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(input));

        let bot = match self.complete(input).await {
            Ok(reply) => {
                let text = if reply.trim().is_empty() {
                    NO_REPLY.to_string()
                } else {
                    reply
                };
                let bot = ChatMessage::bot(text, self.language.speech_tag());
                self.messages.push(bot.clone());

                // Persistence is best-effort; the conversation carries on.
                if let Err(e) = self.history.save_chat(&self.email, &self.messages).await {
                    error!(error = %e, "failed to persist chat");
                }
                bot
            }
            Err(e) => {
                warn!(error = %e, "completion failed");
                let bot = ChatMessage {
                    sender: Sender::Bot,
                    text: PROVIDER_ERROR.to_string(),
                    audio_lang: None,
                };
                self.messages.push(bot.clone());
                bot
            }
        };

        Some(bot)
    }

    async fn complete(&self, input: &str) -> Result<String, ArogyaError> {
        let mut processed = input.to_string();
        if self.language == Language::Gu
            && detect_gujarati_roman(input)
            && let Some(translator) = &self.translator
        {
            processed = translator.translate(input, "gu").await?;
        }

        let request = CompletionRequest {
            system_prompt: Some(system_prompt(self.language, self.category)),
            messages: vec![PromptMessage::user(processed)],
            model: None,
        };

        let reply = self.provider.complete(request).await?;
        Ok(reply.content)
    }

    /// Clears the transcript for a fresh conversation.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Replaces the transcript with a previously saved chat.
    pub fn open_chat(&mut self, chat: Chat) {
        self.messages = chat.messages;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn category(&self) -> HealthCategory {
        self.category
    }

    pub fn set_category(&mut self, category: HealthCategory) {
        self.category = category;
    }

    /// Lists the user's saved chats, newest first.
    pub async fn list_history(&self) -> Result<Vec<Chat>, ArogyaError> {
        self.history.list_chats(&self.email).await
    }

    /// Deletes one saved chat.
    pub async fn delete_from_history(&self, id: &str) -> Result<(), ArogyaError> {
        self.history.delete_chat(&self.email, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use arogya_core::traits::PluginAdapter;
    use arogya_core::types::{AdapterType, CompletionReply, derive_title};
    use arogya_core::HealthStatus;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct MockProvider {
        reply: Result<String, String>,
        calls: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("connection refused".to_string()),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PluginAdapter for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::Provider
        }
        async fn health_check(&self) -> Result<HealthStatus, ArogyaError> {
            Ok(HealthStatus::Healthy)
        }
        async fn shutdown(&self) -> Result<(), ArogyaError> {
            Ok(())
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionReply, ArogyaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(CompletionReply {
                    content: text.clone(),
                    model: Some("anthropic/claude-3-haiku".to_string()),
                }),
                Err(msg) => Err(ArogyaError::Provider {
                    message: msg.clone(),
                    source: None,
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingHistory {
        saved: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    }

    #[async_trait]
    impl HistoryStore for RecordingHistory {
        async fn save_chat(
            &self,
            email: &str,
            messages: &[ChatMessage],
        ) -> Result<Chat, ArogyaError> {
            self.saved
                .lock()
                .unwrap()
                .push((email.to_string(), messages.to_vec()));
            Ok(Chat {
                id: "c1".to_string(),
                user_email: email.to_string(),
                title: derive_title(messages),
                messages: messages.to_vec(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
            })
        }

        async fn list_chats(&self, _email: &str) -> Result<Vec<Chat>, ArogyaError> {
            Ok(Vec::new())
        }

        async fn delete_chat(&self, _email: &str, _id: &str) -> Result<(), ArogyaError> {
            Ok(())
        }
    }

    struct FailingHistory;

    #[async_trait]
    impl HistoryStore for FailingHistory {
        async fn save_chat(
            &self,
            _email: &str,
            _messages: &[ChatMessage],
        ) -> Result<Chat, ArogyaError> {
            Err(ArogyaError::Channel {
                message: "server unreachable".to_string(),
                source: None,
            })
        }

        async fn list_chats(&self, _email: &str) -> Result<Vec<Chat>, ArogyaError> {
            Ok(Vec::new())
        }

        async fn delete_chat(&self, _email: &str, _id: &str) -> Result<(), ArogyaError> {
            Ok(())
        }
    }

    fn session(
        provider: Arc<MockProvider>,
        history: Arc<dyn HistoryStore>,
        language: Language,
    ) -> ChatSession {
        ChatSession::new(
            provider,
            history,
            None,
            "asha@example.com".to_string(),
            language,
            HealthCategory::General,
        )
    }

    #[tokio::test]
    async fn whitespace_input_is_dropped_without_a_provider_call() {
        let provider = MockProvider::replying("• Rest well");
        let mut session = session(provider.clone(), Arc::new(RecordingHistory::default()), Language::En);

        assert!(session.send("").await.is_none());
        assert!(session.send("   \n\t").await.is_none());
        assert!(session.messages().is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn send_appends_user_and_bot_and_persists() {
        let provider = MockProvider::replying("• Rest well 💤");
        let history = Arc::new(RecordingHistory::default());
        let mut session = session(provider.clone(), history.clone(), Language::Hi);

        let bot = session.send("mujhe bukhar hai").await.unwrap();
        assert_eq!(bot.text, "• Rest well 💤");
        assert_eq!(bot.audio_lang.as_deref(), Some("hi-IN"));

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].sender, Sender::User);
        assert_eq!(session.messages()[1].sender, Sender::Bot);

        // The full transcript was persisted.
        let saved = history.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "asha@example.com");
        assert_eq!(saved[0].1.len(), 2);
    }

    #[tokio::test]
    async fn provider_sees_system_prompt_and_single_user_turn() {
        let provider = MockProvider::replying("ok");
        let mut session = session(provider.clone(), Arc::new(RecordingHistory::default()), Language::En);

        session.send("I have a headache").await.unwrap();
        session.send("it is getting worse").await.unwrap();

        let requests = provider.requests.lock().unwrap();
        // Each send carries only the latest user turn.
        assert_eq!(requests[1].messages.len(), 1);
        assert_eq!(requests[1].messages[0].content, "it is getting worse");
        let prompt = requests[1].system_prompt.as_deref().unwrap();
        assert!(prompt.contains("caring health assistant"));
        assert!(prompt.contains("General"));
    }

    #[tokio::test]
    async fn provider_failure_becomes_inline_error_message() {
        let provider = MockProvider::failing();
        let history = Arc::new(RecordingHistory::default());
        let mut session = session(provider, history.clone(), Language::En);

        let bot = session.send("I have a fever").await.unwrap();
        assert_eq!(bot.text, "❌ Error contacting OpenRouter.");
        assert!(bot.audio_lang.is_none());
        assert_eq!(session.messages().len(), 2);

        // Failed exchanges are not persisted.
        assert!(history.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_reply_becomes_no_reply_message() {
        let provider = MockProvider::replying("");
        let mut session = session(provider, Arc::new(RecordingHistory::default()), Language::En);

        let bot = session.send("I have a fever").await.unwrap();
        assert_eq!(bot.text, "❌ No reply received.");
    }

    #[tokio::test]
    async fn persistence_failure_is_swallowed() {
        let provider = MockProvider::replying("• Rest well");
        let mut session = session(provider, Arc::new(FailingHistory), Language::En);

        let bot = session.send("I have a fever").await.unwrap();
        assert_eq!(bot.text, "• Rest well");
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn romanized_gujarati_is_translated_before_the_provider_call() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            [["મને તાવ છે", "mane taap che", null]],
            null,
            "gu"
        ]);
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("tl", "gu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let provider = MockProvider::replying("આરામ કરો");
        let translator = Translator::new(server.uri()).unwrap();
        let mut session = ChatSession::new(
            provider.clone(),
            Arc::new(RecordingHistory::default()),
            Some(translator),
            "asha@example.com".to_string(),
            Language::Gu,
            HealthCategory::General,
        );

        let bot = session.send("mane taap che").await.unwrap();
        assert_eq!(bot.audio_lang.as_deref(), Some("en-IN"));

        // The provider received the translated text, while the transcript
        // keeps what the user actually typed.
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].messages[0].content, "મને તાવ છે");
        assert_eq!(session.messages()[0].text, "mane taap che");
    }

    #[tokio::test]
    async fn gujarati_script_input_skips_translation() {
        let provider = MockProvider::replying("આરામ કરો");
        // No translator configured; a detection hit would make complete()
        // skip translation silently, a non-hit never needs it.
        let mut session = session(provider.clone(), Arc::new(RecordingHistory::default()), Language::Gu);

        session.send("મને તાવ છે").await.unwrap();
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].messages[0].content, "મને તાવ છે");
    }

    #[tokio::test]
    async fn reset_and_open_chat_replace_the_transcript() {
        let provider = MockProvider::replying("ok");
        let mut session = session(provider, Arc::new(RecordingHistory::default()), Language::En);

        session.send("I have a fever").await.unwrap();
        assert_eq!(session.messages().len(), 2);

        session.reset();
        assert!(session.messages().is_empty());

        session.open_chat(Chat {
            id: "c1".to_string(),
            user_email: "asha@example.com".to_string(),
            title: "old".to_string(),
            messages: vec![ChatMessage::user("old message")],
            created_at: "2026-01-01T00:00:00Z".to_string(),
        });
        assert_eq!(session.messages().len(), 1);
    }
}
