use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::TargetLanguage;

pub const SYSTEM_PROMPT: &str =
    "You are a professional translator specializing in educational documents.";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Body of a chat-completion call, serialized as-is for OpenAI-compatible APIs.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A chat-completion service.
///
/// Implementations return the content of the first choice, untrimmed, and
/// classify failures as transient or permanent through
/// [`AppError::TranslationFailed`].
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<String>;
}

/// Sampling settings sent with every translation request.
#[derive(Debug, Clone)]
pub struct TranslationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl TranslationSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

pub fn translation_prompt(text: &str, language: TargetLanguage) -> String {
    format!(
        "You are a professional translator for educational documents.\n\
         \n\
         Translate the following text from English to {language}.\n\
         - Keep the meaning exact and accurate.\n\
         - Use clear and natural language suitable for university students.\n\
         - Maintain any academic or technical terms as precisely as possible.\n\
         - Do not add explanations, only output the translated text.\n\
         \n\
         Text to translate:\n\
         {text}",
        language = language.display_name(),
        text = text,
    )
}

#[derive(Clone)]
pub struct TranslationClient {
    backend: Arc<dyn TranslationBackend>,
    settings: TranslationSettings,
}

impl TranslationClient {
    pub fn new(backend: Arc<dyn TranslationBackend>, settings: TranslationSettings) -> Self {
        Self { backend, settings }
    }

    pub fn backend(&self) -> &dyn TranslationBackend {
        self.backend.as_ref()
    }

    pub fn request_for(&self, text: &str, language: TargetLanguage) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(translation_prompt(text, language)),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Translates `text` in a single call. Nothing is retried or chunked.
    pub async fn translate(&self, text: &str, language: TargetLanguage) -> AppResult<String> {
        if text.trim().is_empty() {
            return Err(AppError::EmptyTranslationInput);
        }

        let start = Instant::now();
        let request = self.request_for(text, language);
        debug!(
            backend = self.backend.name(),
            model = %request.model,
            language = %language,
            input_chars = text.len(),
            "Sending translation request"
        );

        let translated = match self.backend.complete(&request).await {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                warn!(
                    backend = self.backend.name(),
                    transient = e.is_transient(),
                    error = %e,
                    "Translation request failed"
                );
                return Err(e);
            }
        };

        info!(
            backend = self.backend.name(),
            language = %language,
            output_chars = translated.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Translation received"
        );
        Ok(translated)
    }
}
