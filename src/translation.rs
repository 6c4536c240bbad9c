//! Transcript translation.

use crate::completion::CompletionService;
use crate::config::Prompts;
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Trait for translation services.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}

/// Translator that prompts a completion service.
pub struct LlmTranslator {
    completion: Arc<dyn CompletionService>,
    prompts: Prompts,
}

impl LlmTranslator {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(TldwError::InvalidInput(
                "Cannot translate an empty transcript".to_string(),
            ));
        }

        info!("Translating transcript into {}", target_language);

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), text.to_string());
        vars.insert("target_language".to_string(), language_name(target_language).to_string());
        let prompt = self.prompts.render_with_custom(&self.prompts.translation.user, &vars);

        let translated = self
            .completion
            .complete(&prompt)
            .await
            .map_err(|e| TldwError::TranslationFailure(e.to_string()))?;

        if translated.trim().is_empty() {
            return Err(TldwError::TranslationFailure(
                "Translation came back empty".to_string(),
            ));
        }

        Ok(translated)
    }
}

/// English name for common language codes, falling back to the code itself.
fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "hi" => "Hindi",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "pt" => "Portuguese",
        "it" => "Italian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese",
        "ru" => "Russian",
        "ar" => "Arabic",
        other => other,
    }
}
