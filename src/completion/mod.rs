//! Text completion service used for answers, translation and summaries.

mod openai;

pub use openai::OpenAICompletion;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for single-prompt text completion.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Complete a prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
