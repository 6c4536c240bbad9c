//! OpenAI chat completion implementation.

use super::CompletionService;
use crate::config::CompletionSettings;
use crate::error::{Result, TldwError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Completion service backed by the OpenAI chat API.
pub struct OpenAICompletion {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAICompletion {
    pub fn new() -> Result<Self> {
        Self::with_model("gpt-4o-mini", 0.2)
    }

    pub fn with_model(model: &str, temperature: f32) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: model.to_string(),
            temperature,
        })
    }

    pub fn from_settings(settings: &CompletionSettings) -> Result<Self> {
        Self::with_model(&settings.model, settings.temperature)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionService for OpenAICompletion {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| TldwError::CompletionService(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| TldwError::CompletionService(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            TldwError::CompletionService(format!("Failed to generate response: {}", e))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| TldwError::CompletionService("Empty response from LLM".to_string()))?
            .clone();

        debug!("Completion returned {} characters", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_from_settings() {
        let settings = CompletionSettings {
            model: "gpt-4.1".to_string(),
            temperature: 0.5,
        };
        let completion = OpenAICompletion::from_settings(&settings).unwrap();
        assert_eq!(completion.model(), "gpt-4.1");
    }
}
