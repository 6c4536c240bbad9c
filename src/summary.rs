//! One-shot transcript summaries: key topics and study notes.

use crate::completion::CompletionService;
use crate::config::Prompts;
use crate::error::{Result, TldwError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Generates topic lists and notes from a whole transcript.
pub struct Summarizer {
    completion: Arc<dyn CompletionService>,
    prompts: Prompts,
}

impl Summarizer {
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

    /// The five most important topics, as a numbered list.
    #[instrument(skip(self, transcript))]
    pub async fn topics(&self, transcript: &str) -> Result<String> {
        info!("Extracting key topics");
        self.run(&self.prompts.summary.topics, transcript).await
    }

    /// Bulleted notes grouped into sections.
    #[instrument(skip(self, transcript))]
    pub async fn notes(&self, transcript: &str) -> Result<String> {
        info!("Generating notes");
        self.run(&self.prompts.summary.notes, transcript).await
    }

    async fn run(&self, template: &str, transcript: &str) -> Result<String> {
        if transcript.trim().is_empty() {
            return Err(TldwError::InvalidInput(
                "Cannot summarize an empty transcript".to_string(),
            ));
        }

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        let prompt = self.prompts.render_with_custom(template, &vars);

        self.completion.complete(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedCompletion};

    #[tokio::test]
    async fn test_topics_and_notes_use_distinct_prompts() {
        let completion = Arc::new(ScriptedCompletion::fixed("1. Cats"));
        let summarizer = Summarizer::new(completion.clone());

        summarizer.topics("Cats are mammals.").await.unwrap();
        summarizer.notes("Cats are mammals.").await.unwrap();

        let prompts = completion.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("5 most important topics"));
        assert!(prompts[1].contains("note-taker"));
        assert!(prompts.iter().all(|p| p.contains("Cats are mammals.")));
    }

    #[tokio::test]
    async fn test_completion_error_propagates() {
        let summarizer = Summarizer::new(Arc::new(ScriptedCompletion::new(Reply::Fail)));
        let err = summarizer.notes("Some transcript").await.unwrap_err();
        assert!(matches!(err, TldwError::CompletionService(_)));
    }

    #[tokio::test]
    async fn test_empty_transcript_rejected() {
        let summarizer = Summarizer::new(Arc::new(ScriptedCompletion::fixed("unused")));
        let err = summarizer.topics("").await.unwrap_err();
        assert!(matches!(err, TldwError::InvalidInput(_)));
    }
}
