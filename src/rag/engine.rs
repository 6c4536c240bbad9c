//! Grounded answer generation.

use super::conversation::{format_history, ConversationLog, Role};
use super::Retriever;
use crate::completion::CompletionService;
use crate::config::Prompts;
use crate::embedding::Embedder;
use crate::error::{Result, TldwError};
use crate::index::{ScoredPassage, VectorIndex};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// RAG engine answering questions about one indexed transcript.
pub struct AnswerEngine {
    completion: Arc<dyn CompletionService>,
    retriever: Retriever,
    prompts: Prompts,
}

impl AnswerEngine {
    /// Create a new answer engine.
    pub fn new(embedder: Arc<dyn Embedder>, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            retriever: Retriever::new(embedder),
            prompts: Prompts::default(),
        }
    }

    /// Set the number of passages retrieved per question.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.retriever = self.retriever.with_top_k(top_k);
        self
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Sentence the model is told to answer with when it cannot ground an answer.
    pub fn fallback(&self) -> &str {
        &self.prompts.rag.fallback
    }

    /// Answer `question` from `index` and the conversation so far.
    ///
    /// The question and answer are appended to `log` only after the
    /// completion succeeds; a failed exchange leaves the log untouched.
    #[instrument(skip(self, index, log), fields(question = %question, history = log.len()))]
    pub async fn answer(
        &self,
        question: &str,
        index: &VectorIndex,
        log: &mut ConversationLog,
    ) -> Result<RagResponse> {
        if question.trim().is_empty() {
            return Err(TldwError::InvalidInput("Question is empty".to_string()));
        }

        info!("Processing question: {}", question);

        let sources = self.retriever.retrieve(index, question).await?;
        let history = format_history(&log.paired_history());
        let prompt = self.build_prompt(&sources, &history, question);

        let answer = self.completion.complete(&prompt).await?;

        debug!("Generated answer from {} passages", sources.len());

        log.append(Role::User, question);
        log.append(Role::Assistant, answer.clone());

        Ok(RagResponse { answer, sources })
    }

    fn build_prompt(&self, sources: &[ScoredPassage], history: &str, question: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), format_context_for_prompt(sources));
        vars.insert("history".to_string(), history.to_string());
        vars.insert("question".to_string(), question.to_string());
        vars.insert("fallback".to_string(), self.prompts.rag.fallback.clone());

        self.prompts.render_with_custom(&self.prompts.rag.answer, &vars)
    }
}

/// Passage texts in retrieval order, one per line.
pub fn format_context_for_prompt(sources: &[ScoredPassage]) -> String {
    sources
        .iter()
        .map(|s| s.passage.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// An answer with the passages it was grounded on.
#[derive(Debug, Clone)]
pub struct RagResponse {
    /// The generated answer.
    pub answer: String,
    /// Passages retrieved for the question, most similar first.
    pub sources: Vec<ScoredPassage>,
}
