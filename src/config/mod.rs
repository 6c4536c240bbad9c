//! Configuration module for TL;DW.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RagPrompts, SummaryPrompts, TranslationPrompts, FALLBACK_ANSWER};
pub use settings::{
    ChunkingSettings, CompletionSettings, EmbeddingSettings, GeneralSettings, PromptSettings,
    RetrievalSettings, Settings, TranscriptSettings, TranslationSettings,
};
