//! RAG (Retrieval-Augmented Generation) for multi-turn questions about one video.
//!
//! Retrieval picks the transcript passages closest to the question, the
//! conversation log supplies earlier exchanges, and the answer engine puts
//! both in front of the completion service.

pub mod conversation;
mod engine;
mod retriever;

pub use conversation::{format_history, ConversationLog, HistoryEntry, Role, Turn};
pub use engine::{format_context_for_prompt, AnswerEngine, RagResponse};
pub use retriever::{Retriever, DEFAULT_TOP_K};
