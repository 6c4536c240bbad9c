//! TL;DW - Too Long; Didn't Watch
//!
//! A CLI tool for chatting with YouTube videos through their transcripts.
//!
//! # Overview
//!
//! TL;DW allows you to:
//! - Fetch a video's captions and translate them when they are not in English
//! - Split the transcript into overlapping passages and embed them
//! - Ask follow-up questions answered only from the video and the chat so far
//! - Generate the key topics and detailed notes for a video
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `source` - Transcript fetching (yt-dlp) with rate limiting
//! - `translation` - LLM translation of transcripts
//! - `chunking` - Boundary-aware overlapping passages
//! - `embedding` - Embedding generation
//! - `index` - In-memory vector index
//! - `rag` - Retrieval, conversation history and answers
//! - `session` - Per-video conversation state
//! - `summary` - Topics and notes
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use tldw::config::Settings;
//! use tldw::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let transcript = orchestrator.fetch_transcript("dQw4w9WgXcQ", "en").await?;
//!     let mut session = orchestrator.build_session(&transcript).await?;
//!
//!     let response = session.ask("What is this video about?").await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod completion;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod session;
pub mod source;
pub mod summary;
pub mod translation;

#[cfg(test)]
mod testing;

pub use error::{Result, TldwError};
