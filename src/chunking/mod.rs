//! Transcript chunking into overlapping, size-bounded passages.
//!
//! Passages are the retrieval unit: each one is embedded and indexed on its own.

mod splitter;

pub use splitter::TextSplitter;

use crate::config::ChunkingSettings;
use crate::error::{Result, TldwError};
use serde::{Deserialize, Serialize};

/// A contiguous slice of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Text content of this passage.
    pub content: String,
    /// Offset of the first character in the transcript (in characters).
    pub start: usize,
    /// Offset one past the last character (in characters).
    pub end: usize,
    /// Position of this passage in the transcript.
    pub order: usize,
}

impl Passage {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum passage length in characters.
    pub max_chars: usize,
    /// Characters repeated at the start of each passage from the end of the previous one.
    pub overlap: usize,
}

impl ChunkingConfig {
    pub fn new(max_chars: usize, overlap: usize) -> Self {
        Self { max_chars, overlap }
    }

    /// Reject configurations that cannot make forward progress.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(TldwError::InvalidInput(
                "Chunk size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.max_chars {
            return Err(TldwError::InvalidInput(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                self.overlap, self.max_chars
            )));
        }
        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: 10_000,
            overlap: 1_000,
        }
    }
}

impl From<&ChunkingSettings> for ChunkingConfig {
    fn from(settings: &ChunkingSettings) -> Self {
        Self::new(settings.max_chars, settings.overlap)
    }
}

/// Split `text` into passages of at most `max_size` characters overlapping by `overlap`.
pub fn chunk(text: &str, max_size: usize, overlap: usize) -> Result<Vec<Passage>> {
    TextSplitter::new(ChunkingConfig::new(max_size, overlap))?.split(text)
}
