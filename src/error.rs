//! Error types for TL;DW.

use thiserror::Error;

/// Library-level error type for TL;DW operations.
#[derive(Error, Debug)]
pub enum TldwError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Translation failed: {0}")]
    TranslationFailure(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Completion service error: {0}")]
    CompletionService(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),
}

impl TldwError {
    /// Whether retrying the same request may succeed.
    ///
    /// Only transport-level failures qualify. Missing captions, bad input
    /// and service rejections are returned to the caller as-is.
    pub fn is_transient(&self) -> bool {
        matches!(self, TldwError::Http(_) | TldwError::ToolFailed(_))
    }
}

/// Result type alias for TL;DW operations.
pub type Result<T> = std::result::Result<T, TldwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(TldwError::ToolFailed("yt-dlp exited with 1".to_string()).is_transient());
        assert!(!TldwError::TranscriptUnavailable("no captions".to_string()).is_transient());
        assert!(!TldwError::InvalidInput("bad id".to_string()).is_transient());
        assert!(!TldwError::CompletionService("quota".to_string()).is_transient());
    }
}
