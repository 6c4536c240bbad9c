//! Conversation sessions over a single transcript.
//!
//! A session owns one vector index and one conversation log. Both are
//! mutated only through `&mut Session`, so chunking, indexing and each
//! question/answer cycle of a session run one at a time.

use crate::chunking::{ChunkingConfig, TextSplitter};
use crate::completion::CompletionService;
use crate::config::{Prompts, Settings};
use crate::embedding::Embedder;
use crate::error::{Result, TldwError};
use crate::index::{IndexBuilder, VectorIndex};
use crate::rag::{AnswerEngine, ConversationLog, HistoryEntry, RagResponse, DEFAULT_TOP_K};
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing indexed yet, or the last build failed.
    NoTranscript,
    /// Chunking and embedding a transcript.
    Indexing,
    /// Index available; questions can be asked.
    Ready,
    /// A question is being answered.
    Answering,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NoTranscript => write!(f, "no transcript"),
            SessionState::Indexing => write!(f, "indexing"),
            SessionState::Ready => write!(f, "ready"),
            SessionState::Answering => write!(f, "answering"),
        }
    }
}

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub chunking: ChunkingConfig,
    pub top_k: usize,
    pub prompts: Prompts,
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings, prompts: Prompts) -> Self {
        Self {
            chunking: ChunkingConfig::from(&settings.chunking),
            top_k: settings.retrieval.top_k,
            prompts,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            top_k: DEFAULT_TOP_K,
            prompts: Prompts::default(),
        }
    }
}

/// A chat about one video.
pub struct Session {
    id: Uuid,
    splitter: TextSplitter,
    builder: IndexBuilder,
    engine: AnswerEngine,
    index: Option<VectorIndex>,
    log: ConversationLog,
    state: SessionState,
}

impl Session {
    /// Create an empty session. Nothing is indexed until [`Session::build`].
    pub fn new(
        embedder: Arc<dyn Embedder>,
        completion: Arc<dyn CompletionService>,
        config: SessionConfig,
    ) -> Result<Self> {
        let splitter = TextSplitter::new(config.chunking)?;
        let builder = IndexBuilder::new(embedder.clone());
        let engine = AnswerEngine::new(embedder, completion)
            .with_top_k(config.top_k)
            .with_prompts(config.prompts);

        Ok(Self {
            id: Uuid::new_v4(),
            splitter,
            builder,
            engine,
            index: None,
            log: ConversationLog::new(),
            state: SessionState::NoTranscript,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn index(&self) -> Option<&VectorIndex> {
        self.index.as_ref()
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn paired_history(&self) -> Vec<HistoryEntry> {
        self.log.paired_history()
    }

    /// Forget the conversation but keep the index.
    pub fn clear_history(&mut self) {
        self.log.clear();
    }

    /// Chunk and index `transcript`, replacing any previous index.
    ///
    /// The conversation is cleared first, so questions never carry context
    /// over from an earlier video. On failure, or if the returned future is
    /// dropped before completing, the session is left without an index.
    /// Returns the number of indexed passages.
    #[instrument(skip(self, transcript), fields(session = %self.id, chars = transcript.len()))]
    pub async fn build(&mut self, transcript: &str) -> Result<usize> {
        if transcript.trim().is_empty() {
            return Err(TldwError::InvalidInput("Transcript is empty".to_string()));
        }

        self.log.clear();
        self.index = None;

        let splitter = &self.splitter;
        let builder = &self.builder;
        let mut state = StateGuard::enter(
            &mut self.state,
            SessionState::Indexing,
            SessionState::NoTranscript,
        );

        let result = match splitter.split(transcript) {
            Ok(passages) => builder.build(passages).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(index) => {
                let passages = index.len();
                info!("Session ready with {} passages", passages);
                self.index = Some(index);
                state.exit_with(SessionState::Ready);
                Ok(passages)
            }
            Err(e) => {
                warn!("Indexing failed: {}", e);
                Err(e)
            }
        }
    }

    /// Ask a question about the indexed transcript.
    ///
    /// The session is back in `Ready` afterwards whether the answer
    /// succeeds, fails or is cancelled.
    #[instrument(skip(self, question), fields(session = %self.id))]
    pub async fn ask(&mut self, question: &str) -> Result<RagResponse> {
        let index = match (self.state, self.index.as_ref()) {
            (SessionState::Ready, Some(index)) => index,
            _ => {
                return Err(TldwError::InvalidInput(format!(
                    "Session is not ready for questions (state: {})",
                    self.state
                )))
            }
        };

        let _state = StateGuard::enter(
            &mut self.state,
            SessionState::Answering,
            SessionState::Ready,
        );
        self.engine.answer(question, index, &mut self.log).await
    }
}

/// Holds a transient state and writes the exit state back when dropped,
/// including when the owning future is cancelled.
struct StateGuard<'a> {
    state: &'a mut SessionState,
    exit: SessionState,
}

impl<'a> StateGuard<'a> {
    fn enter(state: &'a mut SessionState, during: SessionState, exit: SessionState) -> Self {
        *state = during;
        Self { state, exit }
    }

    fn exit_with(&mut self, exit: SessionState) {
        self.exit = exit;
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        *self.state = self.exit;
    }
}
