//! Pipeline orchestrator for TL;DW.
//!
//! Wires the collaborators together: transcript fetching, translation,
//! session creation and summaries.

use crate::completion::{CompletionService, OpenAICompletion};
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::Result;
use crate::session::{Session, SessionConfig};
use crate::source::{
    extract_video_id, RateLimitPolicy, RateLimitedSource, TranscriptSource,
    YoutubeTranscriptSource,
};
use crate::summary::Summarizer;
use crate::translation::{LlmTranslator, Translator};
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the TL;DW pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    source: Arc<dyn TranscriptSource>,
    translator: Arc<dyn Translator>,
    embedder: Arc<dyn Embedder>,
    completion: Arc<dyn CompletionService>,
}

impl Orchestrator {
    /// Create a new orchestrator backed by yt-dlp and OpenAI.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let source: Arc<dyn TranscriptSource> = Arc::new(RateLimitedSource::new(
            Arc::new(YoutubeTranscriptSource::new()),
            RateLimitPolicy::from(&settings.transcript),
        ));

        let completion: Arc<dyn CompletionService> =
            Arc::new(OpenAICompletion::from_settings(&settings.completion)?);

        let translator: Arc<dyn Translator> =
            Arc::new(LlmTranslator::new(completion.clone()).with_prompts(prompts.clone()));

        let embedder: Arc<dyn Embedder> =
            Arc::new(OpenAIEmbedder::from_settings(&settings.embedding)?);

        info!(
            "Using {} for answers and {} for embeddings",
            settings.completion.model, settings.embedding.model
        );

        Ok(Self::with_components(
            settings, prompts, source, translator, embedder, completion,
        ))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        source: Arc<dyn TranscriptSource>,
        translator: Arc<dyn Translator>,
        embedder: Arc<dyn Embedder>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            settings,
            prompts,
            source,
            translator,
            embedder,
            completion,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch the transcript for a video URL or id, translated when needed.
    ///
    /// Transcripts already in the target language are returned as fetched.
    #[instrument(skip(self))]
    pub async fn fetch_transcript(&self, input: &str, language: &str) -> Result<String> {
        let video_id = extract_video_id(input)?;
        let transcript = self.source.fetch(&video_id, language).await?;

        let target = &self.settings.translation.target_language;
        if language.eq_ignore_ascii_case(target) {
            return Ok(transcript);
        }

        info!("Translating transcript from {} to {}", language, target);
        self.translator.translate(&transcript, target).await
    }

    /// An empty session using this orchestrator's collaborators.
    pub fn new_session(&self) -> Result<Session> {
        Session::new(
            self.embedder.clone(),
            self.completion.clone(),
            SessionConfig::from_settings(&self.settings, self.prompts.clone()),
        )
    }

    /// A session with `transcript` already indexed.
    pub async fn build_session(&self, transcript: &str) -> Result<Session> {
        let mut session = self.new_session()?;
        session.build(transcript).await?;
        Ok(session)
    }

    /// Summarizer for topics and notes.
    pub fn summarizer(&self) -> Summarizer {
        Summarizer::new(self.completion.clone()).with_prompts(self.prompts.clone())
    }
}
