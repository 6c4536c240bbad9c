//! Deterministic stand-ins for the external services, used by unit tests.

use crate::completion::CompletionService;
use crate::config::FALLBACK_ANSWER;
use crate::embedding::Embedder;
use crate::error::{Result, TldwError};
use crate::source::TranscriptSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const HASH_DIMENSIONS: usize = 256;

/// Hashed bag-of-words embedder.
///
/// Texts sharing words get similar vectors, which is enough to make
/// retrieval results predictable in tests.
pub struct HashEmbedder {
    model: String,
    fail: bool,
    drop_last: bool,
    hang: bool,
    calls: AtomicUsize,
}

impl HashEmbedder {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            fail: false,
            drop_last: false,
            hang: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call returns an error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Batches come back one embedding short.
    pub fn dropping_last(mut self) -> Self {
        self.drop_last = true;
        self
    }

    /// Batch calls never complete.
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    /// Number of embed/embed_batch calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vectorize(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; HASH_DIMENSIONS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            // FNV-1a
            let mut hash: u64 = 0xcbf29ce484222325;
            for byte in word.bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(0x100000001b3);
            }
            vector[(hash % HASH_DIMENSIONS as u64) as usize] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TldwError::EmbeddingService("stub embedder failure".to_string()));
        }
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            return std::future::pending().await;
        }
        if self.fail {
            return Err(TldwError::EmbeddingService("stub embedder failure".to_string()));
        }
        let mut vectors: Vec<Vec<f32>> = texts.iter().map(|t| Self::vectorize(t)).collect();
        if self.drop_last {
            vectors.pop();
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        HASH_DIMENSIONS
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// How [`ScriptedCompletion`] replies.
pub enum Reply {
    /// Always return this text.
    Fixed(String),
    /// Always fail.
    Fail,
    /// Never complete.
    Hang,
    /// Follow the grounding instruction: fall back when the prompt carries
    /// neither context nor history, otherwise quote the first context line.
    Grounded,
}

/// Completion service that records prompts and replies from a script.
pub struct ScriptedCompletion {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(text: &str) -> Self {
        Self::new(Reply::Fixed(text.to_string()))
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    fn section<'a>(prompt: &'a str, header: &str) -> &'a str {
        prompt
            .split(header)
            .nth(1)
            .and_then(|rest| rest.split("======").next())
            .unwrap_or("")
            .trim()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Fail => Err(TldwError::CompletionService("stub completion failure".to_string())),
            Reply::Hang => std::future::pending().await,
            Reply::Grounded => {
                let context = Self::section(prompt, "Retrieved Video Context ======");
                let history = Self::section(prompt, "Chat History ======");
                if context.is_empty() && history.is_empty() {
                    Ok(FALLBACK_ANSWER.to_string())
                } else {
                    let first = context.lines().next().unwrap_or(history);
                    Ok(format!("From the video: {}", first))
                }
            }
        }
    }
}

/// Transcript source serving fixed transcripts keyed by (video id, language).
#[derive(Default)]
pub struct StaticSource {
    transcripts: HashMap<(String, String), String>,
    calls: AtomicUsize,
    transient_failures: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(mut self, video_id: &str, language: &str, text: &str) -> Self {
        self.transcripts
            .insert((video_id.to_string(), language.to_string()), text.to_string());
        self
    }

    /// Fail the next `count` fetches with a transient error.
    pub fn with_transient_failures(self, count: usize) -> Self {
        self.transient_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptSource for StaticSource {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(TldwError::ToolFailed("simulated network hiccup".to_string()));
        }

        self.transcripts
            .get(&(video_id.to_string(), language.to_string()))
            .cloned()
            .ok_or_else(|| {
                TldwError::TranscriptUnavailable(format!(
                    "No {} captions for video {}",
                    language, video_id
                ))
            })
    }
}
