//! In-memory vector index over transcript passages.
//!
//! An index is built once per transcript and never updated; indexing a new
//! transcript produces a new index.

mod builder;

pub use builder::IndexBuilder;

use crate::chunking::Passage;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A passage with its embedding vector.
#[derive(Debug, Clone)]
pub struct IndexedPassage {
    pub passage: Passage,
    pub embedding: Vec<f32>,
}

/// A passage matched by a search, with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredPassage {
    /// The matched passage.
    pub passage: Passage,
    /// Cosine similarity (higher is better).
    pub score: f32,
}

/// Passages and their embeddings, all produced by one embedding model.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    id: Uuid,
    model: String,
    dimensions: usize,
    entries: Vec<IndexedPassage>,
    built_at: DateTime<Utc>,
}

impl VectorIndex {
    /// Create an index from already embedded passages.
    ///
    /// Callers are responsible for every embedding coming from `model`;
    /// [`IndexBuilder`] is the normal way to construct one.
    pub fn new(model: impl Into<String>, dimensions: usize, entries: Vec<IndexedPassage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: model.into(),
            dimensions,
            entries,
            built_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Embedding model used for every vector in the index.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Passages in insertion order.
    pub fn passages(&self) -> impl Iterator<Item = &Passage> {
        self.entries.iter().map(|e| &e.passage)
    }

    /// Exact nearest-neighbour search by cosine similarity.
    ///
    /// Results are in non-increasing score order; equal scores keep
    /// insertion order.
    pub fn search(&self, query_embedding: &[f32], limit: usize) -> Vec<ScoredPassage> {
        if limit == 0 {
            return Vec::new();
        }

        let mut results: Vec<ScoredPassage> = self
            .entries
            .iter()
            .map(|entry| ScoredPassage {
                passage: entry.passage.clone(),
                score: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        // sort_by is stable, which gives the insertion-order tie break
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);
        results
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
