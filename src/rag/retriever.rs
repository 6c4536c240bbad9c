//! Query-time passage retrieval.

use crate::embedding::Embedder;
use crate::error::{Result, TldwError};
use crate::index::{ScoredPassage, VectorIndex};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Passages retrieved per question unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 4;

/// Finds the passages most similar to a query.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    /// Create a new retriever.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the number of passages returned by [`Retriever::retrieve`].
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Search with the configured `top_k`.
    pub async fn retrieve(&self, index: &VectorIndex, query: &str) -> Result<Vec<ScoredPassage>> {
        self.search(index, query, self.top_k).await
    }

    /// Return up to `k` passages, most similar first.
    ///
    /// An empty index or `k == 0` yields no passages without calling the
    /// embedder.
    #[instrument(skip(self, index, query), fields(k = k, passages = index.len()))]
    pub async fn search(
        &self,
        index: &VectorIndex,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredPassage>> {
        if k == 0 || index.is_empty() {
            return Ok(Vec::new());
        }

        if index.model() != self.embedder.model() {
            return Err(TldwError::EmbeddingService(format!(
                "Index was built with {} but queries use {}",
                index.model(),
                self.embedder.model()
            )));
        }

        let query_embedding = self.embedder.embed(query).await?;
        let results = index.search(&query_embedding, k);

        debug!(
            "Retrieved {} passages (best score {:.3})",
            results.len(),
            results.first().map(|r| r.score).unwrap_or(0.0)
        );
        Ok(results)
    }
}
