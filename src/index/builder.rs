//! Builds a [`VectorIndex`] from passages.

use super::{IndexedPassage, VectorIndex};
use crate::chunking::Passage;
use crate::embedding::Embedder;
use crate::error::{Result, TldwError};
use std::sync::Arc;
use tracing::{info, instrument};

/// Embeds passages and assembles them into an index.
pub struct IndexBuilder {
    embedder: Arc<dyn Embedder>,
}

impl IndexBuilder {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Embed every passage and build the index.
    ///
    /// Any embedding failure aborts the whole build; no partial index is
    /// ever returned.
    #[instrument(skip(self, passages), fields(passages = passages.len(), model = %self.embedder.model()))]
    pub async fn build(&self, passages: Vec<Passage>) -> Result<VectorIndex> {
        let dimensions = self.embedder.dimensions();
        let texts: Vec<String> = passages.iter().map(|p| p.content.clone()).collect();

        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| match e {
            TldwError::EmbeddingService(_) => e,
            other => TldwError::EmbeddingService(other.to_string()),
        })?;

        if embeddings.len() != passages.len() {
            return Err(TldwError::EmbeddingService(format!(
                "Expected {} embeddings, got {}",
                passages.len(),
                embeddings.len()
            )));
        }

        if let Some(bad) = embeddings.iter().find(|e| e.len() != dimensions) {
            return Err(TldwError::EmbeddingService(format!(
                "Embedding has {} dimensions, model {} declares {}",
                bad.len(),
                self.embedder.model(),
                dimensions
            )));
        }

        let entries: Vec<IndexedPassage> = passages
            .into_iter()
            .zip(embeddings)
            .map(|(passage, embedding)| IndexedPassage { passage, embedding })
            .collect();

        info!("Indexed {} passages", entries.len());
        Ok(VectorIndex::new(self.embedder.model(), dimensions, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::chunk;
    use crate::testing::HashEmbedder;

    #[tokio::test]
    async fn test_build_index() {
        let embedder = Arc::new(HashEmbedder::new("hash-v1"));
        let passages = chunk("Cats are mammals. Dogs are mammals too.", 20, 5).unwrap();
        let count = passages.len();

        let index = IndexBuilder::new(embedder.clone()).build(passages).await.unwrap();

        assert_eq!(index.len(), count);
        assert_eq!(index.model(), "hash-v1");
        assert_eq!(index.dimensions(), embedder.dimensions());
        let orders: Vec<_> = index.passages().map(|p| p.order).collect();
        assert_eq!(orders, (0..count).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_build_fails_fast() {
        let embedder = Arc::new(HashEmbedder::new("hash-v1").failing());
        let passages = chunk("Some text that will be split. More text here.", 20, 2).unwrap();

        let result = IndexBuilder::new(embedder).build(passages).await;
        tokio_test::assert_err!(result.as_ref());
        assert!(matches!(result, Err(TldwError::EmbeddingService(_))));
    }

    #[tokio::test]
    async fn test_build_rejects_short_batch() {
        let embedder = Arc::new(HashEmbedder::new("hash-v1").dropping_last());
        let passages = chunk("Some text that will be split. More text here.", 20, 2).unwrap();

        let result = IndexBuilder::new(embedder).build(passages).await;
        assert!(matches!(result, Err(TldwError::EmbeddingService(_))));
    }

    #[tokio::test]
    async fn test_build_empty() {
        let embedder = Arc::new(HashEmbedder::new("hash-v1"));
        let index = IndexBuilder::new(embedder).build(Vec::new()).await.unwrap();
        assert!(index.is_empty());
    }
}
