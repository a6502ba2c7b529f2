//! Embedding service trait

use async_trait::async_trait;

use crate::Result;

/// Dimensionality of the embedding space the product index was built with
pub const EMBEDDING_DIMENSIONS: usize = 1536;

/// Trait for embedding services that convert text to dense vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimensionality of the vectors this embedder produces
    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }
}
