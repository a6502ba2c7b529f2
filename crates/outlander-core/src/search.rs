//! Hybrid search trait and retrieval types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A catalog entry as returned by the document index.
///
/// Category and price are optional on the wire. The precomputed embedding
/// vector stays in the backing index and is never shipped back with results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub price: Option<String>,
    /// Backend relevance score, captured for diagnostics
    pub score: Option<f32>,
}

/// One combined vector + keyword query against the document index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridQuery {
    pub text: String,
    pub vector: Vec<f32>,
    pub top: usize,
}

/// Fixed retrieval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum number of documents to retrieve
    pub top_k: usize,
    /// Per-document content cap, in characters
    pub max_content_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_content_chars: 800,
        }
    }
}

/// Result of one retrieval: the matched documents and the context string
/// derived from them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retrieval {
    pub documents: Vec<ProductDocument>,
    pub context: String,
}

/// Trait for hybrid (vector + keyword) document indexes
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Run one ranked query, returning at most `query.top` documents in
    /// descending backend relevance order
    async fn query(&self, query: &HybridQuery) -> Result<Vec<ProductDocument>>;
}
