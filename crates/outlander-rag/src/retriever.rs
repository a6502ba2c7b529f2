//! Retrieval stage: embed the query and run one hybrid search

use outlander_core::{
    Embedder, Error, HybridQuery, ProductDocument, Result, Retrieval, RetrievalConfig, SearchIndex,
};

/// Retrieval stage of the pipeline
pub struct Retriever<E: Embedder, S: SearchIndex> {
    embedder: E,
    index: S,
    config: RetrievalConfig,
}

impl<E: Embedder, S: SearchIndex> Retriever<E, S> {
    pub fn new(embedder: E, index: S) -> Self {
        Self {
            embedder,
            index,
            config: RetrievalConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    /// Embed the query, run one hybrid search, and format the matches into a
    /// context block. Zero matches yield an empty context, not an error.
    pub async fn retrieve(&self, query: &str) -> Result<Retrieval> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("query must not be empty".to_string()));
        }

        let vector = self.embedder.embed(query).await?;
        if vector.len() != self.embedder.dimensions() {
            return Err(Error::Embedding(format!(
                "expected a {}-dimensional embedding, got {}",
                self.embedder.dimensions(),
                vector.len()
            )));
        }

        let documents = self
            .index
            .query(&HybridQuery {
                text: query.to_string(),
                vector,
                top: self.config.top_k,
            })
            .await?;

        let context = self.build_context(&documents);
        Ok(Retrieval { documents, context })
    }

    /// Format documents into the context fed to the responder, one block per
    /// document in backend relevance order
    pub fn build_context(&self, documents: &[ProductDocument]) -> String {
        format_context(documents, self.config.max_content_chars)
    }
}

pub(crate) fn format_context(documents: &[ProductDocument], max_content_chars: usize) -> String {
    let blocks: Vec<String> = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| format_document(i + 1, doc, max_content_chars))
        .collect();
    blocks.join("\n")
}

fn format_document(position: usize, doc: &ProductDocument, max_content_chars: usize) -> String {
    let mut block = format!("## Product {}: {}\n", position, doc.title);
    if let Some(category) = doc.category.as_deref().filter(|c| !c.is_empty()) {
        block.push_str(&format!("**Category:** {category}\n"));
    }
    if let Some(price) = doc.price.as_deref().filter(|p| !p.is_empty()) {
        block.push_str(&format!("**Price:** {price}\n"));
    }
    block.push('\n');
    block.push_str(truncate_chars(&doc.content, max_content_chars));
    block.push('\n');
    block
}

/// Cut `text` to at most `max` characters, on a character boundary
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
