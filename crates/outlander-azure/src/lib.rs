//! Azure service clients for the Outlander copilot
//!
//! REST implementations of the three service traits: Azure OpenAI embeddings,
//! Azure AI Search hybrid queries, and Azure OpenAI chat completions.

mod chat;
mod config;
mod embeddings;
mod search;


pub use chat::ChatClient;
pub use config::{AzureConfig, OpenAiConfig, SearchConfig};
pub use embeddings::EmbeddingsClient;
pub use search::SearchClient;

// Re-export core types for convenience
pub use outlander_core::{ChatModel, Embedder, Error, Result, SearchIndex};

use std::time::Duration;

/// Build the HTTP client shared by the three service clients
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))
}
