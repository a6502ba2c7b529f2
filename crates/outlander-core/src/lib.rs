//! Core traits and types for the Outlander copilot
//!
//! This crate defines the three service seams the RAG pipeline is built
//! against: text embedding, hybrid document search, and chat completion.
//! Keeping the traits here makes the pipeline test-friendly and keeps the
//! hosted-service clients swappable.

pub mod chat;
pub mod embed;
pub mod error;
pub mod search;

pub use chat::{ChatModel, ChatPrompt, ChatTurn, GenerationParams};
pub use embed::{EMBEDDING_DIMENSIONS, Embedder};
pub use error::{Error, Result};
pub use search::{HybridQuery, ProductDocument, Retrieval, RetrievalConfig, SearchIndex};
