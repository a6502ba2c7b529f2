//! RAG pipeline for the Outlander copilot
//!
//! Chains the retrieval stage (embed the query, run one hybrid search) into
//! the response stage (context-bound chat completion). Control flow is
//! strictly linear; the retrieved context string is the only thing passed
//! between the stages.

mod copilot;
mod responder;
mod retriever;

#[cfg(test)]
mod tests;

pub use copilot::{Copilot, Exchange};
pub use responder::Responder;
pub use retriever::Retriever;

// Re-export core types for convenience
pub use outlander_core::{
    ChatModel, ChatPrompt, ChatTurn, Embedder, Error, GenerationParams, HybridQuery,
    ProductDocument, Result, Retrieval, RetrievalConfig, SearchIndex,
};
