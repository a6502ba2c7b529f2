//! Chat model trait and conversation types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// One prior (question, answer) exchange in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

/// Fully assembled prompt for one generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPrompt {
    pub system: String,
    pub history: Vec<ChatTurn>,
    pub question: String,
}

/// Sampling parameters for generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 800,
            temperature: 0.7,
        }
    }
}

/// Trait for chat completion services
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate an answer for the prompt. Message order is the system
    /// instruction first, the history in order, then the question.
    async fn complete(&self, prompt: &ChatPrompt, params: &GenerationParams) -> Result<String>;
}
