//! Two-stage orchestrator chaining retrieval into response

use serde::{Deserialize, Serialize};

use outlander_core::{ChatModel, ChatTurn, Embedder, Result, SearchIndex};

use crate::{Responder, Retriever};

/// One full round trip through the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub context: String,
    pub answer: String,
}

/// The two-stage RAG pipeline: retrieve, then respond
pub struct Copilot<E: Embedder, S: SearchIndex, C: ChatModel> {
    retriever: Retriever<E, S>,
    responder: Responder<C>,
}

impl<E: Embedder, S: SearchIndex, C: ChatModel> Copilot<E, S, C> {
    pub fn new(retriever: Retriever<E, S>, responder: Responder<C>) -> Self {
        Self {
            retriever,
            responder,
        }
    }

    /// Answer a question, feeding the retrieved catalog context into
    /// generation
    pub async fn answer(&self, question: &str, history: &[ChatTurn]) -> Result<String> {
        Ok(self.answer_with_context(question, history).await?.answer)
    }

    /// Same flow as `answer`, additionally surfacing the retrieved context
    pub async fn answer_with_context(
        &self,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<Exchange> {
        let retrieval = self.retriever.retrieve(question).await?;
        let answer = self
            .responder
            .respond(question, &retrieval.context, history)
            .await?;

        Ok(Exchange {
            question: question.to_string(),
            context: retrieval.context,
            answer,
        })
    }
}
