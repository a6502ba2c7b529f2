//! Response stage: prompt the chat model with the retrieved context

use outlander_core::{ChatModel, ChatPrompt, ChatTurn, Error, GenerationParams, Result};

/// Response stage of the pipeline
pub struct Responder<C: ChatModel> {
    model: C,
    params: GenerationParams,
}

impl<C: ChatModel> Responder<C> {
    pub fn new(model: C) -> Self {
        Self {
            model,
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Ask the model to answer from the supplied context, carrying the
    /// conversation history through for continuity
    pub async fn respond(
        &self,
        question: &str,
        context: &str,
        history: &[ChatTurn],
    ) -> Result<String> {
        let prompt = ChatPrompt {
            system: system_message(context),
            history: history.to_vec(),
            question: question.to_string(),
        };

        let answer = self.model.complete(&prompt, &self.params).await?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(Error::Generation(
                "model returned an empty answer".to_string(),
            ));
        }
        Ok(answer.to_string())
    }
}

/// System instruction binding the model to the retrieved context. The context
/// is embedded verbatim; with an empty context the instruction makes the
/// model decline instead of inventing product facts.
pub(crate) fn system_message(context: &str) -> String {
    format!(
        "You are an AI assistant for Outlander Gear Co., a company that sells high-quality outdoor equipment.\n\
         Your role is to help customers find product information, compare products, and answer questions about pricing, features, warranties, and specifications.\n\n\
         Be helpful, friendly, and accurate. Base your responses ONLY on the product information provided in the context below.\n\
         If you don't know the answer or the information isn't in the context, say so politely.\n\n\
         Context from product catalog:\n{context}"
    )
}
