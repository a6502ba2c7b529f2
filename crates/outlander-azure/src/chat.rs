//! Azure OpenAI chat completions client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use outlander_core::{ChatModel, ChatPrompt, Error, GenerationParams, Result};

use crate::config::OpenAiConfig;

/// Client for the Azure OpenAI chat completions endpoint
pub struct ChatClient {
    client: reqwest::Client,
    config: OpenAiConfig,
}

#[derive(Serialize)]
pub(crate) struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Flatten the prompt into the wire message sequence: system instruction,
/// history turns in order, then the current question
pub(crate) fn build_messages<'a>(prompt: &'a ChatPrompt) -> Vec<ChatMessage<'a>> {
    let mut messages = Vec::with_capacity(prompt.history.len() * 2 + 2);
    messages.push(ChatMessage {
        role: "system",
        content: &prompt.system,
    });
    for turn in &prompt.history {
        messages.push(ChatMessage {
            role: "user",
            content: &turn.question,
        });
        messages.push(ChatMessage {
            role: "assistant",
            content: &turn.answer,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: &prompt.question,
    });
    messages
}

pub(crate) fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| Error::Generation(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Generation("completion response contained no choices".to_string()))
}

impl ChatClient {
    pub fn new(client: reqwest::Client, config: OpenAiConfig) -> Self {
        Self { client, config }
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        )
    }
}

#[async_trait]
impl ChatModel for ChatClient {
    async fn complete(&self, prompt: &ChatPrompt, params: &GenerationParams) -> Result<String> {
        let request = ChatRequest {
            messages: build_messages(prompt),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(self.url())
            .header("api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Generation(format!(
                "chat completion request failed with status {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;
        parse_completion(&body)
    }
}
