//! Azure OpenAI embeddings client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use outlander_core::{Embedder, Error, Result};

use crate::config::OpenAiConfig;

/// Client for the Azure OpenAI embeddings endpoint
pub struct EmbeddingsClient {
    client: reqwest::Client,
    config: OpenAiConfig,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl EmbeddingsClient {
    pub fn new(client: reqwest::Client, config: OpenAiConfig) -> Self {
        Self { client, config }
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/embeddings?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        )
    }
}

pub(crate) fn parse_embedding(body: &str) -> Result<Vec<f32>> {
    let response: EmbeddingResponse =
        serde_json::from_str(body).map_err(|e| Error::Embedding(e.to_string()))?;

    response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| Error::Embedding("empty embedding response".to_string()))
}

#[async_trait]
impl Embedder for EmbeddingsClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(self.url())
            .header("api-key", &self.config.api_key)
            .json(&EmbeddingRequest { input: text })
            .send()
            .await
            .map_err(|e| Error::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Embedding(format!(
                "embeddings request failed with status {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Embedding(e.to_string()))?;
        parse_embedding(&body)
    }
}
