//! Azure AI Search hybrid query client

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use outlander_core::{Error, HybridQuery, ProductDocument, Result, SearchIndex};

use crate::config::SearchConfig;

/// Fields requested back from the index; the embedding vector is excluded
const SELECT_FIELDS: &str = "title,content,category,price";
/// Index field holding the precomputed document embeddings
const VECTOR_FIELD: &str = "contentVector";

/// Client for the Azure AI Search documents endpoint
pub struct SearchClient {
    client: reqwest::Client,
    config: SearchConfig,
}

#[derive(Serialize)]
pub(crate) struct SearchRequest<'a> {
    search: &'a str,
    select: &'static str,
    top: usize,
    #[serde(rename = "vectorQueries")]
    vector_queries: Vec<VectorQuery<'a>>,
}

#[derive(Serialize)]
struct VectorQuery<'a> {
    kind: &'static str,
    vector: &'a [f32],
    fields: &'static str,
    k: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, deserialize_with = "price_as_string")]
    price: Option<String>,
    #[serde(rename = "@search.score", default)]
    score: Option<f32>,
}

impl From<SearchHit> for ProductDocument {
    fn from(hit: SearchHit) -> Self {
        Self {
            title: hit.title,
            content: hit.content,
            category: hit.category,
            price: hit.price,
            score: hit.score,
        }
    }
}

/// Prices arrive as either a JSON string or a bare number depending on how
/// the catalog was ingested
fn price_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "unexpected price value: {other}"
        ))),
    }
}

pub(crate) fn search_request<'a>(query: &'a HybridQuery) -> SearchRequest<'a> {
    SearchRequest {
        search: &query.text,
        select: SELECT_FIELDS,
        top: query.top,
        vector_queries: vec![VectorQuery {
            kind: "vector",
            vector: &query.vector,
            fields: VECTOR_FIELD,
            k: query.top,
        }],
    }
}

pub(crate) fn parse_hits(body: &str) -> Result<Vec<ProductDocument>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| Error::Search(e.to_string()))?;
    Ok(response.value.into_iter().map(Into::into).collect())
}

impl SearchClient {
    pub fn new(client: reqwest::Client, config: SearchConfig) -> Self {
        Self { client, config }
    }

    fn url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.index_name,
            self.config.api_version
        )
    }
}

#[async_trait]
impl SearchIndex for SearchClient {
    async fn query(&self, query: &HybridQuery) -> Result<Vec<ProductDocument>> {
        let response = self
            .client
            .post(self.url())
            .header("api-key", &self.config.api_key)
            .json(&search_request(query))
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Search(format!(
                "search request failed with status {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;
        parse_hits(&body)
    }
}
