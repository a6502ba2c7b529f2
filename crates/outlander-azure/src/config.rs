//! Environment configuration for the Azure service clients

use serde::{Deserialize, Serialize};
use std::env;

use outlander_core::{Error, Result};

/// Connection settings for the Azure AI Search index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub index_name: String,
    pub api_version: String,
}

/// Connection settings for one Azure OpenAI deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

/// Configuration for all three hosted services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    pub search: SearchConfig,
    pub embeddings: OpenAiConfig,
    pub chat: OpenAiConfig,
}

impl AzureConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let search = SearchConfig {
            endpoint: require("AZURE_SEARCH_ENDPOINT")?,
            api_key: require("AZURE_SEARCH_API_KEY")?,
            index_name: env::var("AZURE_SEARCH_INDEX_NAME")
                .unwrap_or_else(|_| "outlander-products-index".to_string()),
            api_version: env::var("AZURE_SEARCH_API_VERSION")
                .unwrap_or_else(|_| "2023-11-01".to_string()),
        };

        let embeddings = OpenAiConfig {
            endpoint: require("AZURE_EMBEDDING_ENDPOINT")?,
            api_key: require("AZURE_EMBEDDING_API_KEY")?,
            deployment: require("AZURE_EMBEDDING_DEPLOYMENT_NAME")?,
            api_version: env::var("AZURE_EMBEDDING_API_VERSION")
                .unwrap_or_else(|_| "2023-05-15".to_string()),
        };

        let chat = OpenAiConfig {
            endpoint: require("AZURE_OPENAI_ENDPOINT")?,
            api_key: require("AZURE_OPENAI_API_KEY")?,
            deployment: require("AZURE_DEPLOYMENT_NAME")?,
            api_version: env::var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|_| "2024-02-01".to_string()),
        };

        Ok(Self {
            search,
            embeddings,
            chat,
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Configuration(format!("{name} environment variable not found")))
}
