//! Pipeline tests against scripted service implementations

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use outlander_core::{
    ChatModel, ChatPrompt, ChatTurn, EMBEDDING_DIMENSIONS, Embedder, Error, GenerationParams,
    HybridQuery, ProductDocument, Result, RetrievalConfig, SearchIndex,
};

use crate::{Copilot, Responder, Retriever};

struct FixedEmbedder;

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.0; EMBEDDING_DIMENSIONS])
    }
}

struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(Error::Embedding("401 Unauthorized".to_string()))
    }
}

struct ShortEmbedder;

#[async_trait]
impl Embedder for ShortEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.0; 3])
    }
}

/// Deterministic index returning the catalog in fixed relevance order
struct CatalogIndex {
    documents: Vec<ProductDocument>,
}

#[async_trait]
impl SearchIndex for CatalogIndex {
    async fn query(&self, query: &HybridQuery) -> Result<Vec<ProductDocument>> {
        Ok(self.documents.iter().take(query.top).cloned().collect())
    }
}

struct FailingIndex;

#[async_trait]
impl SearchIndex for FailingIndex {
    async fn query(&self, _query: &HybridQuery) -> Result<Vec<ProductDocument>> {
        Err(Error::Search("503 Service Unavailable".to_string()))
    }
}

/// Scripted model: reads the price line out of the system instruction and
/// declines when the context carries none
struct ContextEcho;

#[async_trait]
impl ChatModel for ContextEcho {
    async fn complete(&self, prompt: &ChatPrompt, _params: &GenerationParams) -> Result<String> {
        let price = prompt
            .system
            .lines()
            .find_map(|line| line.strip_prefix("**Price:** "));

        Ok(match price {
            Some(price) => format!("It costs {price}."),
            None => "I'm sorry, I don't have that information in our catalog.".to_string(),
        })
    }
}

/// Captures every prompt and parameter set it is handed, for asserting
/// prompt assembly
#[derive(Clone, Default)]
struct RecordingModel {
    seen: Arc<Mutex<Vec<(ChatPrompt, GenerationParams)>>>,
}

#[async_trait]
impl ChatModel for RecordingModel {
    async fn complete(&self, prompt: &ChatPrompt, params: &GenerationParams) -> Result<String> {
        self.seen.lock().unwrap().push((prompt.clone(), params.clone()));
        Ok("Recorded.".to_string())
    }
}

struct BlankModel;

#[async_trait]
impl ChatModel for BlankModel {
    async fn complete(&self, _prompt: &ChatPrompt, _params: &GenerationParams) -> Result<String> {
        Ok("  \n".to_string())
    }
}

struct PaddedModel;

#[async_trait]
impl ChatModel for PaddedModel {
    async fn complete(&self, _prompt: &ChatPrompt, _params: &GenerationParams) -> Result<String> {
        Ok("  The tent costs $250.00.  \n".to_string())
    }
}

fn catalog() -> Vec<ProductDocument> {
    vec![
        ProductDocument {
            title: "Summit Pro Backpack".to_string(),
            content: "A 65-liter expedition pack with an adjustable harness.".to_string(),
            category: Some("Backpacks".to_string()),
            price: Some("$129.99".to_string()),
            score: Some(3.2),
        },
        ProductDocument {
            title: "TrailMaster X4 Tent".to_string(),
            content: "A four-person tent with a 3000mm waterproof rating.".to_string(),
            category: Some("Tents".to_string()),
            price: Some("$250.00".to_string()),
            score: Some(2.1),
        },
        ProductDocument {
            title: "CozyNights Sleeping Bag".to_string(),
            content: "A three-season mummy bag rated to -5C.".to_string(),
            category: Some("Sleeping Bags".to_string()),
            price: Some("$79.99".to_string()),
            score: Some(1.4),
        },
        ProductDocument {
            title: "TrailWalker Hiking Shoes".to_string(),
            content: "Lightweight shoes with a grippy outsole.".to_string(),
            category: Some("Footwear".to_string()),
            price: Some("$110.00".to_string()),
            score: Some(1.1),
        },
    ]
}

fn retriever(documents: Vec<ProductDocument>) -> Retriever<FixedEmbedder, CatalogIndex> {
    Retriever::new(FixedEmbedder, CatalogIndex { documents })
}

#[tokio::test]
async fn retriever_caps_results_at_top_k() {
    let source = catalog();
    let retrieval = retriever(source.clone()).retrieve("any gear").await.unwrap();

    assert_eq!(retrieval.documents.len(), 3);
    for document in &retrieval.documents {
        assert!(source.contains(document));
    }
}

#[tokio::test]
async fn best_match_leads_the_context() {
    let retrieval = retriever(catalog())
        .retrieve("expedition backpack")
        .await
        .unwrap();

    assert_eq!(retrieval.documents[0].title, "Summit Pro Backpack");
    assert!(retrieval.context.starts_with("## Product 1: Summit Pro Backpack\n"));
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let err = retriever(catalog()).retrieve("   ").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn zero_matches_yield_an_empty_context() {
    let retrieval = retriever(Vec::new()).retrieve("unknown item").await.unwrap();
    assert!(retrieval.documents.is_empty());
    assert_eq!(retrieval.context, "");
}

#[tokio::test]
async fn embedding_failure_surfaces_as_embedding_error() {
    let retriever = Retriever::new(FailingEmbedder, CatalogIndex { documents: catalog() });
    let err = retriever.retrieve("any gear").await.unwrap_err();
    assert!(matches!(err, Error::Embedding(_)));
}

#[tokio::test]
async fn undersized_embedding_is_rejected() {
    let retriever = Retriever::new(ShortEmbedder, CatalogIndex { documents: catalog() });
    let err = retriever.retrieve("any gear").await.unwrap_err();
    assert!(matches!(err, Error::Embedding(_)));
}

#[tokio::test]
async fn search_failure_surfaces_as_search_error() {
    let retriever = Retriever::new(FixedEmbedder, FailingIndex);
    let err = retriever.retrieve("any gear").await.unwrap_err();
    assert!(matches!(err, Error::Search(_)));
}

#[tokio::test]
async fn responder_trims_the_answer_and_rejects_empty_output() {
    let err = Responder::new(BlankModel)
        .respond("q", "context", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Generation(_)));

    let answer = Responder::new(PaddedModel)
        .respond("q", "context", &[])
        .await
        .unwrap();
    assert_eq!(answer, "The tent costs $250.00.");
}

#[tokio::test]
async fn prompt_carries_context_and_history_in_order() {
    let model = RecordingModel::default();
    let responder = Responder::new(model.clone());

    let history = vec![
        ChatTurn {
            question: "Which tent is the most waterproof?".to_string(),
            answer: "The TrailMaster X4 Tent.".to_string(),
        },
        ChatTurn {
            question: "Does it come with a footprint?".to_string(),
            answer: "Yes, one is included.".to_string(),
        },
    ];
    let context = "## Product 1: TrailMaster X4 Tent\n\nA tent.\n";

    responder
        .respond("How much does it cost?", context, &history)
        .await
        .unwrap();

    let seen = model.seen.lock().unwrap();
    let (prompt, _) = &seen[0];
    assert!(prompt.system.contains(context));
    assert_eq!(prompt.history, history);
    assert_eq!(prompt.question, "How much does it cost?");
}

#[tokio::test]
async fn retrieval_config_override_caps_results_and_content() {
    let retrieval = retriever(catalog())
        .with_config(RetrievalConfig {
            top_k: 2,
            max_content_chars: 10,
        })
        .retrieve("any gear")
        .await
        .unwrap();

    assert_eq!(retrieval.documents.len(), 2);
    assert!(retrieval.context.contains("\nA 65-liter\n"));
}

#[tokio::test]
async fn params_override_reaches_the_model() {
    let model = RecordingModel::default();
    Responder::new(model.clone())
        .with_params(GenerationParams {
            max_tokens: 200,
            temperature: 0.0,
        })
        .respond("q", "context", &[])
        .await
        .unwrap();

    let seen = model.seen.lock().unwrap();
    let (_, params) = &seen[0];
    assert_eq!(params.max_tokens, 200);
    assert_eq!(params.temperature, 0.0);
}

fn price_copilot(documents: Vec<ProductDocument>) -> Copilot<FixedEmbedder, CatalogIndex, ContextEcho> {
    Copilot::new(retriever(documents), Responder::new(ContextEcho))
}

#[tokio::test]
async fn answer_contains_the_listed_price_end_to_end() {
    let copilot = price_copilot(catalog());
    let answer = copilot
        .answer("How much does the Summit Pro Backpack cost?", &[])
        .await
        .unwrap();
    assert!(answer.contains("$129.99"));
}

#[tokio::test]
async fn empty_context_produces_a_decline_not_specifics() {
    let copilot = price_copilot(Vec::new());
    let answer = copilot
        .answer("How much does the Summit Pro Backpack cost?", &[])
        .await
        .unwrap();

    assert!(answer.contains("sorry"));
    assert!(!answer.contains("Summit"));
    assert!(!answer.contains('$'));
}

#[tokio::test]
async fn identical_questions_get_identical_answers() {
    let copilot = price_copilot(catalog());
    let first = copilot.answer("price of the backpack?", &[]).await.unwrap();
    let second = copilot.answer("price of the backpack?", &[]).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn answer_with_context_surfaces_the_exchange() {
    let copilot = price_copilot(catalog());
    let exchange = copilot
        .answer_with_context("How much is the tent?", &[])
        .await
        .unwrap();

    assert_eq!(exchange.question, "How much is the tent?");
    assert!(exchange.context.starts_with("## Product 1: Summit Pro Backpack\n"));
    assert!(!exchange.answer.is_empty());
}
