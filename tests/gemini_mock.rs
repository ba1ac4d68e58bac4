//! HTTP-level Gemini client tests against a mock server.

use std::time::Duration;

use serde_json::json;
use vocabulary_ai::provider::{GeminiClient, GeminiConfig, LookupProvider};
use vocabulary_ai::Error;

fn client_for(server: &mockito::ServerGuard) -> GeminiClient {
    let config = GeminiConfig::new("test-key")
        .with_model("gemma-3-12b-it")
        .with_base_url(server.url())
        .with_timeout(Duration::from_secs(5));
    GeminiClient::new(config).unwrap()
}

#[tokio::test]
async fn test_generate_extracts_candidate_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemma-3-12b-it:generateContent")
        .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "{\"meaning\":\"ok\"}" }], "role": "model" },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let text = client.generate("describe resilient").await.unwrap();
    assert_eq!(text, "{\"meaning\":\"ok\"}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_candidate_text_is_a_provider_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemma-3-12b-it:generateContent")
        .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "candidates": [] }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.generate("describe resilient").await.unwrap_err();
    assert!(matches!(err, Error::Provider(_)));
}

#[tokio::test]
async fn test_quota_response_maps_to_rate_limited_with_hint() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemma-3-12b-it:generateContent")
        .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": {
                    "code": 429,
                    "message": "Resource has been exhausted (e.g. check quota).",
                    "status": "RESOURCE_EXHAUSTED",
                    "details": [{
                        "@type": "type.googleapis.com/google.rpc.RetryInfo",
                        "retryDelay": "14s"
                    }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.generate("describe resilient").await.unwrap_err();
    assert!(err.is_rate_limited());
    assert_eq!(err.retry_after_ms(), Some(14_000));
}

#[tokio::test]
async fn test_server_error_is_not_rate_limited() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemma-3-12b-it:generateContent")
        .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.generate("describe resilient").await.unwrap_err();
    assert!(!err.is_rate_limited());
    assert!(matches!(err, Error::Remote { status: 500, .. }));
}

#[tokio::test]
async fn test_list_models_keeps_only_generate_content_models() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/models")
        .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "models": [
                    {
                        "name": "models/gemma-3-12b-it",
                        "displayName": "Gemma 3 12B",
                        "description": "Instruction-tuned Gemma",
                        "supportedGenerationMethods": ["generateContent", "countTokens"],
                        "inputTokenLimit": 32768,
                        "outputTokenLimit": 8192,
                        "version": "001"
                    },
                    {
                        "name": "models/text-embedding-004",
                        "displayName": "Embedding",
                        "supportedGenerationMethods": ["embedContent"]
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let models = client.list_models().await.unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "gemma-3-12b-it");
    assert_eq!(models[0].full_name, "models/gemma-3-12b-it");
    assert_eq!(models[0].input_token_limit, Some(32768));
}
