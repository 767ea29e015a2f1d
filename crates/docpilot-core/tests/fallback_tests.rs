//! End-to-end fallback behavior with real adapters against a mock server

use docpilot_core::{
    CapabilityKind, CapabilityRequest, Config, DocpilotError, HuggingFaceProvider,
    LocalProvider, OpenAiClient, OpenAiProvider, Orchestrator, Payload, Provider, ProviderKind,
};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

const DOCUMENT: &str = "Project X shipped v1 with auth, storage, and search features.";

fn config_for(server: &MockServer, openai_key: Option<&str>, hf_key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.openai.api_key = openai_key.map(str::to_string);
    config.openai.base_url = server.url("/v1");
    config.huggingface.api_key = hf_key.map(str::to_string);
    config.huggingface.base_url = server.base_url();
    config
}

#[tokio::test]
async fn test_remote_failure_falls_back_to_local() {
    let server = MockServer::start_async().await;
    let chat = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(500).body("internal error");
        })
        .await;

    let mut config = config_for(&server, Some("sk-test"), None);
    config.provider_priority = vec![ProviderKind::OpenAi, ProviderKind::Local];
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let result = orchestrator.tag(DOCUMENT).await;

    assert_eq!(result.provider(), Some("local-rule-based"));
    assert_eq!(
        result.payload().and_then(Payload::as_tags).map(|t| t[0].as_str()),
        Some("technology")
    );
    assert_eq!(chat.hits_async().await, 1);
}

#[tokio::test]
async fn test_remote_success_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "Auth, Storage, Search"}}]
            }));
        })
        .await;

    let config = config_for(&server, Some("sk-test"), None);
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let result = orchestrator.tag(DOCUMENT).await;

    assert_eq!(result.provider(), Some("openai"));
    assert_eq!(
        result.payload(),
        Some(&Payload::Tags(vec![
            "auth".to_string(),
            "storage".to_string(),
            "search".to_string()
        ]))
    );
}

#[tokio::test]
async fn test_no_credentials_means_no_network_calls() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let config = config_for(&server, None, None);
    let client = Arc::new(
        OpenAiClient::new(config.openai.clone(), config.processing.timeout()).unwrap(),
    );
    let openai: Arc<dyn Provider> = Arc::new(OpenAiProvider::new(client.clone(), false, 4000));
    let huggingface: Arc<dyn Provider> =
        Arc::new(HuggingFaceProvider::from_config(&config).unwrap());
    let local: Arc<dyn Provider> = Arc::new(LocalProvider::from_config(&config));
    let providers = vec![(0, openai), (1, huggingface), (2, local)];
    let orchestrator = Orchestrator::new(providers, &config.processing);

    for request in [
        CapabilityRequest::Summarize,
        CapabilityRequest::Tag,
        CapabilityRequest::query("What shipped?"),
    ] {
        let result = orchestrator.execute(DOCUMENT, &request).await;
        assert_eq!(result.provider(), Some("local-rule-based"));
    }

    assert_eq!(any.hits_async().await, 0);
    assert_eq!(client.metrics().total_requests, 0);
}

#[tokio::test]
async fn test_huggingface_answers_query_when_openai_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(503);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/models/deepset/roberta-base-squad2");
            then.status(200)
                .json_body(json!({"answer": "v1 with auth, storage, and search", "score": 0.8}));
        })
        .await;

    let config = config_for(&server, Some("sk-test"), Some("hf-test"));
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let result = orchestrator.query(DOCUMENT, "What shipped?").await;

    assert_eq!(result.provider(), Some("huggingface"));
    assert_eq!(
        result.payload().and_then(Payload::as_answer),
        Some("v1 with auth, storage, and search")
    );
    assert_eq!(result.attempts().len(), 2);
}

#[tokio::test]
async fn test_exhaustion_without_local_processing() {
    let server = MockServer::start_async().await;
    let mut config = config_for(&server, None, None);
    config.processing.local_processing = false;
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let err = orchestrator
        .summarize(DOCUMENT)
        .await
        .into_result()
        .unwrap_err();

    assert!(matches!(
        err,
        DocpilotError::AllProvidersExhausted {
            capability: CapabilityKind::Summarize,
            attempts: 0
        }
    ));
}

#[tokio::test]
async fn test_descriptors_reflect_configuration() {
    let server = MockServer::start_async().await;
    let config = config_for(&server, Some("sk-test"), None);
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let descriptors = orchestrator.descriptors();
    let summary: Vec<(&str, usize, bool)> = descriptors
        .iter()
        .map(|d| (d.name.as_str(), d.priority, d.available))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("openai", 0, true),
            ("huggingface", 1, false),
            ("local-rule-based", 2, true),
        ]
    );
}
