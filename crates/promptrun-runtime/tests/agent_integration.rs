// Integration tests for the agent client against a mock HTTP server.

use promptrun_runtime::{
    A2aClient, AgentClient, CardResolver, ClientError, ContentSafetyEvaluator, EvalInput,
    Evaluator, QualityEvaluator,
};
use promptrun_runtime::secrets::{ApiCredential, CredentialSource};
use promptrun_runtime::settings::{ModelSettings, ProjectSettings};

const CARD_BODY: &str = r#"
{
    "name": "Echo Agent",
    "description": "repeats what it hears",
    "url": "__URL__",
    "version": "1.0.0",
    "capabilities": {"streaming": false},
    "skills": [{"id": "echo", "name": "Echo", "tags": ["demo"]}]
}
"#;

fn rpc_result(text: &str) -> String {
    format!(
        r#"{{
            "jsonrpc": "2.0",
            "id": "req-1",
            "result": {{
                "role": "agent",
                "parts": [{{"kind": "text", "text": "{text}"}}]
            }}
        }}"#
    )
}

#[tokio::test]
async fn test_card_resolution() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/.well-known/agent.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CARD_BODY.replace("__URL__", &server.url()))
        .create_async()
        .await;

    let resolver = CardResolver::new(reqwest::Client::new(), server.url());
    let card = resolver.resolve().await.unwrap();

    assert_eq!(card.name, "Echo Agent");
    assert_eq!(card.url, server.url());
    assert_eq!(card.skills.len(), 1);
}

#[tokio::test]
async fn test_card_resolution_missing_card() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/.well-known/agent.json")
        .with_status(404)
        .with_body("no card here")
        .create_async()
        .await;

    let resolver = CardResolver::new(reqwest::Client::new(), server.url());
    let err = resolver.resolve().await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_send_message_returns_reply_text() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .match_header("x-reference", "questions.jsonl")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(rpc_result("hello back"))
        .create_async()
        .await;

    let client = A2aClient::new(reqwest::Client::new(), server.url())
        .with_reference("questions.jsonl");
    let reply = client.send_message("hi").await.unwrap();

    assert_eq!(reply, "hello back");
}

#[tokio::test]
async fn test_send_message_rpc_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc": "2.0", "id": "1", "error": {"code": -32001, "message": "task failed"}}"#)
        .create_async()
        .await;

    let client = A2aClient::new(reqwest::Client::new(), server.url());
    let err = client.send_message("hi").await.unwrap_err();

    match err {
        ClientError::Rpc { code, message } => {
            assert_eq!(code, -32001);
            assert_eq!(message, "task failed");
        }
        other => panic!("expected RPC error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_message_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let client = A2aClient::new(reqwest::Client::new(), server.url());
    let err = client.send_message("hi").await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 503, .. }));
}

#[tokio::test]
async fn test_quality_evaluator_delegates_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/evaluate")
        .match_header("api-key", "model-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"coherence": 4.0, "fluency": 5.0}"#)
        .create_async()
        .await;

    let settings = ModelSettings {
        base_url: server.url(),
        api_key: ApiCredential::new("model-key", CredentialSource::Programmatic, "model API key"),
        deployment: "gpt-test".to_string(),
        api_version: Some("2024-06-01".to_string()),
    };
    let evaluator = QualityEvaluator::new(settings);

    let input = EvalInput {
        query: "hi".to_string(),
        response: "hello".to_string(),
        ground_truth: "hello".to_string(),
        context: None,
    };
    let scores = evaluator.evaluate(&input).await.unwrap();

    assert_eq!(scores.scores["coherence"], 4.0);
    assert_eq!(scores.scores["fluency"], 5.0);
}

#[tokio::test]
async fn test_content_safety_evaluator_surfaces_api_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/evaluate")
        .with_status(401)
        .with_body("bad credential")
        .create_async()
        .await;

    let settings = ProjectSettings {
        endpoint: server.url(),
        api_key: ApiCredential::new("wrong", CredentialSource::Programmatic, "project API key"),
    };
    let evaluator = ContentSafetyEvaluator::new(settings);

    let input = EvalInput {
        query: "q".to_string(),
        response: "r".to_string(),
        ground_truth: "g".to_string(),
        context: Some("c".to_string()),
    };
    let err = evaluator.evaluate(&input).await.unwrap_err();

    assert!(err.to_string().contains("401"));
}
