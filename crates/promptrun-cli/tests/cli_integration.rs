// End-to-end tests for the promptrun CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MIXED_DATASET: &str = concat!(
    "{\"query\":\"hi\",\"ground_truth\":\"hello\"}\n",
    "\n",
    "{\"query\":\"bad\"}\n",
    "{\"query\":\"temp?\",\"ground_truth\":\"72F\",\"context\":\"weather\"}\n",
);

fn promptrun_cmd() -> Command {
    let mut cmd = Command::cargo_bin("promptrun").unwrap();
    // keep host configuration out of the tests
    cmd.env_remove("PROMPTRUN_AGENT_URL")
        .env_remove("PROMPTRUN_DATA_FOLDER")
        .env_remove("PROMPTRUN_MODEL_BASE_URL")
        .env_remove("PROMPTRUN_MODEL_API_KEY")
        .env_remove("PROMPTRUN_MODEL_DEPLOYMENT")
        .env_remove("PROMPTRUN_PROJECT_ENDPOINT")
        .env_remove("PROMPTRUN_PROJECT_API_KEY");
    cmd
}

fn write_dataset(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

#[test]
fn test_validate_reports_counts() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, "mixed.jsonl", MIXED_DATASET);

    promptrun_cmd()
        .arg("--folder")
        .arg(dir.path())
        .arg("validate")
        .arg("mixed.jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records"))
        .stdout(predicate::str::contains("1 skipped"));
}

#[test]
fn test_validate_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    promptrun_cmd()
        .arg("--folder")
        .arg(dir.path())
        .arg("validate")
        .arg("absent.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.jsonl"));
}

#[tokio::test]
async fn test_run_sends_each_query_and_prints_replies() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, "mixed.jsonl", MIXED_DATASET);

    let mut server = mockito::Server::new_async().await;
    let card = format!(
        r#"{{"name": "Echo Agent", "url": "{}/"}}"#,
        server.url()
    );
    let _card_mock = server
        .mock("GET", "/.well-known/agent.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(card)
        .create_async()
        .await;
    let _send_mock = server
        .mock("POST", "/")
        .match_header("x-reference", "mixed.jsonl")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"jsonrpc": "2.0", "id": "1", "result": {"role": "agent", "parts": [{"kind": "text", "text": "echoed"}]}}"#,
        )
        .expect(2)
        .create_async()
        .await;

    promptrun_cmd()
        .arg("-u")
        .arg(server.url())
        .arg("--folder")
        .arg(dir.path())
        .arg("run")
        .arg("mixed.jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing: 'hi'"))
        .stdout(predicate::str::contains("Processing: 'temp?'"))
        .stdout(predicate::str::contains("echoed"))
        .stdout(predicate::str::contains("2 sent, 0 failed, 1 skipped"));
}

#[tokio::test]
async fn test_run_fails_when_card_unavailable() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, "ok.jsonl", "{\"query\":\"hi\",\"ground_truth\":\"hello\"}\n");

    let mut server = mockito::Server::new_async().await;
    let _card_mock = server
        .mock("GET", "/.well-known/agent.json")
        .with_status(404)
        .create_async()
        .await;

    promptrun_cmd()
        .arg("-u")
        .arg(server.url())
        .arg("--folder")
        .arg(dir.path())
        .arg("run")
        .arg("ok.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("agent card"));
}

#[test]
fn test_run_missing_dataset_fails_before_any_request() {
    let dir = TempDir::new().unwrap();

    promptrun_cmd()
        .arg("--folder")
        .arg(dir.path())
        .arg("run")
        .arg("absent.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.jsonl"));
}

#[test]
fn test_evaluators_reports_unconfigured_environment() {
    promptrun_cmd()
        .arg("evaluators")
        .assert()
        .success()
        .stdout(predicate::str::contains("quality"))
        .stdout(predicate::str::contains("content_safety"))
        .stdout(predicate::str::contains("not configured"));
}

#[test]
fn test_evaluators_reports_configured_quality() {
    promptrun_cmd()
        .env("PROMPTRUN_MODEL_BASE_URL", "https://models.example.com")
        .env("PROMPTRUN_MODEL_API_KEY", "key")
        .env("PROMPTRUN_MODEL_DEPLOYMENT", "gpt-test")
        .arg("evaluators")
        .assert()
        .success()
        .stdout(predicate::str::is_match("quality\\s+configured").unwrap());
}
