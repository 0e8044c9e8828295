//! Smoke tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_welcome() {
    let client = Client::new();

    let response = client
        .get(BASE_URL.to_string() + "/")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Welcome to the book database!");
}

#[tokio::test]
#[ignore]
async fn test_unknown_route() {
    let client = Client::new();

    let response = client
        .get(BASE_URL.to_string() + "/does-not-exist")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_list_transactions() {
    let client = Client::new();

    let response = client
        .get(BASE_URL.to_string() + "/transactions")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert!(body["results"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_issue_and_return_roundtrip() {
    let client = Client::new();

    // Requires a seeded book named "Dune"
    let response = client
        .post(BASE_URL.to_string() + "/transactions/issue")
        .json(&json!({"book_name": "Dune", "person_name": "smoke-test"}))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .post(BASE_URL.to_string() + "/transactions/return")
        .json(&json!({"book_name": "Dune", "person_name": "smoke-test"}))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Returned book successfully");
}
