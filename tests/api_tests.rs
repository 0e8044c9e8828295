//! In-process API tests: the full router over in-memory stores

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use rentledger_server::{
    api, config::AppConfig, models::NewBook, services::Services, store::Stores, AppState,
};

fn app() -> (Stores, Router) {
    let stores = Stores::in_memory();
    let services = Services::new(stores.clone());
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services),
    };
    (stores, api::create_router(state))
}

async fn seed_book(stores: &Stores, name: &str, category: &str, rent_per_day: f64) {
    stores
        .catalog
        .insert(NewBook {
            name: name.to_string(),
            category: category.to_string(),
            rent_per_day,
        })
        .await
        .unwrap();
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn index_returns_welcome_message() {
    let (_stores, app) = app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Welcome to the book database!");
}

#[tokio::test]
async fn unmatched_route_returns_uniform_404() {
    let (_stores, app) = app();

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "The requested page does not exist.");
}

#[tokio::test]
async fn missing_content_type_is_rejected_uniformly() {
    let (_stores, app) = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/transactions/issue")
                .body(Body::from(
                    json!({"book_name": "Dune", "person_name": "Alice"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "ContentType is not supported!");
}

#[tokio::test]
async fn issue_conflict_and_return_flow() {
    let (stores, app) = app();
    seed_book(&stores, "Dune", "scifi", 24.0).await;

    // Issue
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/transactions/issue",
            json!({"book_name": "Dune", "person_name": "Alice"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully issued book");

    // Same pair again: conflict
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/transactions/issue",
            json!({"book_name": "Dune", "person_name": "Alice"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "This book has already been taken by Alice");

    // Return
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/transactions/return",
            json!({"book_name": "Dune", "person_name": "Alice"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Returned book successfully");

    // Nothing left to return
    let response = app
        .oneshot(json_request(
            "POST",
            "/transactions/return",
            json!({"book_name": "Dune", "person_name": "Alice"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "No transaction found");
}

#[tokio::test]
async fn issue_unknown_book_returns_not_found() {
    let (_stores, app) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/transactions/issue",
            json!({"book_name": "Missing", "person_name": "Alice"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to find book");
}

#[tokio::test]
async fn issue_with_empty_book_name_fails_validation() {
    let (_stores, app) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/transactions/issue",
            json!({"book_name": "", "person_name": "Alice"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn search_books_returns_bare_array_with_projection() {
    let (stores, app) = app();
    seed_book(&stores, "Dune", "scifi", 24.0).await;
    seed_book(&stores, "Emma", "classic", 12.0).await;

    let response = app
        .oneshot(json_request("GET", "/books", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let books = body.as_array().expect("bare array response");
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["name"], "Dune");
    // Projection hides the accumulator and the store id
    assert!(books[0].get("rent_generated").is_none());
    assert!(books[0].get("id").is_none());
}

#[tokio::test]
async fn search_books_applies_combined_filters() {
    let (stores, app) = app();
    seed_book(&stores, "Dune", "scifi", 24.0).await;
    seed_book(&stores, "Dune Messiah", "scifi", 55.0).await;
    seed_book(&stores, "Emma", "classic", 24.0).await;

    let response = app
        .oneshot(json_request(
            "GET",
            "/books",
            json!({"name": "dune", "category": "scifi", "rent_per_day": [10.0, 50.0]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Dune");
}

#[tokio::test]
async fn search_books_rejects_half_open_rent_range() {
    let (_stores, app) = app();

    let response = app
        .oneshot(json_request("GET", "/books", json!({"rent_per_day": [10.0]})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn list_transactions_returns_results_envelope() {
    let (stores, app) = app();
    seed_book(&stores, "Dune", "scifi", 24.0).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/transactions/issue",
            json!({"book_name": "Dune", "person_name": "Alice"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/transactions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["book_name"], "Dune");
    assert_eq!(results[0]["person_name"], "Alice");
    assert!(results[0]["issue_date"].is_string());
}

#[tokio::test]
async fn book_activity_endpoint_reports_summary() {
    let (stores, app) = app();
    seed_book(&stores, "Dune", "scifi", 24.0).await;

    for person in ["Alice", "Bob"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/transactions/issue",
                json!({"book_name": "Dune", "person_name": person}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(json_request(
            "GET",
            "/transactions/book",
            json!({"book_name": "Dune"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"]["count"], 2);
    assert_eq!(body["results"]["issued_by"], json!(["Alice", "Bob"]));
    assert_eq!(body["results"]["total_rent_generated"], 0.0);
}

#[tokio::test]
async fn book_activity_for_unknown_book_is_404() {
    let (_stores, app) = app();

    let response = app
        .oneshot(json_request(
            "GET",
            "/transactions/book",
            json!({"book_name": "Missing"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No transactions found for book");
}

#[tokio::test]
async fn person_activity_endpoint_allows_zero_loans() {
    let (_stores, app) = app();

    let response = app
        .oneshot(json_request(
            "GET",
            "/transactions/person",
            json!({"person_name": "Nobody"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["results"]["count"], 0);
    assert_eq!(body["results"]["books_issued"], json!([]));
}

#[tokio::test]
async fn by_date_range_rejects_malformed_dates() {
    let (_stores, app) = app();

    let response = app
        .oneshot(json_request(
            "GET",
            "/transactions/bydate",
            json!({"greater_than": "not-a-date", "less_than": "2024-02-01"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn by_date_range_filters_open_transactions() {
    let (stores, app) = app();
    seed_book(&stores, "Dune", "scifi", 24.0).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/transactions/issue",
            json!({"book_name": "Dune", "person_name": "Alice"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A range that starts yesterday and ends tomorrow includes the loan
    let today = chrono::Utc::now().date_naive();
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/transactions/bydate",
            json!({
                "greater_than": (today - chrono::Duration::days(1)).format("%Y-%m-%d").to_string(),
                "less_than": (today + chrono::Duration::days(1)).format("%Y-%m-%d").to_string(),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["person_name"], "Alice");
    assert!(results[0].get("book_id").is_none());

    // A range entirely in the past excludes it
    let response = app
        .oneshot(json_request(
            "GET",
            "/transactions/bydate",
            json!({"greater_than": "2000-01-01", "less_than": "2000-02-01"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}
