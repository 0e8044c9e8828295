//! API handlers for Rentledger REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod transactions;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

/// Success envelope carrying a human-readable message
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Success envelope carrying a results payload
#[derive(Serialize)]
pub struct ResultsResponse<T> {
    pub success: bool,
    pub results: T,
}

impl<T> ResultsResponse<T> {
    pub fn ok(results: T) -> Self {
        Self {
            success: true,
            results,
        }
    }
}

/// JSON body extractor enforcing the structured-content rule: a request
/// without a JSON content type is rejected uniformly, and malformed bodies
/// map to validation failures instead of axum's default rejection shape.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                Err(AppError::UnsupportedContentType)
            }
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Fallback for unmatched routes
async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse {
            success: false,
            message: "The requested page does not exist.".to_string(),
        }),
    )
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/", get(health::index))
        // Catalog
        .route("/books", get(books::search_books))
        // Rental ledger
        .route("/transactions", get(transactions::list_transactions))
        .route("/transactions/book", get(transactions::book_activity))
        .route("/transactions/person", get(transactions::person_activity))
        .route("/transactions/bydate", get(transactions::by_date_range))
        .route("/transactions/issue", post(transactions::issue_book))
        .route("/transactions/return", post(transactions::return_book))
        .fallback(not_found)
        .with_state(state)
        // OpenAPI documentation
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
