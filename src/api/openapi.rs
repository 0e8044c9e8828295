//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentledger API",
        version = "0.1.0",
        description = "Book rental ledger REST API",
        license(name = "MIT")
    ),
    paths(
        // Health
        health::index,
        // Books
        books::search_books,
        // Transactions
        transactions::list_transactions,
        transactions::book_activity,
        transactions::person_activity,
        transactions::by_date_range,
        transactions::issue_book,
        transactions::return_book,
    ),
    components(
        schemas(
            // Requests
            books::SearchBooksRequest,
            transactions::RentalActionRequest,
            transactions::BookActivityRequest,
            transactions::PersonActivityRequest,
            transactions::DateRangeRequest,
            // Responses
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
            crate::models::book::BookSummary,
            crate::models::transaction::TransactionSummary,
            crate::models::transaction::DatedTransactionSummary,
            crate::models::transaction::BookActivity,
            crate::models::transaction::PersonActivity,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "books", description = "Catalog search"),
        (name = "transactions", description = "Rental ledger operations")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
