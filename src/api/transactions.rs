//! Rental ledger endpoints: listings, summaries, issue and return

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{BookActivity, DatedTransactionSummary, PersonActivity, TransactionSummary},
};

use super::{ApiJson, MessageResponse, ResultsResponse};

/// Issue / return request: one book, one borrower
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RentalActionRequest {
    #[validate(length(min = 1, message = "book_name must not be empty"))]
    pub book_name: String,
    #[validate(length(min = 1, message = "person_name must not be empty"))]
    pub person_name: String,
}

/// Book activity request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookActivityRequest {
    #[validate(length(min = 1, message = "book_name must not be empty"))]
    pub book_name: String,
}

/// Person activity request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PersonActivityRequest {
    #[validate(length(min = 1, message = "person_name must not be empty"))]
    pub person_name: String,
}

/// Date-range request; both bounds are calendar dates (YYYY-MM-DD)
#[derive(Debug, Deserialize, ToSchema)]
pub struct DateRangeRequest {
    pub greater_than: String,
    pub less_than: String,
}

fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{} must be a YYYY-MM-DD date", field)))
}

/// List all open transactions
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "All open transactions")
    )
)]
pub async fn list_transactions(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ResultsResponse<Vec<TransactionSummary>>>> {
    let results = state.services.query.list_transactions().await?;
    Ok(Json(ResultsResponse::ok(results)))
}

/// Open-loan activity for one book
#[utoipa::path(
    get,
    path = "/transactions/book",
    tag = "transactions",
    request_body = BookActivityRequest,
    responses(
        (status = 200, description = "Borrowers and lifetime rent for the book"),
        (status = 404, description = "No transactions for this book"),
        (status = 415, description = "Content type not supported")
    )
)]
pub async fn book_activity(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<BookActivityRequest>,
) -> AppResult<Json<ResultsResponse<BookActivity>>> {
    request.validate()?;

    let results = state.services.query.book_activity(&request.book_name).await?;
    Ok(Json(ResultsResponse::ok(results)))
}

/// Open-loan activity for one borrower
#[utoipa::path(
    get,
    path = "/transactions/person",
    tag = "transactions",
    request_body = PersonActivityRequest,
    responses(
        (status = 200, description = "Books currently held by the borrower"),
        (status = 415, description = "Content type not supported")
    )
)]
pub async fn person_activity(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<PersonActivityRequest>,
) -> AppResult<Json<ResultsResponse<PersonActivity>>> {
    request.validate()?;

    let results = state
        .services
        .query
        .person_activity(&request.person_name)
        .await?;
    Ok(Json(ResultsResponse::ok(results)))
}

/// Open transactions issued between two dates
#[utoipa::path(
    get,
    path = "/transactions/bydate",
    tag = "transactions",
    request_body = DateRangeRequest,
    responses(
        (status = 200, description = "Transactions issued inside the range"),
        (status = 400, description = "Malformed date"),
        (status = 415, description = "Content type not supported")
    )
)]
pub async fn by_date_range(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<DateRangeRequest>,
) -> AppResult<Json<ResultsResponse<Vec<DatedTransactionSummary>>>> {
    let greater_than = parse_date(&request.greater_than, "greater_than")?;
    let less_than = parse_date(&request.less_than, "less_than")?;

    let results = state
        .services
        .query
        .transactions_by_date_range(greater_than, less_than)
        .await?;
    Ok(Json(ResultsResponse::ok(results)))
}

/// Issue a book to a borrower
#[utoipa::path(
    post,
    path = "/transactions/issue",
    tag = "transactions",
    request_body = RentalActionRequest,
    responses(
        (status = 200, description = "Book issued", body = MessageResponse),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Borrower already holds this book"),
        (status = 415, description = "Content type not supported")
    )
)]
pub async fn issue_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<RentalActionRequest>,
) -> AppResult<Json<MessageResponse>> {
    request.validate()?;

    state
        .services
        .rental
        .issue(&request.book_name, &request.person_name)
        .await?;

    Ok(Json(MessageResponse::ok("Successfully issued book")))
}

/// Return a book and settle accrued rent
#[utoipa::path(
    post,
    path = "/transactions/return",
    tag = "transactions",
    request_body = RentalActionRequest,
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 404, description = "No open transaction for this pair"),
        (status = 415, description = "Content type not supported")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<RentalActionRequest>,
) -> AppResult<Json<MessageResponse>> {
    request.validate()?;

    state
        .services
        .rental
        .return_book(&request.book_name, &request.person_name)
        .await?;

    Ok(Json(MessageResponse::ok("Returned book successfully")))
}
