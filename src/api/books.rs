//! Catalog search endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{BookFilter, BookSummary},
};

use super::ApiJson;

/// Catalog search criteria. Every field is optional; omitting all of them
/// returns the whole catalog.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchBooksRequest {
    /// Case-insensitive substring match against book names
    pub name: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// [low, high] pair; matches rent rates strictly between the bounds
    pub rent_per_day: Option<Vec<f64>>,
}

impl SearchBooksRequest {
    /// Empty strings count as absent filters, matching the lenient payloads
    /// callers of the original API sent.
    fn into_filter(self) -> AppResult<BookFilter> {
        let rent_range = match self.rent_per_day {
            Some(range) => {
                if range.len() != 2 {
                    return Err(AppError::Validation(
                        "rent_per_day must be a [low, high] pair".to_string(),
                    ));
                }
                Some((range[0], range[1]))
            }
            None => None,
        };

        Ok(BookFilter {
            name: self.name.filter(|s| !s.is_empty()),
            category: self.category.filter(|s| !s.is_empty()),
            rent_range,
        })
    }
}

/// Search the book catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    request_body = SearchBooksRequest,
    responses(
        (status = 200, description = "Matching books", body = Vec<BookSummary>),
        (status = 400, description = "Malformed filter"),
        (status = 415, description = "Content type not supported")
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<SearchBooksRequest>,
) -> AppResult<Json<Vec<BookSummary>>> {
    let filter = request.into_filter()?;
    let books = state.services.query.search_books(&filter).await?;

    Ok(Json(books))
}
