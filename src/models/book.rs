//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book model from the catalog store.
///
/// `rent_generated` is a monotonically non-decreasing accumulator: it is only
/// ever incremented by the return operation, never reset or decremented.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub rent_per_day: f64,
    pub rent_generated: f64,
}

/// Book awaiting insertion. Books are created out-of-band (seeding, admin
/// tooling); the public API never creates them.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub name: String,
    pub category: String,
    pub rent_per_day: f64,
}

/// Public projection of a book. The store id and the rent accumulator are
/// deliberately not exposed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub name: String,
    pub category: String,
    pub rent_per_day: f64,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            name: book.name,
            category: book.category,
            rent_per_day: book.rent_per_day,
        }
    }
}

/// Catalog search criteria. All filters are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Case-insensitive substring match against the book name
    pub name: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// (low, high) pair; matches rent_per_day strictly between the bounds
    pub rent_range: Option<(f64, f64)>,
}
