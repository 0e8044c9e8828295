//! Store layer: the catalog and the rental ledger.
//!
//! Both collections live in an external document store reached through these
//! traits. Services receive them as injected handles, so tests substitute the
//! in-memory implementation for the Postgres one.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookFilter, NewBook, NewTransaction, Transaction},
};

/// Catalog of books available for rental.
///
/// The store guarantees atomic single-record read-modify-write: the
/// `add_rent_generated` increment is atomic per book, but no cross-record
/// transactions are assumed.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a book (out-of-band creation: seeding and tests)
    async fn insert(&self, book: NewBook) -> AppResult<Book>;

    /// Get a book by store id
    async fn get(&self, id: i32) -> AppResult<Option<Book>>;

    /// Find a book by exact name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Book>>;

    /// Filtered catalog search; an empty filter returns all books
    async fn search(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    /// Atomically increment a book's rent accumulator
    async fn add_rent_generated(&self, id: i32, amount: f64) -> AppResult<()>;
}

/// Ledger of currently-open loans
#[async_trait]
pub trait RentalLedger: Send + Sync {
    async fn insert(&self, tx: NewTransaction) -> AppResult<Transaction>;

    /// The open loan for a (book_name, person_name) pair, if any
    async fn find_pair(
        &self,
        book_name: &str,
        person_name: &str,
    ) -> AppResult<Option<Transaction>>;

    async fn find_by_book(&self, book_name: &str) -> AppResult<Vec<Transaction>>;

    async fn find_by_person(&self, person_name: &str) -> AppResult<Vec<Transaction>>;

    /// Open loans issued strictly between the two instants
    async fn find_issued_between(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> AppResult<Vec<Transaction>>;

    async fn list_all(&self) -> AppResult<Vec<Transaction>>;

    /// Delete an open loan; returns false when the id no longer exists
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Store handles shared by all services
#[derive(Clone)]
pub struct Stores {
    pub catalog: Arc<dyn CatalogStore>,
    pub ledger: Arc<dyn RentalLedger>,
}

impl Stores {
    /// Postgres-backed stores over a shared connection pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            catalog: Arc::new(postgres::PgCatalogStore::new(pool.clone())),
            ledger: Arc::new(postgres::PgRentalLedger::new(pool)),
        }
    }

    /// In-memory stores (tests, local development)
    pub fn in_memory() -> Self {
        Self {
            catalog: Arc::new(memory::MemoryCatalogStore::new()),
            ledger: Arc::new(memory::MemoryRentalLedger::new()),
        }
    }
}
