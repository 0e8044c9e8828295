//! In-memory store implementations.
//!
//! Backing state is a `RwLock`ed vector per collection with a counter for id
//! assignment. Used by the test suite and for running without a database.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, NewBook, NewTransaction, Transaction},
};

use super::{CatalogStore, RentalLedger};

#[derive(Default)]
pub struct MemoryCatalogStore {
    books: RwLock<Vec<Book>>,
    next_id: AtomicI32,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(book: &Book, filter: &BookFilter) -> bool {
    if let Some(ref name) = filter.name {
        if !book.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
    }
    if let Some(ref category) = filter.category {
        if book.category != *category {
            return false;
        }
    }
    if let Some((low, high)) = filter.rent_range {
        if !(book.rent_per_day > low && book.rent_per_day < high) {
            return false;
        }
    }
    true
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Book {
            id,
            name: book.name,
            category: book.category,
            rent_per_day: book.rent_per_day,
            rent_generated: 0.0,
        };
        self.books.write().await.push(created.clone());
        Ok(created)
    }

    async fn get(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Book>> {
        Ok(self
            .books
            .read()
            .await
            .iter()
            .find(|b| b.name == name)
            .cloned())
    }

    async fn search(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        Ok(self
            .books
            .read()
            .await
            .iter()
            .filter(|b| matches_filter(b, filter))
            .cloned()
            .collect())
    }

    async fn add_rent_generated(&self, id: i32, amount: f64) -> AppResult<()> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        book.rent_generated += amount;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRentalLedger {
    transactions: RwLock<Vec<Transaction>>,
    next_id: AtomicI32,
}

impl MemoryRentalLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RentalLedger for MemoryRentalLedger {
    async fn insert(&self, tx: NewTransaction) -> AppResult<Transaction> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Transaction {
            id,
            book_id: tx.book_id,
            book_name: tx.book_name,
            person_name: tx.person_name,
            issue_date: tx.issue_date,
        };
        self.transactions.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_pair(
        &self,
        book_name: &str,
        person_name: &str,
    ) -> AppResult<Option<Transaction>> {
        Ok(self
            .transactions
            .read()
            .await
            .iter()
            .find(|t| t.book_name == book_name && t.person_name == person_name)
            .cloned())
    }

    async fn find_by_book(&self, book_name: &str) -> AppResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .read()
            .await
            .iter()
            .filter(|t| t.book_name == book_name)
            .cloned()
            .collect())
    }

    async fn find_by_person(&self, person_name: &str) -> AppResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .read()
            .await
            .iter()
            .filter(|t| t.person_name == person_name)
            .cloned()
            .collect())
    }

    async fn find_issued_between(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> AppResult<Vec<Transaction>> {
        let mut txs: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .iter()
            .filter(|t| t.issue_date > after && t.issue_date < before)
            .cloned()
            .collect();
        txs.sort_by_key(|t| t.issue_date);
        Ok(txs)
    }

    async fn list_all(&self) -> AppResult<Vec<Transaction>> {
        Ok(self.transactions.read().await.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut txs = self.transactions.write().await;
        let before = txs.len();
        txs.retain(|t| t.id != id);
        Ok(txs.len() < before)
    }
}
