//! Query service: catalog search and transaction summaries

use chrono::{NaiveDate, NaiveTime};

use crate::{
    error::{AppError, AppResult},
    models::{
        BookActivity, BookFilter, BookSummary, DatedTransactionSummary, PersonActivity,
        TransactionSummary,
    },
    store::Stores,
};

#[derive(Clone)]
pub struct QueryService {
    stores: Stores,
}

impl QueryService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Search the catalog; any combination of the filters may be set
    pub async fn search_books(&self, filter: &BookFilter) -> AppResult<Vec<BookSummary>> {
        let books = self.stores.catalog.search(filter).await?;
        Ok(books.into_iter().map(BookSummary::from).collect())
    }

    /// All open transactions
    pub async fn list_transactions(&self) -> AppResult<Vec<TransactionSummary>> {
        let txs = self.stores.ledger.list_all().await?;
        Ok(txs.into_iter().map(TransactionSummary::from).collect())
    }

    /// Open-loan activity for one book: borrower list plus the book's
    /// lifetime rent accumulator, read once via the first transaction's
    /// book id.
    pub async fn book_activity(&self, book_name: &str) -> AppResult<BookActivity> {
        let txs = self.stores.ledger.find_by_book(book_name).await?;

        let first = txs.first().ok_or_else(|| {
            AppError::NotFound("No transactions found for book".to_string())
        })?;

        let book = self
            .stores
            .catalog
            .get(first.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Failed to find book".to_string()))?;

        Ok(BookActivity {
            count: txs.len() as i64,
            issued_by: txs.into_iter().map(|t| t.person_name).collect(),
            total_rent_generated: book.rent_generated,
        })
    }

    /// Open-loan activity for one borrower; zero loans is a valid result
    pub async fn person_activity(&self, person_name: &str) -> AppResult<PersonActivity> {
        let txs = self.stores.ledger.find_by_person(person_name).await?;

        Ok(PersonActivity {
            count: txs.len() as i64,
            books_issued: txs.into_iter().map(|t| t.book_name).collect(),
        })
    }

    /// Open transactions issued strictly between the two calendar dates,
    /// each taken at midnight UTC
    pub async fn transactions_by_date_range(
        &self,
        greater_than: NaiveDate,
        less_than: NaiveDate,
    ) -> AppResult<Vec<DatedTransactionSummary>> {
        let after = greater_than.and_time(NaiveTime::MIN).and_utc();
        let before = less_than.and_time(NaiveTime::MIN).and_utc();

        let txs = self.stores.ledger.find_issued_between(after, before).await?;
        Ok(txs.into_iter().map(DatedTransactionSummary::from).collect())
    }
}
