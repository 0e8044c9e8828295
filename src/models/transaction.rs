//! Transaction (open loan) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An open loan, linking one book to one borrower from issue until return.
///
/// At most one transaction may exist at a time for a given
/// (book_name, person_name) pair. `book_name` is denormalized from the book
/// at issue time, matching the ledger's lookup keys.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: i32,
    pub book_id: i32,
    pub book_name: String,
    pub person_name: String,
    pub issue_date: DateTime<Utc>,
}

/// Transaction awaiting insertion into the ledger
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub book_id: i32,
    pub book_name: String,
    pub person_name: String,
    pub issue_date: DateTime<Utc>,
}

/// Full transaction projection for listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionSummary {
    pub book_name: String,
    pub person_name: String,
    pub book_id: i32,
    pub issue_date: DateTime<Utc>,
}

impl From<Transaction> for TransactionSummary {
    fn from(tx: Transaction) -> Self {
        Self {
            book_name: tx.book_name,
            person_name: tx.person_name,
            book_id: tx.book_id,
            issue_date: tx.issue_date,
        }
    }
}

/// Transaction projection for date-range queries (no book id)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatedTransactionSummary {
    pub book_name: String,
    pub person_name: String,
    pub issue_date: DateTime<Utc>,
}

impl From<Transaction> for DatedTransactionSummary {
    fn from(tx: Transaction) -> Self {
        Self {
            book_name: tx.book_name,
            person_name: tx.person_name,
            issue_date: tx.issue_date,
        }
    }
}

/// Per-book activity: open loans and lifetime rent accrued
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookActivity {
    pub count: i64,
    pub issued_by: Vec<String>,
    pub total_rent_generated: f64,
}

/// Per-borrower activity. A borrower with no open loans is a valid
/// zero-count result, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonActivity {
    pub count: i64,
    pub books_issued: Vec<String>,
}
