//! Data models for Rentledger

pub mod book;
pub mod transaction;

// Re-export commonly used types
pub use book::{Book, BookFilter, BookSummary, NewBook};
pub use transaction::{
    BookActivity, DatedTransactionSummary, NewTransaction, PersonActivity, Transaction,
    TransactionSummary,
};
