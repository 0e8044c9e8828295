//! Rentledger - Book Rental Ledger Service
//!
//! A small REST JSON API managing a book-rental ledger: searching a book
//! catalog, issuing books to borrowers, tracking open rentals, and settling
//! accrued rent on return.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
