//! Rental service: issue and return orchestration with rent accrual

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::NewTransaction,
    store::Stores,
};

/// Seconds in a day; per-second rent rate = rent_per_day / SECONDS_PER_DAY
const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Clone)]
pub struct RentalService {
    stores: Stores,
}

impl RentalService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Issue a book to a borrower.
    ///
    /// Fails with `Conflict` when the same borrower already holds an open
    /// loan for the same book name. The check is scoped to the
    /// (book_name, person_name) pair: different borrowers may hold the same
    /// book simultaneously.
    pub async fn issue(&self, book_name: &str, person_name: &str) -> AppResult<()> {
        if self
            .stores
            .ledger
            .find_pair(book_name, person_name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "This book has already been taken by {}",
                person_name
            )));
        }

        let book = self
            .stores
            .catalog
            .find_by_name(book_name)
            .await?
            .ok_or_else(|| AppError::NotFound("Failed to find book".to_string()))?;

        let tx = self
            .stores
            .ledger
            .insert(NewTransaction {
                book_id: book.id,
                book_name: book.name,
                person_name: person_name.to_string(),
                issue_date: Utc::now(),
            })
            .await?;

        tracing::info!(
            "Issued book '{}' to '{}' (transaction {})",
            book_name,
            person_name,
            tx.id
        );

        Ok(())
    }

    /// Return a book and settle accrued rent.
    ///
    /// Rent accrues per elapsed whole second at rent_per_day / 86400. A
    /// non-positive elapsed time accrues nothing. The accumulator update is a
    /// single atomic increment; the transaction is deleted only after the
    /// accrual write succeeded, so a crash in between leaves a stale
    /// transaction rather than unaccounted rent.
    pub async fn return_book(&self, book_name: &str, person_name: &str) -> AppResult<()> {
        let tx = self
            .stores
            .ledger
            .find_pair(book_name, person_name)
            .await?
            .ok_or_else(|| AppError::NotFound("No transaction found".to_string()))?;

        let book = self
            .stores
            .catalog
            .get(tx.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Failed to find book".to_string()))?;

        let elapsed = (Utc::now() - tx.issue_date).num_seconds().max(0);
        let accrued = elapsed as f64 * (book.rent_per_day / SECONDS_PER_DAY);

        self.stores
            .catalog
            .add_rent_generated(book.id, accrued)
            .await?;
        self.stores.ledger.delete(tx.id).await?;

        tracing::info!(
            "Returned book '{}' from '{}': {}s elapsed, {:.4} rent accrued",
            book_name,
            person_name,
            elapsed,
            accrued
        );

        Ok(())
    }
}
