//! Postgres implementations of the catalog and ledger stores

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, NewBook, NewTransaction, Transaction},
};

use super::{CatalogStore, RentalLedger};

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: Pool<Postgres>,
}

impl PgCatalogStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, category, rent_per_day, rent_generated)
            VALUES ($1, $2, $3, 0)
            RETURNING *
            "#,
        )
        .bind(book.name)
        .bind(book.category)
        .bind(book.rent_per_day)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    async fn search(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let mut conditions = Vec::new();
        let mut idx = 0;

        if filter.name.is_some() {
            idx += 1;
            conditions.push(format!("name ILIKE ${}", idx));
        }
        if filter.category.is_some() {
            idx += 1;
            conditions.push(format!("category = ${}", idx));
        }
        if filter.rent_range.is_some() {
            // Strict inequality on both ends
            conditions.push(format!(
                "rent_per_day > ${} AND rent_per_day < ${}",
                idx + 1,
                idx + 2
            ));
        }

        let mut sql = "SELECT * FROM books".to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query_as::<_, Book>(&sql);
        if let Some(ref name) = filter.name {
            query = query.bind(format!("%{}%", name));
        }
        if let Some(ref category) = filter.category {
            query = query.bind(category.clone());
        }
        if let Some((low, high)) = filter.rent_range {
            query = query.bind(low).bind(high);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn add_rent_generated(&self, id: i32, amount: f64) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE books SET rent_generated = rent_generated + $1 WHERE id = $2")
                .bind(amount)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct PgRentalLedger {
    pool: Pool<Postgres>,
}

impl PgRentalLedger {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalLedger for PgRentalLedger {
    async fn insert(&self, tx: NewTransaction) -> AppResult<Transaction> {
        let created = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (book_id, book_name, person_name, issue_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tx.book_id)
        .bind(tx.book_name)
        .bind(tx.person_name)
        .bind(tx.issue_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_pair(
        &self,
        book_name: &str,
        person_name: &str,
    ) -> AppResult<Option<Transaction>> {
        let tx = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE book_name = $1 AND person_name = $2",
        )
        .bind(book_name)
        .bind(person_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tx)
    }

    async fn find_by_book(&self, book_name: &str) -> AppResult<Vec<Transaction>> {
        let txs = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE book_name = $1 ORDER BY id",
        )
        .bind(book_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(txs)
    }

    async fn find_by_person(&self, person_name: &str) -> AppResult<Vec<Transaction>> {
        let txs = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE person_name = $1 ORDER BY id",
        )
        .bind(person_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(txs)
    }

    async fn find_issued_between(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> AppResult<Vec<Transaction>> {
        let txs = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE issue_date > $1 AND issue_date < $2
            ORDER BY issue_date
            "#,
        )
        .bind(after)
        .bind(before)
        .fetch_all(&self.pool)
        .await?;

        Ok(txs)
    }

    async fn list_all(&self) -> AppResult<Vec<Transaction>> {
        let txs = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(txs)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
