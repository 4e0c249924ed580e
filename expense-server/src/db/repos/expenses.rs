//! Expense repository
//!
//! One parameterized statement per operation:
//! - create: INSERT ... RETURNING (id assigned by SERIAL)
//! - get: lookup by id, the database does the text -> int coercion
//! - update: full-field overwrite, reports rows affected
//! - list: every row, ordered by id

use sqlx::PgPool;

use super::DbError;
use crate::models::{Expense, ExpenseInput};

/// Column list shared by every read. NULLs in legacy rows read as zero values.
const EXPENSE_COLUMNS: &str = r#"
    id,
    COALESCE(title, '') AS title,
    COALESCE(amount, 0) AS amount,
    COALESCE(note, '') AS note,
    COALESCE(tags, '{}') AS tags
"#;

/// Expense repository
pub struct ExpenseRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ExpenseRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new expense and return it with its assigned id.
    pub async fn create(&self, input: &ExpenseInput) -> Result<Expense, DbError> {
        let sql = format!(
            "INSERT INTO expenses (title, amount, note, tags) VALUES ($1, $2, $3, $4) RETURNING {}",
            EXPENSE_COLUMNS
        );

        let expense = sqlx::query_as::<_, Expense>(&sql)
            .bind(&input.title)
            .bind(input.amount)
            .bind(&input.note)
            .bind(input.tags.as_slice())
            .fetch_one(self.pool)
            .await?;

        Ok(expense)
    }

    /// Fetch one expense by id.
    ///
    /// `id` is passed through untouched; a non-numeric value fails in the
    /// database cast and surfaces as `DbError::Sqlx`.
    pub async fn get(&self, id: &str) -> Result<Expense, DbError> {
        let sql = format!("SELECT {} FROM expenses WHERE id = $1::int", EXPENSE_COLUMNS);

        sqlx::query_as::<_, Expense>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "expense",
                id: id.to_owned(),
            })
    }

    /// Overwrite every field except `id`. Returns the number of rows matched.
    pub async fn update(&self, id: &str, input: &ExpenseInput) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET title = $2, amount = $3, note = $4, tags = $5
            WHERE id = $1::int
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(input.amount)
        .bind(&input.note)
        .bind(input.tags.as_slice())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// List every expense. Any row that fails to decode aborts the listing.
    pub async fn list(&self) -> Result<Vec<Expense>, DbError> {
        let sql = format!("SELECT {} FROM expenses ORDER BY id", EXPENSE_COLUMNS);

        let expenses = sqlx::query_as::<_, Expense>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(expenses)
    }
}
