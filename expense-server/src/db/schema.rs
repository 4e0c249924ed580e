//! Schema bootstrap for the expenses table

use sqlx::PgPool;

/// Idempotent create statement run at startup.
pub const CREATE_EXPENSES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS expenses (
        id SERIAL PRIMARY KEY,
        title TEXT,
        amount INT,
        note TEXT,
        tags TEXT[]
    )
"#;

/// Ensure the `expenses` table exists.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring expenses table exists");
    sqlx::query(CREATE_EXPENSES_TABLE).execute(pool).await?;
    Ok(())
}
