//! Connection pool shared by every request handler
//!
//! One pool is opened at bootstrap and cloned into `AppState`. Acquiring a
//! connection is bounded by [`DEFAULT_ACQUIRE_TIMEOUT`], so `serve`,
//! `migrate` and `/health` report an unreachable database instead of
//! waiting on it.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connection limit used by `expensectl serve` when none is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Upper bound on waiting for a connection, including the first connect.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool on the expenses database with the default limit.
///
/// # Errors
///
/// Fails if no connection can be established within
/// [`DEFAULT_ACQUIRE_TIMEOUT`].
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/expenses").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Open a pool capped at `max_connections` concurrent statements.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "opening database pool");

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(DEFAULT_ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}
