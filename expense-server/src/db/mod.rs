//! Database layer - connection pool, schema bootstrap and repositories
//!
//! One `PgPool` is shared by every handler; statements auto-commit.

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use schema::ensure_schema;
