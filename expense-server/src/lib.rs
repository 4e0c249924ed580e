//! expense-server: JSON CRUD service for expenses
//!
//! Exposes create, read, update and list over a single Postgres
//! `expenses` table, guarded by HTTP Basic Auth.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, ensure_schema, DbError, ExpenseRepo};
pub use http::{build_router, run_server, ApiError, AppState, BasicAuth, ServerConfig};
pub use models::{Expense, ExpenseInput};
