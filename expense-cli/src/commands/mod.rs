//! Command implementations for expensectl CLI

pub mod expenses;
pub mod migrate;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use expenses::run_expenses;
pub use migrate::run_migrate;
pub use serve::run_serve;
