//! Schema bootstrap without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use expense_server::{create_pool, ensure_schema};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Create the expenses table if it doesn't exist
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to connect to database")?;

    ensure_schema(&pool)
        .await
        .context("Failed to create expenses table")?;

    pool.close().await;
    tracing::info!("expenses table ready");
    Ok(())
}
