//! expensectl - expense tracking service and client
//!
//! - `serve`: run the HTTP API (Basic Auth, Postgres storage)
//! - `migrate`: create the expenses table and exit
//! - `expenses`: create/get/update/list against a running server

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "expensectl",
    author,
    version,
    about = "Expense tracking API server and client",
    long_about = "Serve a JSON CRUD API for expenses backed by Postgres, \
                  or talk to a running server from the command line."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the expenses table if missing
    Migrate(commands::migrate::MigrateArgs),
    /// Call a running expense API
    Expenses(commands::expenses::ExpensesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Expenses(args) => commands::run_expenses(args).await?,
    }
    Ok(())
}
