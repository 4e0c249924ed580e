//! HTTP server command
//!
//! Bootstrap order: connect pool, ensure schema, register routes, listen.
//! Any failure before listening aborts the process.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use expense_server::db::{create_pool_with_options, ensure_schema, pool::DEFAULT_MAX_CONNECTIONS};
use expense_server::http::server::DEFAULT_PORT;
use expense_server::{run_server, BasicAuth, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Basic Auth username accepted by the API
    #[arg(long, env = "AUTH_USERNAME")]
    pub auth_username: String,

    /// Basic Auth password accepted by the API
    #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
    pub auth_password: String,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: self.cors_permissive,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!("Starting expense server on {}", config.bind_addr);

    let pool = create_pool_with_options(&args.database_url, args.max_connections)
        .await
        .context("Failed to connect to database")?;

    ensure_schema(&pool)
        .await
        .context("Failed to create expenses table")?;

    let auth = BasicAuth::new(args.auth_username, args.auth_password);

    // Blocks until shutdown
    run_server(pool, auth, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_into_config() {
        let args = ServeArgs::try_parse_from([
            "serve",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--database-url",
            "postgres://localhost/expenses",
            "--auth-username",
            "apidesign",
            "--auth-password",
            "45678",
        ])
        .unwrap();

        let config = args.server_config();
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert!(!config.cors_permissive);
        assert_eq!(args.max_connections, DEFAULT_MAX_CONNECTIONS);
    }
}
