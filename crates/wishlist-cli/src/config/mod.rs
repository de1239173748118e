//! CLI configuration.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, timeouts
//! ├── middleware: MiddlewareConfig # CORS
//! └── service: ServiceConfig       # Record store, token keys
//! ```
//!
//! Every option can be given as an argument or an environment variable.
//! Use `--help` to list them.

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wishlist_server::service::{ServiceConfig, StorageBackend};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "wishlist")]
#[command(about = "Infrastructure wishlist server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration.
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Record store and token verification configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads a `.env` file (when enabled) and parses the arguments.
    ///
    /// The file is loaded first so its variables act as argument defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with `RUST_LOG` filtering, defaulting to `info`.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        Ok(())
    }

    /// Logs the configuration without secrets.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            dotenv = cfg!(feature = "dotenv"),
            "Build information"
        );

        self.server.log();
        self.middleware.log();

        match self.service.storage_backend {
            StorageBackend::Postgres => tracing::info!(
                target: TRACING_TARGET_CONFIG,
                storage_backend = %self.service.storage_backend,
                postgres_max_connections = self.service.postgres.postgres_max_connections,
                postgres_connection_timeout_secs = ?self.service.postgres.postgres_connection_timeout_secs,
                "Store configuration"
            ),
            StorageBackend::Memory => tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                storage_backend = %self.service.storage_backend,
                "Records are kept in memory and lost on restart"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_memory_backend() {
        let cli = Cli::try_parse_from([
            "wishlist",
            "--jwt-secret",
            "0123456789abcdef0123456789abcdef",
            "--storage-backend",
            "memory",
            "--port",
            "8080",
        ])
        .unwrap();

        assert_eq!(cli.service.storage_backend, StorageBackend::Memory);
        assert_eq!(cli.server.port, 8080);
        assert!(cli.validate().is_ok());
    }
}
