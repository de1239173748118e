#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use wishlist_server::handler::routes;
use wishlist_server::middleware::RouterExt;
use wishlist_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "wishlist_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "wishlist_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "wishlist_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .await
        .context("failed to create service state")?;
    let router = create_router(state, &cli.middleware, &cli.server);

    server::serve(router, cli.server).await?;
    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// The last layer added is the outermost: error handling wraps observability,
/// which wraps the security layers around the routes.
fn create_router(
    state: ServiceState,
    middleware: &MiddlewareConfig,
    server: &config::ServerConfig,
) -> Router {
    routes(state.clone())
        .with_state(state)
        .with_security_layer(&middleware.cors)
        .with_observability_layer()
        .with_error_handling_layer(server.request_timeout())
}
