//! REST API server for the course roster.
//!
//! Wires the in-memory store to the HTTP router, parses command-line
//! configuration, and shuts down on Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser};
use roster_api::{router::Router, server::Server};
use roster_core::config::{DbConfig, LiveConfig, DEFAULT_MAX_STUDENTS_PER_COURSE};
use roster_core::Database;
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the roster server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Maximum number of students per course
    #[arg(long, default_value_t = DEFAULT_MAX_STUDENTS_PER_COURSE)]
    max_students_per_course: usize,

    /// Answer 404 when the `id` list filter names no course
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    strict_id_filter: bool,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,
}

impl Args {
    fn db_config(&self) -> DbConfig {
        DbConfig {
            max_students_per_course: self.max_students_per_course,
            strict_id_filter: self.strict_id_filter,
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing subscriber for logging (RUST_LOG overrides the level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(LiveConfig::new(args.db_config()));
    let db = Arc::new(Database::with_config(config));

    let router = Router::new(db);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;
    let server = Server::new(addr, router);

    tracing::info!(
        host = %args.host,
        port = args.port,
        max_students_per_course = args.max_students_per_course,
        strict_id_filter = args.strict_id_filter,
        request_timeout_ms = args.request_timeout_ms,
        "Starting roster server"
    );

    // Start server with graceful shutdown
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    // Wait for Ctrl+C
    signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c")?;
    tracing::info!("Shutting down server...");
    server_handle.abort();

    Ok(())
}
