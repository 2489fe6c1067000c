//! Markdown context server
//!
//! Serves the payment API guides to MCP clients over stdio. Stdout carries
//! protocol frames only; all diagnostics go to stderr.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mdctx_content::{DocumentCatalog, DocumentStore, ReadPolicy};
use mdctx_core::Config;
use mdctx_mcp::{CapabilityDispatcher, DocsMcpServer, ServerConfig, table};
use tracing_subscriber::EnvFilter;

/// Markdown context server - payment API guides over MCP
#[derive(Parser, Debug)]
#[command(name = "markdown-context-server", version)]
#[command(about = "Serve payment API guides as MCP tools, prompts, and resources", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Documents directory (overrides configuration and environment)
    #[arg(long, global = true)]
    docs_dir: Option<PathBuf>,

    /// Let read_markdown_file read paths outside the documents directory
    #[arg(long, global = true)]
    allow_any_path: bool,

    /// Log filter, e.g. "debug" or "mdctx_content=trace" (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Serve over stdio (default)
    Serve,
    /// Verify every document and print the bindings
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let store = build_store(&config, &args)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, store).await,
        Command::Check => check(store).await,
    }
}

/// Install the stderr subscriber. `log` records from the libraries are
/// forwarded through it.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_store(config: &Config, args: &Args) -> Result<DocumentStore> {
    let docs_dir = config
        .resolve_docs_dir(args.docs_dir.as_deref())
        .context("Failed to resolve the documents directory")?;

    let policy = if args.allow_any_path || config.read_file.allow_any_path {
        tracing::warn!("read_markdown_file may read any path");
        ReadPolicy::Unrestricted
    } else {
        ReadPolicy::Confined
    };

    let mut store = DocumentStore::new(docs_dir, DocumentCatalog::payment_guides()).with_policy(policy);
    if config.documents.read_timeout_ms > 0 {
        store = store.with_read_timeout(config.read_timeout());
    }
    Ok(store)
}

async fn serve(config: &Config, store: DocumentStore) -> Result<()> {
    tracing::info!("Documents root: {}", store.root().display());

    if config.documents.verify_on_startup {
        store
            .verify()
            .await
            .context("Document verification failed")?;
    }

    let dispatcher = CapabilityDispatcher::payment_docs(store)?;
    DocsMcpServer::new(dispatcher)
        .with_config(ServerConfig::from(&config.server))
        .serve_stdio()
        .await?;

    tracing::info!("Markdown context server stopped");
    Ok(())
}

async fn check(store: DocumentStore) -> Result<()> {
    println!("Documents root: {}", store.root().display());
    for (key, file) in store.catalog().iter() {
        let uri = table::resource_uri(key).unwrap_or("-");
        println!("  {key:<16} {uri:<28} {}", file.display());
    }

    store.verify().await?;
    println!("All {} documents readable", store.catalog().len());
    Ok(())
}
