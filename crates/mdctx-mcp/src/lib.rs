//! MCP server for the payment API guides.
//!
//! Exposes a fixed set of markdown documents as tools, prompts, and
//! resources over stdio.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          mdctx-mcp                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  DocsMcpServer - rmcp ServerHandler, stdio transport         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  CapabilityDispatcher - six request kinds, error shaping     │
//! │  McpErrorExt - mdctx_core::Error → rmcp::ErrorData           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  CapabilityRegistry - (kind, id) → action + descriptor       │
//! │  CapabilityTable - declarative payment guides table          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  mdctx-content: AggregationEngine, DocumentStore             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use mdctx_content::{DocumentCatalog, DocumentStore};
//! use mdctx_mcp::{CapabilityDispatcher, DocsMcpServer};
//!
//! # async fn run() -> mdctx_mcp::Result<()> {
//! let store = DocumentStore::new("docs/payment-api-guides", DocumentCatalog::payment_guides());
//! let dispatcher = CapabilityDispatcher::payment_docs(store)?;
//!
//! DocsMcpServer::new(dispatcher)
//!     .with_name("markdown-context-server")
//!     .serve_stdio()
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod server;
pub mod table;

// Re-exports - registry
pub use registry::{
    CapabilityAction, CapabilityDescriptor, CapabilityEntry, CapabilityRegistry, CapabilityTable,
    MARKDOWN_MIME_TYPE,
};

// Re-exports - dispatch and server
pub use dispatcher::CapabilityDispatcher;
pub use server::{DocsMcpServer, ServerConfig};

// Re-exports - error
pub use error::{Error, McpErrorExt, Result};
