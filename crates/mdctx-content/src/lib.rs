//! Document access and aggregation for the markdown context server.
//!
//! This crate knows nothing about MCP. It resolves logical document keys to
//! files, reads them, and stitches several documents into one composite
//! body.
//!
//! # Modules
//!
//! - [`catalog`]: Document keys and their file bindings
//! - [`store`]: The document store accessor and its read sources
//! - [`recipe`]: Aggregation recipes (ordered sections plus header/footer)
//! - [`aggregate`]: The aggregation engine
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mdctx_content::{AggregationEngine, AggregationRecipe, DocumentCatalog, DocumentStore};
//!
//! # async fn run() -> mdctx_core::Result<()> {
//! let store = DocumentStore::new("docs/payment-api-guides", DocumentCatalog::payment_guides());
//! let engine = AggregationEngine::new(Arc::new(store));
//!
//! let recipe = AggregationRecipe::headed()
//!     .section("Encryption Specification", "encryption_spec")
//!     .section("API Specification", "api_spec");
//!
//! let composite = engine.aggregate(&recipe).await?;
//! println!("{}", composite.text());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod catalog;
pub mod recipe;
pub mod store;

pub use aggregate::{AggregationEngine, CompositeDocument};
pub use catalog::{DocumentCatalog, DocumentKey};
pub use recipe::{AggregationRecipe, Section, SectionStyle};
pub use store::{DocumentSource, DocumentStore, FsDocumentSource, ReadPolicy};
