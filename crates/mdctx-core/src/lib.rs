//! Markdown context core - shared types, errors, configuration, and utilities.
//!
//! This crate provides the foundational types used across all markdown
//! context crates. It has no internal dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`capability`]: The three capability kinds (tool, prompt, resource)
//! - [`config`]: TOML-backed server configuration
//! - [`error`]: Error types and Result alias
//! - [`util`]: Path resolution and filesystem helpers

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod capability;
pub mod config;
pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use capability::CapabilityKind;
pub use config::Config;
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::resolver::PathResolver;
