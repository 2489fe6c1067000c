//! Utility modules for path handling.
//!
//! # Modules
//!
//! - [`paths`]: Generic path utilities (binary location, tilde expansion)
//! - [`resolver`]: Configurable directory resolution

pub mod paths;
pub mod resolver;
