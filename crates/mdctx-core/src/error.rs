//! Error types for the markdown context server.
//!
//! A single taxonomy is shared by the document store, the aggregation
//! engine, and the capability dispatcher so that every request kind can be
//! turned into the same client-visible error shape.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::capability::CapabilityKind;

/// Result type alias for markdown context operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, reading, or aggregating documents.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The document (or requested file) does not exist.
    #[error("Document not found: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The identifier is not registered for this capability kind.
    #[error("Unknown {kind}: {id}")]
    UnknownCapability {
        /// Kind that was looked up
        kind: CapabilityKind,
        /// Identifier that was not found
        id: String,
    },

    /// One section of a recipe could not be fetched; nothing was rendered.
    #[error("Aggregation failed at section '{key}': {source}")]
    AggregationFailed {
        /// First failing document key, in recipe order
        key: String,
        /// Underlying fetch failure
        #[source]
        source: Box<Error>,
    },

    /// Filesystem failure other than absence (permissions, encoding, timeout).
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Original cause
        #[source]
        source: io::Error,
    },

    /// Two capabilities of the same kind share an identifier.
    #[error("Duplicate {kind} registration: {id}")]
    DuplicateCapability {
        /// Kind being registered
        kind: CapabilityKind,
        /// Conflicting identifier
        id: String,
    },

    /// Call arguments do not match what the capability accepts.
    #[error("Invalid arguments: {message}")]
    InvalidArguments {
        /// What is wrong with the arguments
        message: String,
    },

    /// A path escapes the directory reads are confined to.
    #[error("Access denied: {} is outside the documents root", path.display())]
    AccessDenied {
        /// Path that was rejected
        path: PathBuf,
    },

    /// Configuration error (bad config file, unbound document key, ...).
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

impl Error {
    /// Creates a not-found error for a path.
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Error::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Wraps an I/O error, mapping `ErrorKind::NotFound` to [`Error::NotFound`].
    pub fn io_with_path(source: io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound { path }
        } else {
            Error::Io { path, source }
        }
    }

    /// Creates an unknown-capability error.
    pub fn unknown(kind: CapabilityKind, id: impl Into<String>) -> Self {
        Error::UnknownCapability {
            kind,
            id: id.into(),
        }
    }

    /// Wraps a section fetch failure.
    pub fn aggregation_failed(key: impl Into<String>, cause: Error) -> Self {
        Error::AggregationFailed {
            key: key.into(),
            source: Box::new(cause),
        }
    }

    /// Creates an invalid-arguments error.
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Error::InvalidArguments {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Follows `AggregationFailed` wrappers down to the fetch failure.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::AggregationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Stable snake_case tag for this error, used in client error data.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "not_found",
            Error::UnknownCapability { .. } => "unknown_capability",
            Error::AggregationFailed { .. } => "aggregation_failed",
            Error::Io { .. } => "io",
            Error::DuplicateCapability { .. } => "duplicate_capability",
            Error::InvalidArguments { .. } => "invalid_arguments",
            Error::AccessDenied { .. } => "access_denied",
            Error::Config { .. } => "config",
        }
    }
}
