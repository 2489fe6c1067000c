//! Error types for mdctx-mcp, and the single conversion from
//! [`mdctx_core::Error`] to the client-visible [`ErrorData`].

use mdctx_core::CapabilityKind;
use rmcp::model::{ErrorCode, ErrorData};
use serde_json::json;
use thiserror::Error;

/// Result type alias for mdctx-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting or running the server.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from mdctx-core
    #[error("Core error: {0}")]
    Core(#[from] mdctx_core::Error),

    /// The stdio session could not be established or ended abnormally.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Creates a transport error.
    pub fn transport(message: impl std::fmt::Display) -> Self {
        Error::Transport(message.to_string())
    }
}

/// Conversion of domain errors into JSON-RPC error payloads.
///
/// The message is the error's display text. `data` carries the stable error
/// kind and the capability kind of the failed request.
pub trait McpErrorExt {
    /// Build the [`ErrorData`] sent for a failed `capability` request.
    fn to_mcp_error(&self, capability: CapabilityKind) -> ErrorData;
}

impl McpErrorExt for mdctx_core::Error {
    fn to_mcp_error(&self, capability: CapabilityKind) -> ErrorData {
        use mdctx_core::Error as E;

        let code = match self {
            E::NotFound { .. } => ErrorCode::RESOURCE_NOT_FOUND,
            E::UnknownCapability {
                kind: CapabilityKind::Resource,
                ..
            } => ErrorCode::RESOURCE_NOT_FOUND,
            E::UnknownCapability { .. } | E::InvalidArguments { .. } | E::AccessDenied { .. } => {
                ErrorCode::INVALID_PARAMS
            }
            _ => ErrorCode::INTERNAL_ERROR,
        };

        let data = json!({
            "kind": self.kind_name(),
            "capability": capability.as_str(),
        });

        ErrorData::new(code, self.to_string(), Some(data))
    }
}

// ============================================================================
// Tests
// ============================================================================
