//! Configurable path resolver for the server's config and documents.
//!
//! `PathResolver` locates directories using environment variables,
//! directory markers found by walking up from the running binary, and
//! fallback paths.
//!
//! # Example
//!
//! ```no_run
//! use mdctx_core::util::resolver::PathResolver;
//!
//! let resolver = PathResolver::new("markdown-context")
//!     .with_docs_marker("docs/payment-api-guides");
//!
//! // Checks MARKDOWN_CONTEXT_DOCS_DIR, then walks up from the binary
//! if let Some(docs) = resolver.docs_dir() {
//!     println!("Docs: {:?}", docs);
//! }
//! ```

use std::env;
use std::path::PathBuf;

use crate::util::paths::{binary_dir, expand_tilde, find_dir_with_marker};

/// Configurable path resolver for a specific project.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Project name (e.g., "markdown-context")
    project_name: String,
    /// Environment variable prefix (e.g., "MARKDOWN_CONTEXT")
    env_prefix: String,
    /// Marker path identifying the documents directory (e.g., "docs/payment-api-guides")
    docs_marker: Option<String>,
    /// Fallback documents path (expanded with tilde)
    docs_fallback: Option<PathBuf>,
}

impl PathResolver {
    /// Create a new resolver for the given project name.
    ///
    /// The project name is converted to an environment variable prefix:
    /// - "markdown-context" → "MARKDOWN_CONTEXT"
    /// - "my_project" → "MY_PROJECT"
    pub fn new(project_name: &str) -> Self {
        let env_prefix = project_name.to_uppercase().replace(['-', ' '], "_");

        Self {
            project_name: project_name.to_string(),
            env_prefix,
            docs_marker: None,
            docs_fallback: None,
        }
    }

    /// Set the marker path that identifies the documents directory.
    pub fn with_docs_marker(mut self, marker: &str) -> Self {
        self.docs_marker = Some(marker.to_string());
        self
    }

    /// Set a fallback path for the documents directory (supports ~ expansion).
    pub fn with_docs_fallback(mut self, path: &str) -> Self {
        self.docs_fallback = Some(expand_tilde(path));
        self
    }

    /// Get the environment variable name for a given suffix.
    ///
    /// # Example
    /// ```
    /// use mdctx_core::util::resolver::PathResolver;
    ///
    /// let resolver = PathResolver::new("markdown-context");
    /// assert_eq!(resolver.env_var("DOCS_DIR"), "MARKDOWN_CONTEXT_DOCS_DIR");
    /// ```
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// Resolve the config directory.
    ///
    /// Checks in order:
    /// 1. `{PROJECT}_CONFIG_DIR` environment variable
    /// 2. Platform config directory joined with the project name
    pub fn config_dir(&self) -> Option<PathBuf> {
        if let Some(path) = self.env_path("CONFIG_DIR") {
            return Some(path);
        }

        dirs::config_dir().map(|dir| dir.join(&self.project_name))
    }

    /// Resolve the documents directory.
    ///
    /// Checks in order:
    /// 1. `{PROJECT}_DOCS_DIR` environment variable
    /// 2. Walk up from the binary looking for the docs marker
    /// 3. Fallback path (if configured and present)
    pub fn docs_dir(&self) -> Option<PathBuf> {
        if let Some(path) = self.env_path("DOCS_DIR") {
            return Some(path);
        }

        if let (Some(bin_dir), Some(marker)) = (binary_dir(), &self.docs_marker) {
            if let Some(root) = find_dir_with_marker(&bin_dir, marker) {
                return Some(root.join(marker));
            }
        }

        if let Some(fallback) = &self.docs_fallback {
            if fallback.exists() {
                return Some(fallback.clone());
            }
        }

        None
    }

    /// Get the project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Get the environment variable prefix.
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    fn env_path(&self, suffix: &str) -> Option<PathBuf> {
        let name = self.env_var(suffix);
        let value = env::var(&name).ok()?;
        let path = expand_tilde(&value);
        if path.exists() {
            log::debug!("{name} -> {}", path.display());
            Some(path)
        } else {
            log::warn!("{name} points at missing path {}", path.display());
            None
        }
    }
}
