//! Server configuration.
//!
//! Configuration is read from a TOML file and is entirely optional: every
//! field has a default, and a missing implicit config file means "use the
//! defaults".
//!
//! ```toml
//! [server]
//! name = "markdown-context-server"
//! instructions = "Call get_payment_context before writing payment code."
//!
//! [documents]
//! dir = "~/payment-api-guides"
//! read_timeout_ms = 5000
//! verify_on_startup = true
//!
//! [read_file]
//! allow_any_path = false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::paths::expand_tilde;
use crate::util::resolver::PathResolver;

/// Project name used for env var prefixes and the platform config dir.
pub const PROJECT_NAME: &str = "markdown-context";

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Location of the guides relative to the installation root.
pub const DOCS_MARKER: &str = "docs/payment-api-guides";

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server metadata reported during the MCP handshake.
    pub server: ServerSection,
    /// Where the guides live and how they are read.
    pub documents: DocumentsSection,
    /// Policy for the `read_markdown_file` tool.
    pub read_file: ReadFileSection,
}

/// `[server]` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
    /// Optional usage instructions sent to the client.
    pub instructions: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: "markdown-context-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }
}

/// `[documents]` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsSection {
    /// Explicit documents directory (tilde-expanded).
    pub dir: Option<String>,
    /// Upper bound for a single document read, in milliseconds.
    pub read_timeout_ms: u64,
    /// Refuse to start when a bound document is missing.
    pub verify_on_startup: bool,
}

impl Default for DocumentsSection {
    fn default() -> Self {
        Self {
            dir: None,
            read_timeout_ms: 5_000,
            verify_on_startup: true,
        }
    }
}

/// `[read_file]` section.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadFileSection {
    /// Allow `read_markdown_file` to read paths outside the documents directory.
    pub allow_any_path: bool,
}

impl Config {
    /// Path resolver configured for this project.
    pub fn resolver() -> PathResolver {
        let cwd_docs = Path::new(".").join(DOCS_MARKER);
        PathResolver::new(PROJECT_NAME)
            .with_docs_marker(DOCS_MARKER)
            .with_docs_fallback(&cwd_docs.to_string_lossy())
    }

    /// Resolve which config file would be read.
    ///
    /// An explicit path wins; otherwise `config.toml` in the resolved
    /// config directory.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(expand_tilde(path)),
            None => Self::resolver()
                .config_dir()
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. An implicit path that does not exist
    /// yields the defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            log::debug!("No config directory on this platform, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Per-read timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.documents.read_timeout_ms)
    }

    /// Resolve the documents directory.
    ///
    /// Order: `override_dir`, `[documents].dir`, then the [`PathResolver`]
    /// chain (env var, binary location, current directory).
    pub fn resolve_docs_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.documents.dir {
            return Ok(expand_tilde(dir));
        }
        let resolver = Self::resolver();
        resolver.docs_dir().ok_or_else(|| {
            Error::config(format!(
                "Could not locate the documents directory; set {} or [documents].dir",
                resolver.env_var("DOCS_DIR")
            ))
        })
    }
}
