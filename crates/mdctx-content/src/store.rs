//! Document store accessor.
//!
//! [`DocumentStore`] resolves a [`DocumentKey`] to a file under the
//! documents root and reads it through a [`DocumentSource`]. Nothing is
//! cached: every fetch goes back to the source, so callers always see the
//! current file content.
//!
//! The store also serves the arbitrary-path read used by the
//! `read_markdown_file` tool, gated by a [`ReadPolicy`].

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mdctx_core::{Error, Result};

use crate::catalog::{DocumentCatalog, DocumentKey};

// ============================================================================
// DocumentSource
// ============================================================================

/// Where document text comes from.
///
/// Implementations must map a missing file to [`Error::NotFound`] and any
/// other failure to [`Error::Io`], keeping the original cause. No retries.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Read the full text at `path`.
    async fn fetch(&self, path: &Path) -> Result<String>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Reads UTF-8 files from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsDocumentSource;

#[async_trait]
impl DocumentSource for FsDocumentSource {
    async fn fetch(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(e, path))
    }

    fn name(&self) -> &str {
        "fs"
    }
}

// ============================================================================
// ReadPolicy
// ============================================================================

/// Which paths the arbitrary-file read may touch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Only paths that resolve inside the documents root. Relative paths are
    /// resolved against the root.
    #[default]
    Confined,
    /// Any path the caller supplies.
    Unrestricted,
}

// ============================================================================
// DocumentStore
// ============================================================================

/// Key-addressed, uncached access to the documents directory.
#[derive(Clone)]
pub struct DocumentStore {
    root: PathBuf,
    catalog: DocumentCatalog,
    source: Arc<dyn DocumentSource>,
    policy: ReadPolicy,
    read_timeout: Option<Duration>,
}

impl DocumentStore {
    /// Create a filesystem-backed store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, catalog: DocumentCatalog) -> Self {
        Self {
            root: root.into(),
            catalog,
            source: Arc::new(FsDocumentSource),
            policy: ReadPolicy::default(),
            read_timeout: None,
        }
    }

    /// Replace the read source.
    pub fn with_source<S: DocumentSource + 'static>(mut self, source: S) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Set the arbitrary-path read policy.
    pub fn with_policy(mut self, policy: ReadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound every read; expiry surfaces as [`Error::Io`] with `TimedOut`.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Documents root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Key bindings.
    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }

    /// Arbitrary-path read policy.
    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    /// Absolute path bound to `key`.
    pub fn path_for(&self, key: &DocumentKey) -> Result<PathBuf> {
        self.catalog
            .file(key)
            .map(|file| self.root.join(file))
            .ok_or_else(|| Error::config(format!("document key '{key}' is not bound")))
    }

    /// Read the document bound to `key`.
    pub async fn fetch(&self, key: &DocumentKey) -> Result<String> {
        let path = self.path_for(key)?;
        log::debug!("fetch {key} <- {}", path.display());
        self.read(&path).await
    }

    /// Read a caller-supplied path, subject to the store's [`ReadPolicy`].
    ///
    /// The read timeout covers path resolution as well as the read.
    pub async fn fetch_path(&self, requested: &str) -> Result<String> {
        let work = async {
            let path = self.authorize(requested).await?;
            log::debug!("fetch_path {requested} -> {}", path.display());
            self.source.fetch(&path).await
        };
        self.bounded(Path::new(requested), work).await
    }

    /// Check that every bound document can be read.
    ///
    /// All failures are collected into one [`Error::Config`].
    pub async fn verify(&self) -> Result<()> {
        let mut problems = Vec::new();
        for (key, _) in self.catalog.iter() {
            if let Err(e) = self.fetch(key).await {
                problems.push(format!("{key}: {e}"));
            }
        }

        if problems.is_empty() {
            log::info!(
                "Verified {} documents under {}",
                self.catalog.len(),
                self.root.display()
            );
            Ok(())
        } else {
            Err(Error::config(format!(
                "unresolved documents under {}: {}",
                self.root.display(),
                problems.join("; ")
            )))
        }
    }

    async fn read(&self, path: &Path) -> Result<String> {
        self.bounded(path, self.source.fetch(path)).await
    }

    async fn bounded<F>(&self, path: &Path, work: F) -> Result<String>
    where
        F: Future<Output = Result<String>>,
    {
        match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| Error::Io {
                    path: path.to_path_buf(),
                    source: io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("read exceeded {limit:?}"),
                    ),
                })?,
            None => work.await,
        }
    }

    async fn authorize(&self, requested: &str) -> Result<PathBuf> {
        if requested.trim().is_empty() {
            return Err(Error::invalid_arguments("file path must not be empty"));
        }

        let requested = PathBuf::from(requested);
        if self.policy == ReadPolicy::Unrestricted {
            return Ok(requested);
        }

        let candidate = if requested.is_absolute() {
            requested
        } else {
            self.root.join(requested)
        };

        let root = tokio::fs::canonicalize(&self.root)
            .await
            .map_err(|e| Error::io_with_path(e, &self.root))?;

        match tokio::fs::canonicalize(&candidate).await {
            Ok(resolved) if resolved.starts_with(&root) => Ok(resolved),
            Ok(_) => Err(Error::AccessDenied { path: candidate }),
            Err(e) => {
                // Report escapes as denials even when the target is absent.
                let lexical = normalize_lexically(&absolute(&candidate)?);
                let base = normalize_lexically(&absolute(&self.root)?);
                if lexical.starts_with(&root) || lexical.starts_with(&base) {
                    Err(Error::io_with_path(e, &candidate))
                } else {
                    Err(Error::AccessDenied { path: candidate })
                }
            }
        }
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("root", &self.root)
            .field("documents", &self.catalog.len())
            .field("source", &self.source.name())
            .field("policy", &self.policy)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::io_with_path(e, path))
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
