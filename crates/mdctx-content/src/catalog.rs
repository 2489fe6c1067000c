//! Document keys and their file bindings.

use std::fmt;
use std::path::{Path, PathBuf};

use mdctx_core::{Error, Result};

/// Opaque name for one physical document (e.g. `"api_spec"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Create a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for DocumentKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Ordered binding of document keys to file names under a documents root.
///
/// Declaration order is preserved; it is the order the "all documents"
/// recipe uses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentCatalog {
    entries: Vec<(DocumentKey, PathBuf)>,
}

impl DocumentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five payment API guides.
    pub fn payment_guides() -> Self {
        Self {
            entries: vec![
                ("payment_flow".into(), PathBuf::from("get_payment_flow.md")),
                ("api_spec".into(), PathBuf::from("get_api_specification.md")),
                (
                    "encryption_spec".into(),
                    PathBuf::from("get_encryption_specification.md"),
                ),
                (
                    "signature_guide".into(),
                    PathBuf::from("get_signature_guide.md"),
                ),
                ("error_codes".into(), PathBuf::from("get_error_codes.md")),
            ],
        }
    }

    /// Bind a key to a file path relative to the documents root.
    ///
    /// Fails if the key is already bound.
    pub fn bind(
        mut self,
        key: impl Into<DocumentKey>,
        file: impl AsRef<Path>,
    ) -> Result<Self> {
        let key = key.into();
        if self.contains(&key) {
            return Err(Error::config(format!("document key '{key}' bound twice")));
        }
        self.entries.push((key, file.as_ref().to_path_buf()));
        Ok(self)
    }

    /// Relative file bound to `key`.
    pub fn file(&self, key: &DocumentKey) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, file)| file.as_path())
    }

    /// Whether `key` is bound.
    pub fn contains(&self, key: &DocumentKey) -> bool {
        self.file(key).is_some()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &DocumentKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// `(key, file)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&DocumentKey, &Path)> {
        self.entries.iter().map(|(k, f)| (k, f.as_path()))
    }

    /// Number of bound documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no documents are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
