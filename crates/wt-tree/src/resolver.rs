//! Document resolution for elements without inline content.
//!
//! Text elements normally carry their document inline. When one does not, the
//! walk asks a [`DocumentResolver`] once for that element. Resolution is
//! synchronous: callers either pre-fetch into [`StaticDocuments`] or point
//! [`DirDocuments`] at a directory of `<uuid>.json` files.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::rich_text::RichText;

/// Error returned when a document exists but cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Identifier cannot be used as a file name.
    #[error("Invalid document identifier: {0:?}")]
    InvalidId(String),
    /// I/O error reading the document.
    #[error("I/O error reading document {uuid}: {source}")]
    Io {
        uuid: String,
        #[source]
        source: std::io::Error,
    },
    /// Document is not valid rich text JSON.
    #[error("Invalid document {uuid}: {source}")]
    Decode {
        uuid: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Supplies documents by resource identifier.
pub trait DocumentResolver: Send + Sync {
    /// Look up the document of resource `uuid`.
    ///
    /// Returns `Ok(None)` when the resource has no document.
    fn resolve(&self, uuid: &str) -> Result<Option<RichText>, DocumentError>;
}

/// Resolver that never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDocuments;

impl DocumentResolver for NoDocuments {
    fn resolve(&self, _uuid: &str) -> Result<Option<RichText>, DocumentError> {
        Ok(None)
    }
}

/// In-memory resolver over pre-fetched documents.
#[derive(Clone, Debug, Default)]
pub struct StaticDocuments {
    documents: HashMap<String, RichText>,
}

impl StaticDocuments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document for a resource.
    #[must_use]
    pub fn with_document(mut self, uuid: impl Into<String>, content: impl Into<RichText>) -> Self {
        self.documents.insert(uuid.into(), content.into());
        self
    }
}

impl DocumentResolver for StaticDocuments {
    fn resolve(&self, uuid: &str) -> Result<Option<RichText>, DocumentError> {
        Ok(self.documents.get(uuid).cloned())
    }
}

/// Resolver reading `<dir>/<uuid>.json` files.
#[derive(Clone, Debug)]
pub struct DirDocuments {
    dir: PathBuf,
}

impl DirDocuments {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentResolver for DirDocuments {
    fn resolve(&self, uuid: &str) -> Result<Option<RichText>, DocumentError> {
        if uuid.is_empty() || uuid.contains(['/', '\\']) || uuid.starts_with('.') {
            return Err(DocumentError::InvalidId(uuid.to_owned()));
        }

        let path = self.dir.join(format!("{uuid}.json"));
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(uuid, path = %path.display(), "No document file");
                return Ok(None);
            }
            Err(source) => {
                return Err(DocumentError::Io {
                    uuid: uuid.to_owned(),
                    source,
                });
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| DocumentError::Decode {
                uuid: uuid.to_owned(),
                source,
            })
    }
}
