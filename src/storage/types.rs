//! Storage Data Types
//!
//! Defines the stored entities (blob objects and provenance records), the key
//! they are joined on, and the error types surfaced by the store capabilities.

use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content type tagged on every ingested export.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Identifier shared by the content store and the provenance store.
///
/// Derived from the transient export URL (see `ingestion::key`). Two exports that
/// end in the same path segment map to the same key and overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StorageKey(pub String);

impl StorageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StorageKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A blob held by the content store, with the content type it is served under.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: StorageKey,
    pub bytes: Bytes,
    pub content_type: String,
}

/// Maps a storage key back to the design link it was ingested from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceRecord {
    pub key: StorageKey,
    pub source_url: String,
}

/// One page of a store listing.
///
/// Keys are in ascending order. `cursor` is `Some` when more keys remain; passing
/// it back to `list` resumes after the last key of this page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub keys: Vec<StorageKey>,
    pub cursor: Option<String>,
}

/// Sidecar metadata persisted next to a blob by the directory-backed store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub content_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unreadable metadata for {key}: {source}")]
    Metadata {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of the dual write performed by `StorageWriter`.
///
/// Neither write is rolled back when the other fails.
#[derive(Debug, thiserror::Error)]
pub enum WriteFailure {
    #[error("content store write failed for {key}: {source}")]
    Content {
        key: StorageKey,
        #[source]
        source: StoreError,
    },
    #[error("provenance store write failed for {key}: {source}")]
    Provenance {
        key: StorageKey,
        #[source]
        source: StoreError,
    },
    #[error("both store writes failed for {key}: content: {content}; provenance: {provenance}")]
    Both {
        key: StorageKey,
        content: StoreError,
        provenance: StoreError,
    },
}

/// Read-side outcome shared by the serving and provenance paths.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The key is not present. A normal outcome, mapped to 404.
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}
