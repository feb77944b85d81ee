//! Directory-backed Stores
//!
//! Layout under the configured root:
//! - `objects/<key>`: blob bytes
//! - `meta/<key>.json`: `ObjectMetadata` sidecar (content type)
//! - `provenance/<key>`: source URL as UTF-8 text
//! - `tmp/`: staging area; every write lands here first and is renamed into place
//!
//! Keys are used verbatim as file names, so anything that could escape the
//! directory is rejected.

use super::store::{ContentStore, ProvenanceStore, paginate};
use super::types::{
    ListPage, ObjectMetadata, ProvenanceRecord, StorageKey, StoreError, StoredObject,
};

use async_trait::async_trait;
use axum::body::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Served when a blob exists but its metadata sidecar does not.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let forbidden = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);

    if forbidden {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

pub struct DiskContentStore {
    objects_dir: PathBuf,
    meta_dir: PathBuf,
    tmp_dir: PathBuf,
}

impl DiskContentStore {
    /// Opens (creating if needed) a content store rooted at `root`.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let store = Self {
            objects_dir: root.join("objects"),
            meta_dir: root.join("meta"),
            tmp_dir: root.join("tmp"),
        };

        tokio::fs::create_dir_all(&store.objects_dir).await?;
        tokio::fs::create_dir_all(&store.meta_dir).await?;
        tokio::fs::create_dir_all(&store.tmp_dir).await?;

        tracing::info!("Content store opened at {}", root.display());
        Ok(store)
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.meta_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl ContentStore for DiskContentStore {
    async fn put(&self, object: StoredObject) -> Result<(), StoreError> {
        validate_key(object.key.as_str())?;

        let metadata = ObjectMetadata {
            content_type: object.content_type.clone(),
        };
        let metadata_json = serde_json::to_vec(&metadata).map_err(|source| {
            StoreError::Metadata {
                key: object.key.0.clone(),
                source,
            }
        })?;

        write_atomic(&self.tmp_dir, &self.meta_path(object.key.as_str()), &metadata_json).await?;
        write_atomic(
            &self.tmp_dir,
            &self.objects_dir.join(object.key.as_str()),
            &object.bytes,
        )
        .await?;

        tracing::debug!("Wrote object {} ({} bytes)", object.key, object.bytes.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StoreError> {
        if validate_key(key).is_err() {
            return Ok(None);
        }

        let bytes = match read_optional(&self.objects_dir.join(key)).await? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let content_type = match read_optional(&self.meta_path(key)).await? {
            Some(raw) => {
                let metadata: ObjectMetadata =
                    serde_json::from_slice(&raw).map_err(|source| StoreError::Metadata {
                        key: key.to_string(),
                        source,
                    })?;
                metadata.content_type
            }
            None => {
                tracing::warn!("Object {} has no metadata sidecar", key);
                FALLBACK_CONTENT_TYPE.to_string()
            }
        };

        Ok(Some(StoredObject {
            key: StorageKey::from(key),
            bytes: Bytes::from(bytes),
            content_type,
        }))
    }

    async fn list(
        &self,
        prefix: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<ListPage, StoreError> {
        let keys = list_dir_keys(&self.objects_dir).await?;
        Ok(paginate(keys, prefix, cursor, limit))
    }
}

pub struct DiskProvenanceStore {
    records_dir: PathBuf,
    tmp_dir: PathBuf,
}

impl DiskProvenanceStore {
    /// Opens (creating if needed) a provenance store rooted at `root`.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let store = Self {
            records_dir: root.join("provenance"),
            tmp_dir: root.join("tmp"),
        };

        tokio::fs::create_dir_all(&store.records_dir).await?;
        tokio::fs::create_dir_all(&store.tmp_dir).await?;

        Ok(store)
    }
}

#[async_trait]
impl ProvenanceStore for DiskProvenanceStore {
    async fn put(&self, record: ProvenanceRecord) -> Result<(), StoreError> {
        validate_key(record.key.as_str())?;
        write_atomic(
            &self.tmp_dir,
            &self.records_dir.join(record.key.as_str()),
            record.source_url.as_bytes(),
        )
        .await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if validate_key(key).is_err() {
            return Ok(None);
        }

        match tokio::fs::read_to_string(self.records_dir.join(key)).await {
            Ok(source_url) => Ok(Some(source_url)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_atomic(tmp_dir: &Path, target: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let staging = tmp_dir.join(Uuid::new_v4().to_string());
    tokio::fs::write(&staging, contents).await?;

    if let Err(e) = tokio::fs::rename(&staging, target).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e.into());
    }
    Ok(())
}

async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir_keys(dir: &Path) -> Result<Vec<StorageKey>, StoreError> {
    let mut keys = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if validate_key(&name).is_ok() => keys.push(StorageKey(name)),
            Ok(_) => {}
            Err(name) => tracing::warn!("Skipping non UTF-8 entry {:?}", name),
        }
    }

    Ok(keys)
}
