use super::store::{ContentStore, ProvenanceStore};
use super::types::{
    PNG_CONTENT_TYPE, ProvenanceRecord, StorageKey, StoredObject, WriteFailure,
};

use axum::body::Bytes;
use std::sync::Arc;

/// Persists an ingested export into both stores.
///
/// The blob write and the provenance write are issued concurrently with no shared
/// transaction. A reader may see the blob before its provenance record (or the
/// reverse), and a failure of one write leaves the other in place. Concurrent
/// writes to the same key are last-write-wins on each store independently.
#[derive(Clone)]
pub struct StorageWriter {
    content: Arc<dyn ContentStore>,
    provenance: Arc<dyn ProvenanceStore>,
}

impl StorageWriter {
    pub fn new(content: Arc<dyn ContentStore>, provenance: Arc<dyn ProvenanceStore>) -> Self {
        Self {
            content,
            provenance,
        }
    }

    pub async fn store(
        &self,
        key: &StorageKey,
        bytes: Bytes,
        source_url: &str,
    ) -> Result<(), WriteFailure> {
        let object = StoredObject {
            key: key.clone(),
            bytes,
            content_type: PNG_CONTENT_TYPE.to_string(),
        };
        let record = ProvenanceRecord {
            key: key.clone(),
            source_url: source_url.to_string(),
        };

        let (content, provenance) =
            tokio::join!(self.content.put(object), self.provenance.put(record));

        match (content, provenance) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(source), Ok(())) => {
                tracing::warn!("Content write for {} failed; provenance record kept", key);
                Err(WriteFailure::Content {
                    key: key.clone(),
                    source,
                })
            }
            (Ok(()), Err(source)) => {
                tracing::warn!("Provenance write for {} failed; blob kept", key);
                Err(WriteFailure::Provenance {
                    key: key.clone(),
                    source,
                })
            }
            (Err(content), Err(provenance)) => Err(WriteFailure::Both {
                key: key.clone(),
                content,
                provenance,
            }),
        }
    }
}
