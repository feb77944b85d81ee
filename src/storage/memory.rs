use super::store::{ContentStore, ProvenanceStore, paginate};
use super::types::{ListPage, ProvenanceRecord, StorageKey, StoreError, StoredObject};

use async_trait::async_trait;
use dashmap::DashMap;

/// Process-local content store. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryContentStore {
    objects: DashMap<StorageKey, StoredObject>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn put(&self, object: StoredObject) -> Result<(), StoreError> {
        tracing::debug!("Stored object {} ({} bytes)", object.key, object.bytes.len());
        self.objects.insert(object.key.clone(), object);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StoreError> {
        Ok(self
            .objects
            .get(&StorageKey::from(key))
            .map(|entry| entry.value().clone()))
    }

    async fn list(
        &self,
        prefix: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<ListPage, StoreError> {
        let keys = self.objects.iter().map(|entry| entry.key().clone());
        Ok(paginate(keys, prefix, cursor, limit))
    }
}

/// Process-local provenance store.
#[derive(Default)]
pub struct MemoryProvenanceStore {
    records: DashMap<StorageKey, String>,
}

impl MemoryProvenanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProvenanceStore for MemoryProvenanceStore {
    async fn put(&self, record: ProvenanceRecord) -> Result<(), StoreError> {
        self.records.insert(record.key, record.source_url);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .records
            .get(&StorageKey::from(key))
            .map(|entry| entry.value().clone()))
    }
}
