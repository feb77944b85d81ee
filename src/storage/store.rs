//! Store Capabilities
//!
//! The content store and the provenance store are external collaborators; the
//! rest of the gateway only sees these two traits. Implementations live in
//! `memory` (process-local) and `disk` (directory-backed).

use super::types::{ListPage, ProvenanceRecord, StorageKey, StoreError, StoredObject};

use async_trait::async_trait;

/// Durable binary object store addressed by `StorageKey`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Writes the object, replacing any object already stored under its key.
    async fn put(&self, object: StoredObject) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StoreError>;

    async fn list(
        &self,
        prefix: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<ListPage, StoreError>;
}

/// Durable key -> source URL store.
#[async_trait]
pub trait ProvenanceStore: Send + Sync {
    /// Writes the record, replacing any record already stored under its key.
    async fn put(&self, record: ProvenanceRecord) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Cuts one listing page out of an unordered set of keys.
///
/// Shared by the content store implementations so they agree on ordering, prefix filtering
/// and cursor semantics (the cursor is an exclusive start-after key).
pub fn paginate<I>(keys: I, prefix: &str, cursor: Option<&str>, limit: usize) -> ListPage
where
    I: IntoIterator<Item = StorageKey>,
{
    let limit = limit.max(1);
    let mut matching: Vec<StorageKey> = keys
        .into_iter()
        .filter(|key| key.as_str().starts_with(prefix))
        .filter(|key| cursor.is_none_or(|after| key.as_str() > after))
        .collect();
    matching.sort();

    let has_more = matching.len() > limit;
    matching.truncate(limit);

    let cursor = if has_more {
        matching.last().map(|key| key.0.clone())
    } else {
        None
    };

    ListPage {
        keys: matching,
        cursor,
    }
}
