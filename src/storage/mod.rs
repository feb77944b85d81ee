//! Storage Module
//!
//! Holds ingested exports and where they came from.
//!
//! ## Core Concepts
//! - **Content store**: `StorageKey` -> blob bytes + content type. Authoritative: every key
//!   reported as uploaded exists here.
//! - **Provenance store**: `StorageKey` -> original design link. Best-effort: readers must
//!   tolerate a missing record.
//! - **Dual write**: `StorageWriter` writes both stores side by side without a transaction.
//!
//! ## Submodules
//! - **`store`**: Capability traits and the shared listing/pagination helpers.
//! - **`memory`**: DashMap-backed stores for single-process deployments and tests.
//! - **`disk`**: Directory-backed stores that survive restarts.
//! - **`writer`**: The dual-write Storage Writer.
//! - **`types`**: Keys, stored entities and error types.

pub mod disk;
pub mod memory;
pub mod store;
pub mod types;
pub mod writer;
