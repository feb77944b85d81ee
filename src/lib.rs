//! Figma Image Gateway Library
//!
//! Ingests rendered Figma node exports into a content store and serves them back with
//! long-lived cache headers. The binary executable (`main.rs`) only reads configuration
//! and starts `server::run`.
//!
//! ## Architecture Modules
//! - **`admin`**: The Admin Gate (HTTP Basic) plus the key listing and provenance lookup
//!   behind it.
//! - **`config`**: Environment-supplied configuration, passed explicitly to components.
//! - **`ingestion`**: Link parsing, the two calls to the rendering API, key derivation, and
//!   the `POST /upload` handler that sequences them.
//! - **`serving`**: The public `GET /:key` read path and the edge cache in front of it.
//! - **`server`**: Assembles components into the axum router and runs the listener.
//! - **`storage`**: Content and provenance store capabilities, their in-memory and
//!   directory-backed implementations, and the dual-write Storage Writer.

pub mod admin;
pub mod config;
pub mod ingestion;
pub mod server;
pub mod serving;
pub mod storage;
