//! Ingestion Service Module
//!
//! Turns a design link into a stored PNG export.
//!
//! ## Workflow
//! 1. **Extract**: Parses the document key and node id out of the link (`reference`).
//! 2. **Resolve**: Asks the rendering API for a transient export URL (`figma`).
//! 3. **Fetch**: Downloads the rendered bytes (`figma`).
//! 4. **Derive**: Computes the storage key from the export URL (`key`).
//! 5. **Store**: Writes the blob and its provenance record (`storage::writer`).
//!
//! `pipeline` sequences the steps; `handlers` exposes them as `POST /upload`.

pub mod figma;
pub mod handlers;
pub mod key;
pub mod pipeline;
pub mod reference;
pub mod types;
