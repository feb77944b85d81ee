//! Ingestion Pipeline
//!
//! Drives one upload through
//! `Received -> Extracted -> Resolved -> Fetched -> KeyDerived -> Stored`.
//! Any step may end the request with an `IngestError`; nothing loops back.

use super::figma::{BlobFetcher, ExportFailure, ExportResolver, FetchFailure};
use super::key::derive_key;
use super::reference::{InvalidReference, extract};
use super::types::Identifiers;
use crate::storage::types::{StorageKey, WriteFailure};
use crate::storage::writer::StorageWriter;

use axum::http::StatusCode;
use std::fmt;
use std::sync::Arc;

/// Message for any upload whose body does not carry a usable design link.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL";

/// Steps of an ingestion request, used to tag log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Received,
    Extracted,
    Resolved,
    Fetched,
    KeyDerived,
    Stored,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IngestStage::Received => "received",
            IngestStage::Extracted => "extracted",
            IngestStage::Resolved => "resolved",
            IngestStage::Fetched => "fetched",
            IngestStage::KeyDerived => "key_derived",
            IngestStage::Stored => "stored",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid source reference: {0}")]
    InvalidReference(#[from] InvalidReference),
    #[error(transparent)]
    Export(#[from] ExportFailure),
    #[error(transparent)]
    Fetch(#[from] FetchFailure),
    #[error(transparent)]
    Write(#[from] WriteFailure),
}

impl IngestError {
    /// The last stage the request reached before failing.
    pub fn stage(&self) -> IngestStage {
        match self {
            IngestError::InvalidReference(_) => IngestStage::Received,
            IngestError::Export(_) => IngestStage::Extracted,
            IngestError::Fetch(_) => IngestStage::Resolved,
            IngestError::Write(_) => IngestStage::KeyDerived,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            IngestError::InvalidReference(_) | IngestError::Export(_) => StatusCode::BAD_REQUEST,
            IngestError::Fetch(_) => StatusCode::BAD_GATEWAY,
            IngestError::Write(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller. Details stay in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            IngestError::InvalidReference(_) => INVALID_URL_MESSAGE,
            IngestError::Export(_) => "figma error",
            IngestError::Fetch(_) => "image download failed",
            IngestError::Write(_) => "storage error",
        }
    }
}

/// Result of a completed ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    pub key: StorageKey,
    pub identifiers: Identifiers,
}

pub struct IngestPipeline {
    resolver: Arc<dyn ExportResolver>,
    fetcher: Arc<dyn BlobFetcher>,
    writer: StorageWriter,
}

impl IngestPipeline {
    pub fn new(
        resolver: Arc<dyn ExportResolver>,
        fetcher: Arc<dyn BlobFetcher>,
        writer: StorageWriter,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            writer,
        }
    }

    pub async fn ingest(&self, source_url: &str) -> Result<Ingested, IngestError> {
        tracing::debug!(stage = %IngestStage::Received, "Ingesting {}", source_url);

        let identifiers = extract(source_url)?;
        tracing::debug!(
            stage = %IngestStage::Extracted,
            "document={} node={}",
            identifiers.document_key,
            identifiers.node_id
        );

        let descriptor = self.resolver.resolve(&identifiers).await?;
        tracing::debug!(stage = %IngestStage::Resolved, "Export at {}", descriptor.transient_url);

        let bytes = self.fetcher.fetch(&descriptor).await?;
        tracing::debug!(stage = %IngestStage::Fetched, "Downloaded {} bytes", bytes.len());

        let key = derive_key(&descriptor);
        tracing::debug!(stage = %IngestStage::KeyDerived, "Derived key {}", key);

        self.writer.store(&key, bytes, source_url).await?;
        tracing::info!(stage = %IngestStage::Stored, "Stored {}", key);

        Ok(Ingested { key, identifiers })
    }
}
