//! Rendering API Client
//!
//! Two outbound calls per ingestion, each attempted exactly once:
//! 1. **Resolve**: ask the image export endpoint for a PNG render of the node (scale 1).
//! 2. **Fetch**: download the bytes behind the transient URL it returns.
//!
//! No retries and no timeout beyond the transport defaults.

use super::types::{ExportDescriptor, Identifiers, ImagesResponse};

use async_trait::async_trait;
use axum::body::Bytes;

/// Header carrying the API credential.
pub const TOKEN_HEADER: &str = "X-Figma-Token";
pub const EXPORT_SCALE: &str = "1";
pub const EXPORT_FORMAT: &str = "png";

#[derive(Debug, thiserror::Error)]
pub enum ExportFailure {
    /// The response carried no usable export URL for the node.
    #[error("rendering API returned no export for the node")]
    UpstreamEmpty,
    #[error("rendering API answered with status {status}")]
    UpstreamStatus { status: u16 },
    #[error("rendering API request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("rendering API response was not understood: {0}")]
    Malformed(#[source] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    #[error("export download failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("export download answered with status {status}")]
    Status { status: u16 },
}

/// Resolves identifiers to a transient export URL.
#[async_trait]
pub trait ExportResolver: Send + Sync {
    async fn resolve(&self, identifiers: &Identifiers) -> Result<ExportDescriptor, ExportFailure>;
}

/// Dereferences a transient export URL into raw bytes.
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    async fn fetch(&self, descriptor: &ExportDescriptor) -> Result<Bytes, FetchFailure>;
}

/// Picks the export URL out of an image export response.
///
/// Takes the first entry of the mapping; the API is asked for a single node so at
/// most one is expected. A missing mapping, an empty one, or a `null`/empty URL is
/// `UpstreamEmpty`.
pub fn select_export(response: ImagesResponse) -> Result<ExportDescriptor, ExportFailure> {
    response
        .images
        .and_then(|images| images.into_values().next())
        .flatten()
        .filter(|url| !url.is_empty())
        .map(|transient_url| ExportDescriptor { transient_url })
        .ok_or(ExportFailure::UpstreamEmpty)
}

pub struct FigmaClient {
    http_client: reqwest::Client,
    api_base: String,
    token: String,
}

impl FigmaClient {
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn images_url(&self, document_key: &str) -> String {
        format!("{}/v1/images/{}", self.api_base, document_key)
    }
}

#[async_trait]
impl ExportResolver for FigmaClient {
    async fn resolve(&self, identifiers: &Identifiers) -> Result<ExportDescriptor, ExportFailure> {
        let response = self
            .http_client
            .get(self.images_url(&identifiers.document_key))
            .query(&[
                ("ids", identifiers.node_id.as_str()),
                ("scale", EXPORT_SCALE),
                ("format", EXPORT_FORMAT),
            ])
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(ExportFailure::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportFailure::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body: ImagesResponse = response.json().await.map_err(ExportFailure::Malformed)?;
        if let Some(err) = &body.err {
            tracing::warn!("Rendering API reported error for {}: {}", identifiers.node_id, err);
        }

        select_export(body)
    }
}

#[async_trait]
impl BlobFetcher for FigmaClient {
    async fn fetch(&self, descriptor: &ExportDescriptor) -> Result<Bytes, FetchFailure> {
        let response = self.http_client.get(&descriptor.transient_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
