//! Ingestion Data Types
//!
//! Identifiers extracted from a design link, the transient export descriptor issued by
//! the rendering API, and the request/response DTOs of the upload endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The (document, node) pair addressed by a design link.
///
/// `document_key` is alphanumeric; `node_id` has the form `<digits>-<digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifiers {
    pub document_key: String,
    pub node_id: String,
}

/// A short-lived URL pointing at a rendered export. Only valid for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDescriptor {
    pub transient_url: String,
}

/// Body of the rendering API's image export endpoint.
///
/// `images` maps node ids to export URLs; a node that failed to render maps to `null`.
#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub images: Option<BTreeMap<String, Option<String>>>,
    #[serde(default)]
    pub err: Option<String>,
}

/// Form body of `POST /upload`, urlencoded or multipart.
///
/// A missing field deserializes to an empty string, which the extractor rejects.
#[derive(Debug, Default, Deserialize)]
pub struct UploadForm {
    #[serde(rename = "figmaUrl", default)]
    pub figma_url: String,
}

/// JSON form of a successful upload, returned when the caller asks for JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
}

/// Error body shared by every failing upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
