use super::pages;
use crate::storage::store::{ContentStore, ProvenanceStore};
use crate::storage::types::ReadError;

use axum::Extension;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_LIST_LIMIT: usize = 100;
pub const MAX_LIST_LIMIT: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

/// Reads the source link a key was ingested from.
///
/// A missing record is `NotFound`, including for keys whose blob exists: the
/// provenance write may have failed or not landed yet.
pub async fn lookup_source(store: &dyn ProvenanceStore, key: &str) -> Result<String, ReadError> {
    store.get(key).await?.ok_or(ReadError::NotFound)
}

/// `GET /admin/:key/src`
pub async fn handle_get_source(
    Extension(provenance): Extension<Arc<dyn ProvenanceStore>>,
    Path(key): Path<String>,
) -> Response {
    match lookup_source(provenance.as_ref(), &key).await {
        Ok(source_url) => Html(pages::source_link(&source_url)).into_response(),
        Err(ReadError::NotFound) => {
            tracing::debug!("No provenance record for {}", key);
            StatusCode::NOT_FOUND.into_response()
        }
        Err(ReadError::Store(e)) => {
            tracing::error!("Provenance lookup for {} failed: {}", key, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /admin/`: one page of the content store listing, rendered as the admin page.
pub async fn handle_list(
    Extension(content): Extension<Arc<dyn ContentStore>>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);

    match content.list("", params.cursor.as_deref(), limit).await {
        Ok(page) => Html(pages::listing(&page.keys, page.cursor.as_deref(), limit)).into_response(),
        Err(e) => {
            tracing::error!("Listing stored keys failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
