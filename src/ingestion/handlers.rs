use super::pipeline::{INVALID_URL_MESSAGE, IngestPipeline};
use super::types::{MessageResponse, UploadForm, UploadResponse};
use crate::admin::pages;
use crate::serving::cache::EdgeCache;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::{Extension, Form, Json, async_trait};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Name of the form field carrying the design link.
pub const SOURCE_FIELD: &str = "figmaUrl";

/// Reads `figmaUrl` from either a urlencoded or a `multipart/form-data` body.
///
/// A body that cannot be read as either is answered like an unusable link.
#[async_trait]
impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(request.headers()) {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|e| invalid_body(&e))?;
            return read_multipart(multipart).await;
        }

        Form::<UploadForm>::from_request(request, state)
            .await
            .map(|Form(form)| form)
            .map_err(|e| invalid_body(&e))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<UploadForm, Response> {
    while let Some(field) = multipart.next_field().await.map_err(|e| invalid_body(&e))? {
        if field.name() == Some(SOURCE_FIELD) {
            let figma_url = field.text().await.map_err(|e| invalid_body(&e))?;
            return Ok(UploadForm { figma_url });
        }
    }

    // Missing field; the extractor rejects the empty link.
    Ok(UploadForm::default())
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("multipart/form-data"))
}

fn invalid_body(rejection: &dyn std::fmt::Display) -> Response {
    tracing::warn!("Unreadable upload body: {}", rejection);
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse {
            message: INVALID_URL_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

/// `POST /upload`: ingests the design link in the `figmaUrl` form field.
///
/// Responds with the "Uploaded" HTML fragment, or with `UploadResponse` JSON when the
/// `Accept` header asks for it. Failures always answer with a `MessageResponse`.
/// A stored key is evicted from the edge cache so an overwrite is served at once.
pub async fn handle_upload(
    Extension(pipeline): Extension<Arc<IngestPipeline>>,
    Extension(edge_cache): Extension<EdgeCache>,
    headers: HeaderMap,
    form: UploadForm,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("ingest", %request_id);

    let result = pipeline
        .ingest(&form.figma_url)
        .instrument(span.clone())
        .await;

    match result {
        Ok(ingested) => {
            let key = ingested.key.as_str();
            edge_cache.invalidate(&format!("/{}", key)).await;

            if wants_json(&headers) {
                Json(UploadResponse {
                    key: key.to_string(),
                    url: format!("/{}", key),
                })
                .into_response()
            } else {
                Html(pages::uploaded(key)).into_response()
            }
        }
        Err(err) => {
            span.in_scope(|| {
                if err.status().is_server_error() {
                    tracing::error!(stage = %err.stage(), "Ingestion failed: {}", err);
                } else {
                    tracing::warn!(stage = %err.stage(), "Ingestion rejected: {}", err);
                }
            });
            (
                err.status(),
                Json(MessageResponse {
                    message: err.message().to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}
