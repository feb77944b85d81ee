use crate::storage::store::ContentStore;
use crate::storage::types::{ReadError, StoredObject};

use axum::Extension;
use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// 30 days.
pub const MAX_AGE_SECS: u64 = 60 * 60 * 24 * 30;

pub fn cache_control() -> String {
    format!("public, max-age={}", MAX_AGE_SECS)
}

/// Looks up a stored object. Read-only; safe under any number of concurrent callers.
pub async fn serve(store: &dyn ContentStore, key: &str) -> Result<StoredObject, ReadError> {
    store.get(key).await?.ok_or(ReadError::NotFound)
}

/// `GET /:key`: the stored blob with its content type and a 30-day public cache directive.
pub async fn handle_get_object(
    Extension(content): Extension<Arc<dyn ContentStore>>,
    Path(key): Path<String>,
) -> Response {
    match serve(content.as_ref(), &key).await {
        Ok(object) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, object.content_type),
                (header::CACHE_CONTROL, cache_control()),
            ],
            object.bytes,
        )
            .into_response(),
        Err(ReadError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(ReadError::Store(e)) => {
            tracing::error!("Reading {} failed: {}", key, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
