//! Edge Response Cache
//!
//! An in-process stand-in for the edge cache that fronts the serving path.
//! Identical `GET` requests (same path and query) are answered from memory for up
//! to the configured TTL without reaching the handler. Only `200` responses whose
//! `Cache-Control` permits shared caching are stored; capacity is weighed by body
//! size.
//!
//! Layer it with `route_layer` on the routes it should front; the provenance and
//! admin routes stay outside it.

use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use moka::future::Cache;
use std::time::Duration;

pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-edge-cache");

#[derive(Clone)]
pub struct CachedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl CachedResponse {
    fn into_response_with(self, cache_status: &'static str) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
            .headers_mut()
            .insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache_status));
        response
    }
}

#[derive(Clone)]
pub struct EdgeCache {
    entries: Cache<String, CachedResponse>,
}

impl EdgeCache {
    pub fn new(ttl: Duration, max_bytes: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_bytes)
            .weigher(|key: &String, value: &CachedResponse| {
                u32::try_from(key.len() + value.body.len()).unwrap_or(u32::MAX)
            })
            .time_to_live(ttl)
            .build();

        Self { entries }
    }

    pub async fn get(&self, cache_key: &str) -> Option<CachedResponse> {
        self.entries.get(cache_key).await
    }

    pub async fn insert(&self, cache_key: String, response: CachedResponse) {
        self.entries.insert(cache_key, response).await;
    }

    pub async fn invalidate(&self, cache_key: &str) {
        self.entries.invalidate(cache_key).await;
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`.
pub async fn edge_cache(State(cache): State<EdgeCache>, request: Request, next: Next) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let cache_key = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if let Some(hit) = cache.get(&cache_key).await {
        tracing::debug!("Edge cache hit for {}", cache_key);
        return hit.into_response_with("hit");
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK || !is_shared_cacheable(response.headers()) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let body = match to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Buffering response for {} failed: {}", cache_key, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let stored = CachedResponse {
        status: parts.status,
        headers: parts.headers.clone(),
        body: body.clone(),
    };
    cache.insert(cache_key, stored).await;

    let mut response = Response::from_parts(parts, Body::from(body));
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("miss"));
    response
}

fn is_shared_cacheable(headers: &HeaderMap) -> bool {
    let Some(directives) = headers
        .get(header::CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
    else {
        return true;
    };

    !directives
        .split(',')
        .map(|directive| directive.trim().to_ascii_lowercase())
        .any(|directive| directive == "private" || directive == "no-store")
}
