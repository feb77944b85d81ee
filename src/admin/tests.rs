//! Admin Module Tests
//!
//! ## Test Scopes
//! - **Admin Gate**: Basic header decoding and credential comparison.
//! - **Provenance Path**: Record lookup and the 404 for missing records.
//! - **Listing**: Page rendering and pagination links.
//! - **Pages**: HTML escaping of untrusted values.

#[cfg(test)]
mod tests {
    use crate::admin::auth::{decode_basic, is_authorized};
    use crate::admin::handlers::{ListParams, handle_get_source, handle_list, lookup_source};
    use crate::admin::pages;
    use crate::config::AdminCredentials;
    use crate::storage::memory::{MemoryContentStore, MemoryProvenanceStore};
    use crate::storage::store::{ContentStore, ProvenanceStore};
    use crate::storage::types::{
        PNG_CONTENT_TYPE, ProvenanceRecord, ReadError, StorageKey, StoredObject,
    };
    use axum::Extension;
    use axum::body::{Bytes, to_bytes};
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
    use axum::response::Response;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use std::sync::Arc;

    fn credentials() -> AdminCredentials {
        AdminCredentials {
            username: "admin".to_string(),
            password: "s3cret".to_string(),
        }
    }

    fn basic_header(user: &str, pass: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let encoded = STANDARD.encode(format!("{}:{}", user, pass));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap(),
        );
        headers
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn content_with(keys: &[&str]) -> Arc<dyn ContentStore> {
        let store = MemoryContentStore::new();
        for key in keys {
            store
                .put(StoredObject {
                    key: StorageKey::from(*key),
                    bytes: Bytes::from_static(b"png"),
                    content_type: PNG_CONTENT_TYPE.to_string(),
                })
                .await
                .unwrap();
        }
        Arc::new(store)
    }

    // ============================================================
    // ADMIN GATE
    // ============================================================

    #[test]
    fn test_decode_basic_header() {
        let encoded = STANDARD.encode("admin:pa:ss");
        let decoded = decode_basic(&format!("Basic {}", encoded)).unwrap();

        // Only the first colon separates username from password
        assert_eq!(decoded, ("admin".to_string(), "pa:ss".to_string()));
    }

    #[test]
    fn test_decode_basic_scheme_is_case_insensitive() {
        let encoded = STANDARD.encode("admin:s3cret");
        assert!(decode_basic(&format!("basic {}", encoded)).is_some());
    }

    #[test]
    fn test_decode_basic_rejects_other_schemes_and_garbage() {
        assert!(decode_basic("Bearer abc").is_none());
        assert!(decode_basic("Basic !!!not-base64!!!").is_none());
        assert!(decode_basic(&format!("Basic {}", STANDARD.encode("nocolon"))).is_none());
        assert!(decode_basic("").is_none());
    }

    #[test]
    fn test_authorized_with_matching_credentials() {
        assert!(is_authorized(&basic_header("admin", "s3cret"), &credentials()));
    }

    #[test]
    fn test_rejected_with_wrong_credentials() {
        assert!(!is_authorized(&basic_header("admin", "wrong"), &credentials()));
        assert!(!is_authorized(&basic_header("root", "s3cret"), &credentials()));
        assert!(!is_authorized(&HeaderMap::new(), &credentials()));
    }

    // ============================================================
    // PROVENANCE PATH
    // ============================================================

    #[tokio::test]
    async fn test_lookup_source_found_and_missing() {
        let store = MemoryProvenanceStore::new();
        store
            .put(ProvenanceRecord {
                key: StorageKey::from("xyz789.png"),
                source_url: "https://www.figma.com/file/ABC123/Name?node-id=10-20".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            lookup_source(&store, "xyz789.png").await.unwrap(),
            "https://www.figma.com/file/ABC123/Name?node-id=10-20"
        );
        assert!(matches!(
            lookup_source(&store, "missing.png").await,
            Err(ReadError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_source_renders_link() {
        let store = MemoryProvenanceStore::new();
        store
            .put(ProvenanceRecord {
                key: StorageKey::from("k.png"),
                source_url: "https://www.figma.com/file/A/B?node-id=1-2&t=x".to_string(),
            })
            .await
            .unwrap();
        let store: Arc<dyn ProvenanceStore> = Arc::new(store);

        let response = handle_get_source(Extension(store), Path("k.png".to_string())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("href=\"https://www.figma.com/file/A/B?node-id=1-2&amp;t=x\""));
        assert!(body.contains("target=\"_blank\""));
    }

    #[tokio::test]
    async fn test_get_source_missing_is_404_without_body() {
        let store: Arc<dyn ProvenanceStore> = Arc::new(MemoryProvenanceStore::new());

        let response = handle_get_source(Extension(store), Path("nope.png".to_string())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.is_empty());
    }

    // ============================================================
    // LISTING
    // ============================================================

    #[tokio::test]
    async fn test_list_renders_every_key() {
        let content = content_with(&["b.png", "a.png"]).await;

        let response = handle_list(
            Extension(content),
            Query(ListParams {
                cursor: None,
                limit: None,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("<a href=\"/a.png\">a.png</a>"));
        assert!(body.contains("hx-get=\"/admin/b.png/src\""));
        assert!(body.contains("name=\"figmaUrl\""));
        assert!(!body.contains("next page"));
        // Ascending order
        assert!(body.find("/a.png").unwrap() < body.find("/b.png").unwrap());
    }

    #[tokio::test]
    async fn test_list_paginates_with_cursor() {
        let content = content_with(&["a.png", "b.png", "c.png"]).await;

        let first = body_text(
            handle_list(
                Extension(content.clone()),
                Query(ListParams {
                    cursor: None,
                    limit: Some(2),
                }),
            )
            .await,
        )
        .await;
        assert!(first.contains("/admin/?cursor=b.png&amp;limit=2"));
        assert!(!first.contains("/c.png"));

        let second = body_text(
            handle_list(
                Extension(content),
                Query(ListParams {
                    cursor: Some("b.png".to_string()),
                    limit: Some(2),
                }),
            )
            .await,
        )
        .await;
        assert!(second.contains("/c.png"));
        assert!(!second.contains("\"/a.png\""));
        assert!(!second.contains("next page"));
    }

    // ============================================================
    // PAGES
    // ============================================================

    #[test]
    fn test_escape_html() {
        assert_eq!(
            pages::escape("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_uploaded_fragment_names_key() {
        let html = pages::uploaded("xyz789.png");
        assert!(html.starts_with("<div>Uploaded"));
        assert!(html.contains("<img src=\"/xyz789.png\""));
    }
}
