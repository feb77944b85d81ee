//! HTTP Surface
//!
//! | Route | Gate | Edge cache |
//! |---|---|---|
//! | `GET /` | - | - |
//! | `POST /upload` | admin | - |
//! | `GET /admin`, `GET /admin/` | admin | - |
//! | `GET /admin/:key/src` | admin | - |
//! | `GET /:key` | - | yes |

use crate::admin::auth::require_admin;
use crate::admin::handlers::{handle_get_source, handle_list};
use crate::config::{AdminCredentials, GatewayConfig};
use crate::ingestion::figma::{BlobFetcher, ExportResolver, FigmaClient};
use crate::ingestion::handlers::handle_upload;
use crate::ingestion::pipeline::IngestPipeline;
use crate::serving::cache::{EdgeCache, edge_cache};
use crate::serving::handlers::handle_get_object;
use crate::storage::disk::{DiskContentStore, DiskProvenanceStore};
use crate::storage::memory::{MemoryContentStore, MemoryProvenanceStore};
use crate::storage::store::{ContentStore, ProvenanceStore};
use crate::storage::writer::StorageWriter;

use anyhow::Result;
use axum::routing::{get, post};
use axum::{Extension, Router, middleware};
use std::sync::Arc;

pub const BANNER: &str = "figma-image-gateway";

/// The assembled components behind the router. Holds no per-request state.
#[derive(Clone)]
pub struct Gateway {
    pub content: Arc<dyn ContentStore>,
    pub provenance: Arc<dyn ProvenanceStore>,
    pub pipeline: Arc<IngestPipeline>,
    pub edge_cache: EdgeCache,
    pub admin: Arc<AdminCredentials>,
}

impl Gateway {
    pub fn new(
        content: Arc<dyn ContentStore>,
        provenance: Arc<dyn ProvenanceStore>,
        resolver: Arc<dyn ExportResolver>,
        fetcher: Arc<dyn BlobFetcher>,
        admin: AdminCredentials,
        edge_cache: EdgeCache,
    ) -> Self {
        let writer = StorageWriter::new(content.clone(), provenance.clone());
        let pipeline = Arc::new(IngestPipeline::new(resolver, fetcher, writer));

        Self {
            content,
            provenance,
            pipeline,
            edge_cache,
            admin: Arc::new(admin),
        }
    }

    /// Builds stores and the rendering API client as `config` describes.
    pub async fn from_config(config: &GatewayConfig) -> Result<Self> {
        let (content, provenance): (Arc<dyn ContentStore>, Arc<dyn ProvenanceStore>) =
            match &config.storage_dir {
                Some(dir) => {
                    tracing::info!("Using directory-backed stores at {}", dir.display());
                    (
                        Arc::new(DiskContentStore::open(dir).await?),
                        Arc::new(DiskProvenanceStore::open(dir).await?),
                    )
                }
                None => {
                    tracing::warn!("STORAGE_DIR not set; stored images are lost on restart");
                    (
                        Arc::new(MemoryContentStore::new()),
                        Arc::new(MemoryProvenanceStore::new()),
                    )
                }
            };

        let figma = Arc::new(FigmaClient::new(&config.figma_api_base, &config.figma_token));
        let edge_cache = EdgeCache::new(config.edge_cache_ttl, config.edge_cache_max_bytes);

        Ok(Self::new(
            content,
            provenance,
            figma.clone(),
            figma,
            config.admin.clone(),
            edge_cache,
        ))
    }

    pub fn router(&self) -> Router {
        let gated = Router::new()
            .route("/upload", post(handle_upload))
            .route("/admin", get(handle_list))
            .route("/admin/", get(handle_list))
            .route("/admin/:key/src", get(handle_get_source))
            .route_layer(middleware::from_fn_with_state(
                self.admin.clone(),
                require_admin,
            ));

        let cached = Router::new()
            .route("/:key", get(handle_get_object))
            .route_layer(middleware::from_fn_with_state(
                self.edge_cache.clone(),
                edge_cache,
            ));

        Router::new()
            .route("/", get(handle_root))
            .merge(gated)
            .merge(cached)
            .layer(Extension(self.content.clone()))
            .layer(Extension(self.provenance.clone()))
            .layer(Extension(self.pipeline.clone()))
            .layer(Extension(self.edge_cache.clone()))
    }
}

async fn handle_root() -> &'static str {
    BANNER
}

/// Binds `config.bind_addr` and serves until the process is stopped.
pub async fn run(config: GatewayConfig) -> Result<()> {
    let gateway = Gateway::from_config(&config).await?;
    let app = gateway.router();

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app).await?;
    Ok(())
}
