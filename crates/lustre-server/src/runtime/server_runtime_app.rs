// SPDX-License-Identifier: Apache-2.0

use crate::config::{ApiConfig, StorageConfig};
use crate::http::handlers;
use crate::middleware::cors::cors_middleware;
use crate::middleware::request_tracing::request_tracing_middleware;
use crate::store::memory::InMemoryStore;
use crate::store::samples::SampleAssets;
use crate::store::uploads::UploadStorage;
use crate::SessionStore;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use lustre_model::{Catalog, ImageRuleTable};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub uploads: Arc<UploadStorage>,
    pub samples: Arc<SampleAssets>,
    pub catalog: Arc<Catalog>,
    pub image_rules: Arc<ImageRuleTable>,
    pub api: ApiConfig,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(storage: StorageConfig) -> Self {
        Self::with_config(storage, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(storage: StorageConfig, api: ApiConfig) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), storage, api)
    }

    #[must_use]
    pub fn with_store(
        store: Arc<dyn SessionStore>,
        storage: StorageConfig,
        api: ApiConfig,
    ) -> Self {
        Self {
            store,
            uploads: Arc::new(UploadStorage::new(storage.upload_root)),
            samples: Arc::new(SampleAssets::new(storage.samples_root)),
            catalog: Arc::new(Catalog::fixed()),
            image_rules: Arc::new(ImageRuleTable::default()),
            api,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/upload", post(handlers::upload_handler))
        .route("/recommend", post(handlers::recommend_fallback_handler))
        .route("/recommend/:upload_id", post(handlers::recommend_handler))
        .route("/select", post(handlers::select_handler))
        .route("/cart", get(handlers::cart_handler))
        .nest_service(
            "/samples",
            ServeDir::new(state.samples.root().to_path_buf()),
        )
        .nest_service(
            "/uploads",
            ServeDir::new(state.uploads.root().to_path_buf()),
        )
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .layer(from_fn_with_state(state.clone(), request_tracing_middleware))
        .layer(DefaultBodyLimit::max(state.api.max_upload_bytes))
        .with_state(state)
}
