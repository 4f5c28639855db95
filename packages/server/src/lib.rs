pub mod config;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use common::storage::filesystem::{FilesystemPhotoStore, normalize_prefix};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, CorsConfig};
use crate::state::AppState;
use crate::store::RecordStore;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Incident Board API",
        version = "1.0.0",
        description = "People, incidents and the points ranking derived from them"
    ),
    tags(
        (name = "People", description = "People who accrue points"),
        (name = "Incidents", description = "Point-earning incidents with optional photo evidence"),
        (name = "Ranking", description = "People ordered by points"),
    ),
)]
struct ApiDoc;

/// Open the photo store and the record store described by `config`.
pub async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let photos = FilesystemPhotoStore::new(
        config.storage.uploads_dir.clone(),
        &config.storage.public_prefix,
        config.storage.max_photo_size,
    )
    .await
    .with_context(|| {
        format!(
            "Failed to open uploads directory {}",
            config.storage.uploads_dir.display()
        )
    })?;
    let photos = Arc::new(photos);

    let store = RecordStore::open(config.store.data_file.clone(), photos.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to open data file {}",
                config.store.data_file.display()
            )
        })?;

    Ok(AppState {
        store: Arc::new(store),
        photos,
        config,
    })
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let config = state.config.clone();

    let (router, api) = utoipa_axum::router::OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&config))
        .split_for_parts();

    let mut router = router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api));

    // `build_state` has already refused a root prefix.
    if let Some(prefix) = normalize_prefix(&config.storage.public_prefix) {
        router = router.nest_service(&prefix, ServeDir::new(&config.storage.uploads_dir));
    }

    router
        .fallback_service(ServeDir::new(&config.web.public_dir))
        .layer(cors_layer(&config.server.cors))
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origin = if cors.allow_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors.allow_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(cors.max_age))
}
