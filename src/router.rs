use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use onlearn_config::{CorsConfig, StorageBackend};
use onlearn_core::AppError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::authorize;
use crate::modules::courses::init_courses_router;
use crate::modules::enrollments::init_enrollments_router;
use crate::modules::system::init_system_router;
use crate::modules::uploads::init_uploads_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

pub const NOT_FOUND_MESSAGE: &str = "Ruta no encontrada";

async fn route_not_found() -> AppError {
    AppError::not_found(NOT_FOUND_MESSAGE)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins)
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/courses", init_courses_router())
        .nest("/enrollments", init_enrollments_router())
        .nest("/users", init_users_router())
        .nest(
            "/upload",
            init_uploads_router(state.storage_config.max_upload_bytes),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_system_router())
        .nest("/api", api);

    if state.storage_config.backend == StorageBackend::Local {
        router = router.nest_service("/files", ServeDir::new(&state.storage_config.local_dir));
    }

    router
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
