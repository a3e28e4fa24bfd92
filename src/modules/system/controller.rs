use std::collections::BTreeMap;

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};

use crate::modules::system::model::{ApiIndexResponse, HealthResponse};
use crate::state::AppState;

const ENDPOINTS: &[(&str, &str)] = &[
    ("courses", "/api/courses"),
    ("enrollments", "/api/enrollments"),
    ("users", "/api/users"),
    ("upload", "/api/upload"),
    ("health", "/health"),
    ("docs", "/swagger-ui"),
];

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.uptime_secs(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API name, version and entry points", body = ApiIndexResponse)
    ),
    tag = "System"
)]
pub async fn api_index() -> Json<ApiIndexResponse> {
    let endpoints: BTreeMap<String, String> = ENDPOINTS
        .iter()
        .map(|(name, path)| (name.to_string(), path.to_string()))
        .collect();

    Json(ApiIndexResponse {
        message: "API OnLearn".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}
