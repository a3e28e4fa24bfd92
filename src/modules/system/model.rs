use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: String,
    /// Current time, RFC 3339
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiIndexResponse {
    pub message: String,
    pub version: String,
    /// Resource name to base path
    pub endpoints: BTreeMap<String, String>,
}
