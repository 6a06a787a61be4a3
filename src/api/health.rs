//! Health check endpoints

use actix_web::{get, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::rest::ApiState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub server_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<f64>,
}

impl HealthResponse {
    pub fn new(status: &str, server_id: &str, version: &str) -> Self {
        Self {
            status: status.to_string(),
            version: version.to_string(),
            server_id: server_id.to_string(),
            timestamp: Utc::now(),
            uptime_seconds: None,
        }
    }

    pub fn healthy(server_id: &str, version: &str) -> Self {
        Self::new("healthy", server_id, version)
    }

    pub fn with_uptime(mut self, uptime: f64) -> Self {
        self.uptime_seconds = Some(uptime);
        self
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub server_id: String,
    pub version: String,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> f64 {
        let duration = Utc::now().signed_duration_since(self.start_time);
        duration.num_milliseconds() as f64 / 1000.0
    }
}

/// Health check endpoint
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse::healthy(&state.server_id, &state.version)
        .with_uptime(state.uptime_seconds());

    HttpResponse::Ok().json(response)
}

/// Readiness check endpoint
///
/// Ready once the first metrics snapshot has been taken.
#[get("/ready")]
pub async fn readiness_check(
    state: web::Data<AppState>,
    api: web::Data<ApiState>,
) -> HttpResponse {
    if api.monitor.latest().is_some() {
        HttpResponse::Ok().json(HealthResponse::healthy(&state.server_id, &state.version))
    } else {
        HttpResponse::ServiceUnavailable()
            .json(HealthResponse::new("starting", &state.server_id, &state.version))
    }
}

/// Liveness check endpoint
#[get("/live")]
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive"
    }))
}

/// Configure health routes
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
