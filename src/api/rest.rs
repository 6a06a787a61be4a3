//! REST API endpoints using Actix-Web

use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::api::responses::{ApiResponse, ApiResult, ValidationReport};
use crate::metrics::record_http_request;
use crate::models::{AgentError, DiskMetrics, ServerMetrics};
use crate::resources::{aggregate, validate, DiskMonitor};

use super::health::configure_health_routes;

/// Shared application state
#[derive(Clone)]
pub struct ApiState {
    pub monitor: Arc<DiskMonitor>,
}

impl ApiState {
    pub fn new(monitor: Arc<DiskMonitor>) -> Self {
        Self { monitor }
    }
}

/// Configure all REST API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Health endpoints at root
    configure_health_routes(cfg);

    // API v1 routes
    cfg.service(
        web::scope("/api/v1")
            .configure(configure_v1_routes)
    );
}

/// Configure API v1 routes
fn configure_v1_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Metrics payload routes
        .service(
            web::scope("/metrics")
                .route("", web::get().to(get_metrics))
                .route("/validate", web::post().to(validate_metrics))
        )
        // Disk usage routes
        .service(
            web::scope("/disk")
                .route("/usage", web::get().to(get_disk_usage))
                .route("/aggregate", web::post().to(aggregate_disks))
        );
}

fn respond<T: Serialize>(result: ApiResult<T>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(data)),
        Err(e) => HttpResponse::from(e),
    }
}

// ============================================================================
// Metrics Handlers
// ============================================================================

async fn get_metrics(state: web::Data<ApiState>) -> HttpResponse {
    record_http_request();
    respond(state.monitor.latest().ok_or(AgentError::NotReady))
}

async fn validate_metrics(body: web::Json<ServerMetrics>) -> HttpResponse {
    record_http_request();
    let payload = body.into_inner();

    respond(Ok(ValidationReport {
        valid: validate(payload.disk_usage.as_ref()),
        disk_usage_present: payload.disk_usage.is_some(),
    }))
}

// ============================================================================
// Disk Usage Handlers
// ============================================================================

async fn get_disk_usage(state: web::Data<ApiState>) -> HttpResponse {
    record_http_request();
    respond(state.monitor.latest_disk_usage().ok_or(AgentError::NotReady))
}

async fn aggregate_disks(body: web::Json<Vec<DiskMetrics>>) -> HttpResponse {
    record_http_request();
    respond(Ok(aggregate(&body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppState;
    use crate::config::CollectorSettings;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    fn test_state() -> ApiState {
        let monitor = DiskMonitor::new(CollectorSettings::default(), "srv-1", "web01");
        ApiState::new(Arc::new(monitor))
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::new("srv-1")))
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn test_metrics_not_ready() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/v1/metrics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::get().uri("/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_rt::test]
    async fn test_latest_snapshot() {
        let state = test_state();
        state.monitor.refresh_from(vec![
            DiskMetrics::new("/dev/sda1", "/", "ext4", 1_000, 500),
        ]);
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/v1/metrics").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["server_id"], "srv-1");
        assert_eq!(body["data"]["disk_usage"]["filesystem_count"], 1);

        let req = test::TestRequest::get().uri("/api/v1/disk/usage").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["largest_mount"], "/");

        let req = test::TestRequest::get().uri("/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_aggregate_endpoint() {
        let state = test_state();
        let app = test_app!(state);

        let disks = json!([
            {"device": "/dev/sda1", "mountpoint": "/", "filesystem": "ext4",
             "total_bytes": 100, "used_bytes": 75, "free_bytes": 25, "usage_percent": 75.0},
            {"device": "/dev/sda2", "mountpoint": "/var/log", "filesystem": "ext4",
             "total_bytes": 100, "used_bytes": 95, "free_bytes": 5, "usage_percent": 95.0},
            {"device": "/dev/sdb1", "mountpoint": "/home", "filesystem": "xfs",
             "total_bytes": 400, "used_bytes": 200, "free_bytes": 200, "usage_percent": 50.0}
        ]);

        let req = test::TestRequest::post()
            .uri("/api/v1/disk/aggregate")
            .set_json(&disks)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["total_bytes"], 600);
        assert_eq!(body["data"]["used_bytes"], 370);
        assert_eq!(body["data"]["filesystem_count"], 3);
        assert_eq!(body["data"]["largest_mount"], "/home");
        assert_eq!(body["data"]["critical_mounts"], json!(["/var/log"]));
    }

    #[actix_rt::test]
    async fn test_validate_endpoint() {
        let state = test_state();
        let app = test_app!(state);

        let payload = json!({
            "server_id": "srv-2",
            "hostname": "db01",
            "collected_at": "2024-05-01T12:00:00Z",
            "disks": [],
            "disk_usage": {
                "total_bytes": 1000, "used_bytes": 500, "free_bytes": 500,
                "used_percent": 150.0, "filesystem_count": 1,
                "largest_mount": "/", "critical_mounts": [],
                "calculated_at": "2024-05-01T12:00:00Z"
            }
        });

        let req = test::TestRequest::post()
            .uri("/api/v1/metrics/validate")
            .set_json(&payload)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["valid"], false);
        assert_eq!(body["data"]["disk_usage_present"], true);

        let older = json!({
            "server_id": "srv-2",
            "hostname": "db01",
            "collected_at": "2024-05-01T12:00:00Z"
        });

        let req = test::TestRequest::post()
            .uri("/api/v1/metrics/validate")
            .set_json(&older)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["valid"], false);
        assert_eq!(body["data"]["disk_usage_present"], false);
    }

    #[actix_rt::test]
    async fn test_liveness() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/live").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "alive");
    }
}
