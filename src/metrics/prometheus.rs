//! Prometheus metrics integration

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    opts, register_gauge, register_int_counter, register_int_gauge, Encoder, Gauge, IntCounter,
    IntGauge, TextEncoder,
};

use crate::models::DiskUsageAggregate;

// Define metrics
static HTTP_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        opts!("http_requests_total", "Total number of HTTP requests")
    )
    .expect("Failed to create HTTP requests counter")
});

static DISK_AGGREGATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        opts!("disk_aggregations_total", "Total number of disk usage aggregations")
    )
    .expect("Failed to create disk aggregations counter")
});

static DISK_VALIDATION_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        opts!("disk_validation_failures_total", "Total number of rejected disk usage summaries")
    )
    .expect("Failed to create validation failures counter")
});

static DISK_USED_PERCENT: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        opts!("disk_used_percent", "Used percentage across counted filesystems")
    )
    .expect("Failed to create disk used percent gauge")
});

static DISK_TOTAL_BYTES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        opts!("disk_total_bytes", "Capacity across counted filesystems")
    )
    .expect("Failed to create disk total bytes gauge")
});

static DISK_USED_BYTES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        opts!("disk_used_bytes", "Used bytes across counted filesystems")
    )
    .expect("Failed to create disk used bytes gauge")
});

static DISK_FILESYSTEMS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        opts!("disk_filesystems", "Number of filesystems counted in the summary")
    )
    .expect("Failed to create disk filesystems gauge")
});

static DISK_CRITICAL_MOUNTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        opts!("disk_critical_mounts", "Number of mounts above the critical usage threshold")
    )
    .expect("Failed to create critical mounts gauge")
});

/// Initialize all metrics
pub fn init_metrics() {
    // Force lazy initialization
    Lazy::force(&HTTP_REQUESTS_TOTAL);
    Lazy::force(&DISK_AGGREGATIONS_TOTAL);
    Lazy::force(&DISK_VALIDATION_FAILURES_TOTAL);
    Lazy::force(&DISK_USED_PERCENT);
    Lazy::force(&DISK_TOTAL_BYTES);
    Lazy::force(&DISK_USED_BYTES);
    Lazy::force(&DISK_FILESYSTEMS);
    Lazy::force(&DISK_CRITICAL_MOUNTS);
}

/// Record an HTTP request
pub fn record_http_request() {
    HTTP_REQUESTS_TOTAL.inc();
}

/// Record a disk usage aggregation
pub fn record_aggregation() {
    DISK_AGGREGATIONS_TOTAL.inc();
}

/// Record a rejected disk usage summary
pub fn record_validation_failure() {
    DISK_VALIDATION_FAILURES_TOTAL.inc();
}

/// Publish the latest disk usage summary
pub fn set_disk_usage(usage: &DiskUsageAggregate) {
    DISK_USED_PERCENT.set(usage.used_percent);
    DISK_TOTAL_BYTES.set(i64::try_from(usage.total_bytes).unwrap_or(i64::MAX));
    DISK_USED_BYTES.set(i64::try_from(usage.used_bytes).unwrap_or(i64::MAX));
    DISK_FILESYSTEMS.set(i64::from(usage.filesystem_count));
    DISK_CRITICAL_MOUNTS.set(usage.critical_mounts.len() as i64);
}

/// Prometheus metrics endpoint
pub async fn metrics_endpoint() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(format!("Failed to encode metrics: {}", e));
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(buffer)
}
