//! Outbound server metrics payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DiskMetrics, DiskUsageAggregate};
use crate::resources::aggregate;

/// Metrics submitted for one server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerMetrics {
    /// Server identifier assigned by the monitoring API
    pub server_id: String,
    pub hostname: String,
    pub collected_at: DateTime<Utc>,
    /// Raw per-filesystem samples, unfiltered
    #[serde(default)]
    pub disks: Vec<DiskMetrics>,
    /// Summary of `disks`; left out of the JSON entirely when not computed
    /// so older consumers keep seeing the payload shape they know
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<DiskUsageAggregate>,
}

impl ServerMetrics {
    /// Create a payload without a disk usage summary
    pub fn new(
        server_id: impl Into<String>,
        hostname: impl Into<String>,
        disks: Vec<DiskMetrics>,
    ) -> Self {
        Self {
            server_id: server_id.into(),
            hostname: hostname.into(),
            collected_at: Utc::now(),
            disks,
            disk_usage: None,
        }
    }

    /// Attach a summary computed from the payload's own samples
    pub fn with_disk_usage(mut self) -> Self {
        self.disk_usage = Some(aggregate(&self.disks));
        self
    }

    /// Whether any filesystem in the summary is above the critical threshold
    pub fn has_critical_mounts(&self) -> bool {
        self.disk_usage
            .as_ref()
            .map(|usage| !usage.critical_mounts.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_disks() -> Vec<DiskMetrics> {
        vec![
            DiskMetrics::new("/dev/sda1", "/", "ext4", 1_000, 950),
            DiskMetrics::new("tmpfs", "/run", "tmpfs", 500, 10),
        ]
    }

    #[test]
    fn test_disk_usage_omitted_when_absent() {
        let payload = ServerMetrics::new("srv-1", "web01", sample_disks());
        let value = serde_json::to_value(&payload).unwrap();

        assert!(value.get("disk_usage").is_none());
        assert_eq!(value["disks"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_with_disk_usage() {
        let payload = ServerMetrics::new("srv-1", "web01", sample_disks()).with_disk_usage();
        let usage = payload.disk_usage.as_ref().unwrap();

        assert_eq!(usage.filesystem_count, 1);
        assert_eq!(usage.critical_mounts, vec!["/".to_string()]);
        assert!(payload.has_critical_mounts());

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["disk_usage"]["largest_mount"], "/");
    }

    #[test]
    fn test_older_payload_shape_deserializes() {
        let json = r#"{
            "server_id": "srv-1",
            "hostname": "web01",
            "collected_at": "2024-05-01T12:00:00Z",
            "disks": []
        }"#;

        let payload: ServerMetrics = serde_json::from_str(json).unwrap();
        assert!(payload.disk_usage.is_none());
        assert!(!payload.has_critical_mounts());
    }
}
