//! Disk sample and disk usage summary models

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One observed filesystem at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskMetrics {
    /// Block device or source identifier (e.g. "/dev/sda1")
    pub device: String,
    /// Mount path
    pub mountpoint: String,
    /// Filesystem type name (e.g. "ext4", "tmpfs")
    pub filesystem: String,
    /// Capacity in bytes
    #[serde(default, deserialize_with = "non_negative_bytes")]
    pub total_bytes: u64,
    /// Used bytes
    #[serde(default, deserialize_with = "non_negative_bytes")]
    pub used_bytes: u64,
    /// Free bytes
    #[serde(default, deserialize_with = "non_negative_bytes")]
    pub free_bytes: u64,
    /// Usage percentage as reported by the collector
    #[serde(default)]
    pub usage_percent: f64,
}

impl DiskMetrics {
    /// Create a sample, deriving free bytes and the usage percentage
    pub fn new(
        device: impl Into<String>,
        mountpoint: impl Into<String>,
        filesystem: impl Into<String>,
        total_bytes: u64,
        used_bytes: u64,
    ) -> Self {
        let used_bytes = used_bytes.min(total_bytes);
        let usage_percent = if total_bytes == 0 {
            0.0
        } else {
            used_bytes as f64 / total_bytes as f64 * 100.0
        };

        Self {
            device: device.into(),
            mountpoint: mountpoint.into(),
            filesystem: filesystem.into(),
            total_bytes,
            used_bytes,
            free_bytes: total_bytes - used_bytes,
            usage_percent,
        }
    }

    /// Override the reported usage percentage
    pub fn with_usage_percent(mut self, usage_percent: f64) -> Self {
        self.usage_percent = usage_percent;
        self
    }
}

/// Summary of several filesystem samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskUsageAggregate {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    /// used / total * 100, or 0 when nothing was counted
    pub used_percent: f64,
    /// Number of filesystems that contributed to the sums
    pub filesystem_count: u32,
    /// Mountpoint with the greatest capacity, empty if none contributed
    pub largest_mount: String,
    /// Mountpoints above the critical usage threshold, in input order
    #[serde(default)]
    pub critical_mounts: Vec<String>,
    /// RFC3339 computation time, empty if not stamped
    #[serde(default)]
    pub calculated_at: String,
}

/// Accepts any JSON number and clamps it into `u64`.
///
/// Upstream collectors occasionally report negative byte counts; those
/// become zero instead of failing the whole payload.
fn non_negative_bytes<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct NonNegative;

    impl<'de> serde::de::Visitor<'de> for NonNegative {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a byte count")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<u64, E> {
            Ok(u64::try_from(v).unwrap_or(0))
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<u64, E> {
            // `as` saturates and maps NaN to 0
            Ok(v as u64)
        }
    }

    deserializer.deserialize_any(NonNegative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_free_and_percent() {
        let disk = DiskMetrics::new("/dev/sda1", "/", "ext4", 1_000, 250);
        assert_eq!(disk.free_bytes, 750);
        assert!((disk.usage_percent - 25.0).abs() < f64::EPSILON);

        let overfull = DiskMetrics::new("/dev/sdb1", "/data", "xfs", 100, 500);
        assert_eq!(overfull.used_bytes, 100);
        assert_eq!(overfull.free_bytes, 0);
    }

    #[test]
    fn test_negative_bytes_clamp_to_zero() {
        let json = r#"{
            "device": "/dev/sda1",
            "mountpoint": "/",
            "filesystem": "ext4",
            "total_bytes": 1000,
            "used_bytes": -5,
            "free_bytes": 1000.7,
            "usage_percent": 0.0
        }"#;

        let disk: DiskMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(disk.total_bytes, 1000);
        assert_eq!(disk.used_bytes, 0);
        assert_eq!(disk.free_bytes, 1000);
    }

    #[test]
    fn test_aggregate_missing_optional_fields() {
        let json = r#"{
            "total_bytes": 0,
            "used_bytes": 0,
            "free_bytes": 0,
            "used_percent": 0.0,
            "filesystem_count": 0,
            "largest_mount": ""
        }"#;

        let agg: DiskUsageAggregate = serde_json::from_str(json).unwrap();
        assert!(agg.critical_mounts.is_empty());
        assert!(agg.calculated_at.is_empty());
    }

    #[test]
    fn test_critical_mounts_always_serialized() {
        let value = serde_json::to_value(DiskUsageAggregate::default()).unwrap();
        assert_eq!(value["critical_mounts"], serde_json::json!([]));
    }
}
