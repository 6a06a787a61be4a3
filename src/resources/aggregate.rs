//! Disk usage aggregation

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use super::filter::should_include;
use crate::metrics::record_aggregation;
use crate::models::{DiskMetrics, DiskUsageAggregate};

/// Usage percentage above which a single mount is flagged (strictly greater)
pub const CRITICAL_USAGE_PERCENT: f64 = 90.0;

/// Summarize samples, stamping the result with the current time
pub fn aggregate(disks: &[DiskMetrics]) -> DiskUsageAggregate {
    aggregate_at(disks, Utc::now())
}

/// Summarize samples, stamping the result with `now`
///
/// Samples rejected by [`should_include`] or with zero capacity contribute
/// nothing. Used bytes are capped at capacity and free bytes are derived
/// once from the sums, so the summary always satisfies
/// `total == used + free`, even when the sums saturate at `u64::MAX`.
pub fn aggregate_at(disks: &[DiskMetrics], now: DateTime<Utc>) -> DiskUsageAggregate {
    let mut result = DiskUsageAggregate::default();
    let mut largest_capacity = 0u64;

    for disk in disks {
        if !should_include(disk) || disk.total_bytes == 0 {
            continue;
        }

        let used = disk.used_bytes.min(disk.total_bytes);

        // used <= total per sample, so the saturated sums keep used <= total
        result.total_bytes = result.total_bytes.saturating_add(disk.total_bytes);
        result.used_bytes = result.used_bytes.saturating_add(used);
        result.filesystem_count += 1;

        if disk.total_bytes > largest_capacity {
            largest_capacity = disk.total_bytes;
            result.largest_mount = disk.mountpoint.clone();
        }

        if disk.usage_percent > CRITICAL_USAGE_PERCENT {
            result.critical_mounts.push(disk.mountpoint.clone());
        }
    }

    result.free_bytes = result.total_bytes - result.used_bytes;
    if result.total_bytes > 0 {
        result.used_percent = result.used_bytes as f64 / result.total_bytes as f64 * 100.0;
    }
    result.calculated_at = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    record_aggregation();
    debug!(
        "Aggregated {} of {} filesystems: {:.1}% used, {} critical",
        result.filesystem_count,
        disks.len(),
        result.used_percent,
        result.critical_mounts.len()
    );

    result
}
