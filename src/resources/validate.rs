//! Consistency checks for disk usage summaries received from elsewhere

use chrono::DateTime;
use tracing::debug;

use crate::metrics::record_validation_failure;
use crate::models::DiskUsageAggregate;

/// Allowed drift between `used_percent` and the value recomputed from bytes
const PERCENT_TOLERANCE: f64 = 1.0;

/// Check that a summary is internally consistent
///
/// Returns false for a missing summary. `calculated_at` may be empty; when
/// present it must be RFC3339.
pub fn validate(aggregate: Option<&DiskUsageAggregate>) -> bool {
    let Some(agg) = aggregate else {
        return reject("no disk usage summary");
    };

    if !(0.0..=100.0).contains(&agg.used_percent) {
        return reject("used_percent out of range");
    }

    if agg.total_bytes > 0 {
        if agg.used_bytes.checked_add(agg.free_bytes) != Some(agg.total_bytes) {
            return reject("total_bytes != used_bytes + free_bytes");
        }

        let expected = agg.used_bytes as f64 / agg.total_bytes as f64 * 100.0;
        if (agg.used_percent - expected).abs() > PERCENT_TOLERANCE {
            return reject("used_percent disagrees with byte counts");
        }
    }

    if !agg.calculated_at.is_empty() && DateTime::parse_from_rfc3339(&agg.calculated_at).is_err() {
        return reject("calculated_at is not RFC3339");
    }

    true
}

fn reject(reason: &str) -> bool {
    debug!("Disk usage summary rejected: {}", reason);
    record_validation_failure();
    false
}
