//! Disk monitoring service

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, info, warn};

use super::disk::collect_disk_metrics;
use crate::config::CollectorSettings;
use crate::metrics::set_disk_usage;
use crate::models::{AgentError, AgentResult, DiskMetrics, DiskUsageAggregate, ServerMetrics};

/// Keeps the latest metrics snapshot for this server up to date
pub struct DiskMonitor {
    settings: CollectorSettings,
    server_id: String,
    hostname: String,
    mounts_path: PathBuf,
    latest: Arc<RwLock<Option<ServerMetrics>>>,
}

impl DiskMonitor {
    /// Create a new disk monitor with the given settings
    pub fn new(
        settings: CollectorSettings,
        server_id: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        let mounts_path = PathBuf::from(&settings.mounts_path);

        DiskMonitor {
            settings,
            server_id: server_id.into(),
            hostname: hostname.into(),
            mounts_path,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the latest snapshot, if one has been taken
    pub fn latest(&self) -> Option<ServerMetrics> {
        self.latest.read().clone()
    }

    /// Get the disk usage summary of the latest snapshot
    pub fn latest_disk_usage(&self) -> Option<DiskUsageAggregate> {
        self.latest
            .read()
            .as_ref()
            .and_then(|snapshot| snapshot.disk_usage.clone())
    }

    /// Collect local samples and replace the snapshot
    ///
    /// `statvfs` on a hung network mount blocks, so collection runs on the
    /// blocking pool.
    pub async fn refresh(&self) -> AgentResult<ServerMetrics> {
        let mounts_path = self.mounts_path.clone();
        let disks = tokio::task::spawn_blocking(move || collect_disk_metrics(&mounts_path))
            .await
            .map_err(|e| AgentError::Internal(format!("disk collection task failed: {}", e)))??;

        Ok(self.refresh_from(disks))
    }

    /// Replace the snapshot with one built from the given samples
    pub fn refresh_from(&self, disks: Vec<DiskMetrics>) -> ServerMetrics {
        let snapshot = ServerMetrics::new(&self.server_id, &self.hostname, disks).with_disk_usage();

        if let Some(usage) = &snapshot.disk_usage {
            set_disk_usage(usage);
            self.log_critical_changes(usage);
        }

        *self.latest.write() = Some(snapshot.clone());
        debug!(
            "Metrics snapshot updated: {} disks sampled",
            snapshot.disks.len()
        );

        snapshot
    }

    fn log_critical_changes(&self, usage: &DiskUsageAggregate) {
        let previous = self
            .latest_disk_usage()
            .map(|u| u.critical_mounts)
            .unwrap_or_default();

        for mount in &usage.critical_mounts {
            if !previous.contains(mount) {
                warn!("Mount {} is above critical usage", mount);
            }
        }

        for mount in &previous {
            if !usage.critical_mounts.contains(mount) {
                info!("Mount {} returned below critical usage", mount);
            }
        }
    }

    /// Start the background monitoring task
    pub fn start_monitoring(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let interval_secs = self.settings.check_interval_sec.max(1);

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(interval_secs));

            loop {
                interval.tick().await;
                if let Err(e) = self.refresh().await {
                    warn!("Failed to collect disk metrics: {}", e);
                }
            }
        })
    }
}
