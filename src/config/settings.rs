//! Agent configuration settings

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub agent: AgentSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub collector: CollectorSettings,
    pub metrics: MetricsSettings,
}

/// Agent identity settings
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    /// Server identifier reported in every payload
    pub server_id: String,
    /// Host name override; detected from the OS when unset
    pub hostname: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,
    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    9100
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Disk collection settings
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorSettings {
    /// Collection interval in seconds (default: 60)
    #[serde(default = "default_check_interval")]
    pub check_interval_sec: u64,
    /// Mounts table to enumerate filesystems from
    #[serde(default = "default_mounts_path")]
    pub mounts_path: String,
}

fn default_check_interval() -> u64 {
    60
}

fn default_mounts_path() -> String {
    "/proc/mounts".to_string()
}

impl Default for CollectorSettings {
    fn default() -> Self {
        CollectorSettings {
            check_interval_sec: default_check_interval(),
            mounts_path: default_mounts_path(),
        }
    }
}

/// Metrics settings
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Metrics endpoint path
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Settings {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load settings from a specific config file path (without extension)
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_path = path.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("agent.server_id", uuid::Uuid::new_v4().to_string())?
            .set_default("server.host", default_host())?
            .set_default("server.http_port", default_http_port() as i64)?
            .set_default("server.workers", default_workers() as i64)?
            .set_default("collector.check_interval_sec", default_check_interval() as i64)?
            .set_default("collector.mounts_path", default_mounts_path())?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.path", default_metrics_path())?
            // Add config file if it exists
            .add_source(File::with_name(config_path.to_str().unwrap_or("config")).required(false))
            // Add environment variables with prefix PULSE_AGENT_
            .add_source(Environment::with_prefix("PULSE_AGENT").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// Host name to report, falling back to the OS host name
    pub fn hostname(&self) -> String {
        self.agent
            .hostname
            .clone()
            .or_else(crate::resources::disk::local_hostname)
            .unwrap_or_else(|| "localhost".to_string())
    }
}

impl Settings {
    /// Built-in defaults, independent of files and environment
    pub fn defaults() -> Self {
        Settings {
            agent: AgentSettings {
                server_id: uuid::Uuid::new_v4().to_string(),
                hostname: None,
            },
            server: ServerSettings {
                host: default_host(),
                http_port: default_http_port(),
                workers: default_workers(),
            },
            collector: CollectorSettings::default(),
            metrics: MetricsSettings {
                enabled: true,
                path: default_metrics_path(),
            },
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        // Fall back to built-in defaults if config loading fails
        Settings::load().unwrap_or_else(|_| Settings::defaults())
    }
}
