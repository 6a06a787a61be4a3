//! Pulse Agent - Main Entry Point
//!
//! Starts the disk monitor and the HTTP server.

use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pulse_agent::api::{configure_routes, ApiState, AppState};
use pulse_agent::config::Settings;
use pulse_agent::metrics::{init_metrics, metrics_endpoint};
use pulse_agent::resources::DiskMonitor;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with RUST_LOG environment variable support
    // Default: info level for pulse_agent, warn for everything else
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pulse_agent=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true))
        .init();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}, using defaults", e);
        Settings::default()
    });
    let hostname = settings.hostname();

    info!(
        "Starting Pulse Agent v{} ({} on {})",
        env!("CARGO_PKG_VERSION"),
        settings.agent.server_id,
        hostname
    );
    info!("HTTP: {}:{}", settings.server.host, settings.server.http_port);

    // Initialize metrics
    if settings.metrics.enabled {
        init_metrics();
    }

    // Initialize disk monitor
    let monitor = Arc::new(DiskMonitor::new(
        settings.collector.clone(),
        settings.agent.server_id.clone(),
        hostname,
    ));
    // The first interval tick fires immediately and takes the initial snapshot
    let monitor_handle = Arc::clone(&monitor).start_monitoring();
    info!(
        "Disk monitor started (interval: {}s, mounts: {})",
        settings.collector.check_interval_sec,
        settings.collector.mounts_path
    );

    // Create application state for HTTP server
    let app_state = AppState::new(&settings.agent.server_id);
    let api_state = ApiState::new(Arc::clone(&monitor));
    let metrics_settings = settings.metrics.clone();

    // Start HTTP server
    let http_addr = format!("{}:{}", settings.server.host, settings.server.http_port);
    info!("Starting HTTP server on {}", http_addr);

    let server = HttpServer::new(move || {
        let mut app = App::new()
            // Add shared state
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(api_state.clone()))
            // Add middleware
            .wrap(TracingLogger::default())
            // Add routes
            .configure(configure_routes);

        if metrics_settings.enabled {
            app = app.route(&metrics_settings.path, web::get().to(metrics_endpoint));
        }

        app
    })
    .workers(settings.server.workers.max(1))
    .bind(&http_addr)?
    .run();

    server.await?;
    monitor_handle.abort();

    Ok(())
}
