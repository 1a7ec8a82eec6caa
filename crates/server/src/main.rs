use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;

use waypoint_common::config;
use waypoint_server::backend::HttpPlaceClient;
use waypoint_server::routes::{self, AppState};
use waypoint_server::tools::{register_tools, ToolHandlerContext, ToolRegistry};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Waypoint starting");

    // Install Prometheus metrics recorder.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    let config_path = std::env::var("WAYPOINT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("waypoint.toml"));

    let config = match config::load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, path = %config_path.display(), "Refusing to start");
            std::process::exit(1);
        }
    };

    let http = reqwest::Client::builder()
        .user_agent("Waypoint/0.1")
        .build()
        .expect("Failed to build HTTP client");

    let backend = Arc::new(HttpPlaceClient::new(http, &config.backend));

    let mut registry = ToolRegistry::new(ToolHandlerContext {
        backend,
        search_defaults: config.search.clone(),
    });
    register_tools(&mut registry);

    tracing::info!(tools = registry.tool_names().len(), "Tools registered");

    let state = Arc::new(AppState {
        registry,
        metrics_handle,
    });

    let app = Router::new()
        .route("/health", get(routes::health_handler))
        .route("/metrics", get(routes::metrics_handler))
        .route("/tools", get(routes::list_handler))
        .route("/tools/call", post(routes::call_handler))
        .with_state(state);

    let port: u16 = std::env::var("WAYPOINT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8083);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!(port = port, "Waypoint listening");

    axum::serve(listener, app).await.expect("HTTP server error");
}
