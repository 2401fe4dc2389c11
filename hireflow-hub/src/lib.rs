//! hireflow-hub library - read-only HTTP surface over the agent registry
//!
//! The router is only built from a settled [`DiscoveryReport`], so no request
//! can observe a half-populated registry.

use axum::Router;
use chrono::{DateTime, Utc};
use hireflow_registry::{AgentRegistry, DiscoveryReport, SkippedModule};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Settled agent registry
    pub registry: Arc<AgentRegistry>,
    /// Modules skipped during discovery
    pub skipped: Arc<Vec<SkippedModule>>,
    /// Module root that was scanned
    pub modules_dir: PathBuf,
    /// Module root was absent at discovery time
    pub root_missing: bool,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create application state from a finished discovery run
    pub fn new(report: DiscoveryReport, modules_dir: PathBuf) -> Self {
        Self {
            registry: Arc::new(report.registry),
            skipped: Arc::new(report.skipped),
            modules_dir,
            root_missing: report.root_missing,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::agent_routes())
        .merge(api::routing_routes())
        .merge(api::navigation_routes())
        .merge(api::diagnostics_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
