//! Discovery diagnostics endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedModuleInfo {
    pub module_dir: String,
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsResponse {
    pub modules_dir: String,
    pub root_missing: bool,
    pub registered: usize,
    pub skipped: Vec<SkippedModuleInfo>,
}

/// GET /api/diagnostics
pub async fn get_diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let skipped = state
        .skipped
        .iter()
        .map(|module| SkippedModuleInfo {
            module_dir: module.module_dir.clone(),
            kind: module.reason.kind().to_string(),
            message: module.reason.to_string(),
        })
        .collect();

    Json(DiagnosticsResponse {
        modules_dir: state.modules_dir.display().to_string(),
        root_missing: state.root_missing,
        registered: state.registry.len(),
        skipped,
    })
}

pub fn diagnostics_routes() -> Router<AppState> {
    Router::new().route("/api/diagnostics", get(get_diagnostics))
}
