//! Navigation menu endpoint

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::AppState;

/// GET /api/navigation
///
/// One key per category, always present, each list in navigation order.
pub async fn get_navigation(State(state): State<AppState>) -> Response {
    Json(state.registry.navigation()).into_response()
}

pub fn navigation_routes() -> Router<AppState> {
    Router::new().route("/api/navigation", get(get_navigation))
}
