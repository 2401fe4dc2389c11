//! Agent listing endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use hireflow_registry::Category;

use crate::{ApiError, ApiResult, AppState};

/// GET /api/agents
///
/// All registered agents, sorted by id so output is stable across restarts.
pub async fn list_agents(State(state): State<AppState>) -> Response {
    let mut agents = state.registry.all_agents();
    agents.sort_by(|a, b| a.id.cmp(&b.id));
    Json(agents).into_response()
}

/// GET /api/agents/:id
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let agent = state
        .registry
        .agent(&id)
        .ok_or_else(|| ApiError::NotFound(format!("agent {}", id)))?;
    Ok(Json(agent).into_response())
}

/// GET /api/categories/:category
///
/// Agents of one category in navigation order.
pub async fn list_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Response> {
    let category = category
        .parse::<Category>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(state.registry.agents_by_category(category)).into_response())
}

/// Build agent listing routes
pub fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/api/agents", get(list_agents))
        .route("/api/agents/:id", get(get_agent))
        .route("/api/categories/:category", get(list_category))
}
