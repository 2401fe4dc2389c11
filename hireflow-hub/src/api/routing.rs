//! Route table, static params and API dispatch lookups

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct RoutesQuery {
    /// `page` (default) or `api`
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HandlerQuery {
    pub base_path: String,
}

#[derive(Debug, Deserialize)]
pub struct DispatchQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub base_path: String,
    pub handler: String,
}

/// GET /api/routes?kind=page|api
pub async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<RoutesQuery>,
) -> ApiResult<Response> {
    match query.kind.as_deref() {
        None | Some("page") => Ok(Json(state.registry.routes()).into_response()),
        Some("api") => Ok(Json(state.registry.api_routes()).into_response()),
        Some(other) => Err(ApiError::BadRequest(format!(
            "unknown route kind {:?} (expected page or api)",
            other
        ))),
    }
}

/// GET /api/handlers?base_path=...
///
/// Exact base path lookup.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(query): Query<HandlerQuery>,
) -> ApiResult<Json<HandlerResponse>> {
    let handler = state
        .registry
        .api_handler(&query.base_path)
        .ok_or_else(|| ApiError::NotFound(format!("API base path {}", query.base_path)))?;

    Ok(Json(HandlerResponse {
        base_path: query.base_path.clone(),
        handler: handler.to_string(),
    }))
}

/// GET /api/dispatch?path=...
///
/// Resolve a full request path to the agent owning the longest matching base path.
pub async fn dispatch(
    State(state): State<AppState>,
    Query(query): Query<DispatchQuery>,
) -> ApiResult<Response> {
    let hit = state
        .registry
        .resolve_api_handler(&query.path)
        .ok_or_else(|| ApiError::NotFound(format!("no agent serves {}", query.path)))?;
    Ok(Json(hit).into_response())
}

/// GET /api/static-params
pub async fn static_params(State(state): State<AppState>) -> Response {
    Json(state.registry.static_params()).into_response()
}

/// Build route table routes
pub fn routing_routes() -> Router<AppState> {
    Router::new()
        .route("/api/routes", get(list_routes))
        .route("/api/handlers", get(get_handler))
        .route("/api/dispatch", get(dispatch))
        .route("/api/static-params", get(static_params))
}
