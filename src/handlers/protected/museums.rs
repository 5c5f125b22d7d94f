// handlers/protected/museums.rs - /api/museums, /api/museum, /api/visits

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::required_text;
use crate::database::models::Museum;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::types::Role;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MuseumQuery {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    #[serde(alias = "address")]
    pub museum_address: Option<String>,
}

/// GET /api/museums[?name=] - Exact-name filter when given
pub async fn museums_get(State(state): State<AppState>, Query(query): Query<MuseumQuery>) -> ApiResult<Vec<Museum>> {
    let name = query.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
    Ok(ApiResponse::success(state.catalog.museums(name).await?))
}

/// GET /api/museum?address=
pub async fn museum_get(State(state): State<AppState>, Query(query): Query<MuseumQuery>) -> ApiResult<Museum> {
    let address = required_text(&query.address, "address")?;
    let museum = state
        .catalog
        .museum(address)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Museum at '{}' not found", address)))?;
    Ok(ApiResponse::success(museum))
}

/// GET /api/visits - Museums the calling visitor has been to
pub async fn visits_get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Vec<Museum>> {
    user.require(&[Role::Visitor])?;
    Ok(ApiResponse::success(state.catalog.visited_museums(&user.email).await?))
}

/// POST /api/visits - Record a visit; repeating it is harmless
pub async fn visits_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<VisitRequest>,
) -> ApiResult<Value> {
    user.require(&[Role::Visitor])?;
    let address = required_text(&body.museum_address, "museumAddress")?;
    state.catalog.add_visit(&user.email, address).await?;
    Ok(ApiResponse::created(json!({ "museumAddress": address })).message("Visit recorded"))
}

/// DELETE /api/visits
pub async fn visits_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<VisitRequest>,
) -> ApiResult<Value> {
    user.require(&[Role::Visitor])?;
    let address = required_text(&body.museum_address, "museumAddress")?;
    if !state.catalog.remove_visit(&user.email, address).await? {
        return Err(ApiError::not_found("Visit not found"));
    }
    Ok(ApiResponse::success(json!({ "museumAddress": address })).message("Visit removed"))
}
