// handlers/protected/exhibits.rs - /api/exhibits[/:id]

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::{edit_stamp, required_text};
use crate::database::models::{Exhibit, ExhibitUpdate, NewExhibit};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExhibitQuery {
    pub museum: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitRequest {
    pub name: Option<String>,
    pub museum_address: Option<String>,
}

/// GET /api/exhibits[?museum=address]
pub async fn exhibits_get(State(state): State<AppState>, Query(query): Query<ExhibitQuery>) -> ApiResult<Vec<Exhibit>> {
    Ok(ApiResponse::success(state.catalog.exhibits(query.museum.as_deref()).await?))
}

/// POST /api/exhibits - staff only
pub async fn exhibits_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ExhibitRequest>,
) -> ApiResult<Exhibit> {
    user.require_staff()?;
    let exhibit = NewExhibit {
        name: required_text(&body.name, "name")?.to_string(),
        museum_address: required_text(&body.museum_address, "museumAddress")?.to_string(),
    };
    Ok(ApiResponse::created(state.catalog.create_exhibit(exhibit).await?))
}

/// PATCH /api/exhibits/:id - rename
pub async fn exhibit_patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<ExhibitRequest>,
) -> ApiResult<Exhibit> {
    let stamp = edit_stamp(&state, &user).await?;
    let update = ExhibitUpdate {
        name: Some(required_text(&body.name, "name")?.to_string()),
    };
    let exhibit = state
        .catalog
        .update_exhibit(id, update, &stamp)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Exhibit {} not found", id)))?;
    Ok(ApiResponse::success(exhibit))
}

/// DELETE /api/exhibits/:id - 409 while artifacts still belong to it
pub async fn exhibit_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    let stamp = edit_stamp(&state, &user).await?;
    if !state
        .catalog
        .delete_exhibit(id, &stamp)
        .await
        .map_err(ApiError::from_delete)?
    {
        return Err(ApiError::not_found(format!("Exhibit {} not found", id)));
    }
    Ok(ApiResponse::success(json!({ "id": id })).message("Exhibit deleted"))
}
