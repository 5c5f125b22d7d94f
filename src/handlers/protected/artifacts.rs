// handlers/protected/artifacts.rs - /api/artifacts[/:id]

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::{edit_stamp, required_text};
use crate::database::models::{Artifact, ArtifactDetail, ArtifactUpdate, NewArtifact};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ArtifactQuery {
    pub exhibit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year_made: Option<i32>,
    pub creators: Option<String>,
    pub display_status: Option<String>,
    pub exhibit_id: Option<i64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// GET /api/artifacts[?exhibit=id]
pub async fn artifacts_get(State(state): State<AppState>, Query(query): Query<ArtifactQuery>) -> ApiResult<Vec<Artifact>> {
    Ok(ApiResponse::success(state.catalog.artifacts(query.exhibit).await?))
}

/// GET /api/artifacts/:id - with exhibit and museum names
pub async fn artifact_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ArtifactDetail> {
    let artifact = state
        .catalog
        .artifact(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Artifact {} not found", id)))?;
    Ok(ApiResponse::success(artifact))
}

/// POST /api/artifacts - staff only; display status defaults to "On Display"
pub async fn artifacts_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ArtifactRequest>,
) -> ApiResult<Artifact> {
    user.require_staff()?;
    let name = required_text(&body.name, "name")?.to_string();
    let exhibit_id = body.exhibit_id.ok_or_else(|| ApiError::missing_field("exhibitId"))?;

    let artifact = NewArtifact {
        name,
        description: body.description.unwrap_or_default(),
        year_made: body.year_made,
        creators: non_blank(body.creators),
        display_status: non_blank(body.display_status),
        exhibit_id,
    };
    Ok(ApiResponse::created(state.catalog.create_artifact(artifact).await?))
}

/// PATCH /api/artifacts/:id - any subset of the editable fields
pub async fn artifact_patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<ArtifactRequest>,
) -> ApiResult<Artifact> {
    let stamp = edit_stamp(&state, &user).await?;
    let update = ArtifactUpdate {
        name: non_blank(body.name),
        description: body.description,
        year_made: body.year_made,
        creators: non_blank(body.creators),
        display_status: non_blank(body.display_status),
        exhibit_id: body.exhibit_id,
    };
    if update.is_empty() {
        return Err(ApiError::bad_request("No update fields provided"));
    }
    let artifact = state
        .catalog
        .update_artifact(id, update, &stamp)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Artifact {} not found", id)))?;
    Ok(ApiResponse::success(artifact))
}

/// DELETE /api/artifacts/:id
pub async fn artifact_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    let stamp = edit_stamp(&state, &user).await?;
    if !state
        .catalog
        .delete_artifact(id, &stamp)
        .await
        .map_err(ApiError::from_delete)?
    {
        return Err(ApiError::not_found(format!("Artifact {} not found", id)));
    }
    Ok(ApiResponse::success(json!({ "id": id })).message("Artifact deleted"))
}
