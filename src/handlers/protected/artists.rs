// handlers/protected/artists.rs - /api/artists[/:id][/works[/:artifact_id]]

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::{optional_date, required_text};
use crate::database::models::{Artifact, Artist, ArtistUpdate, NewArtist};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

/// GET /api/artists
pub async fn artists_get(State(state): State<AppState>) -> ApiResult<Vec<Artist>> {
    Ok(ApiResponse::success(state.catalog.artists().await?))
}

/// POST /api/artists - staff only
pub async fn artists_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ArtistRequest>,
) -> ApiResult<Artist> {
    user.require_staff()?;
    let artist = NewArtist {
        first_name: required_text(&body.first_name, "firstName")?.to_string(),
        middle_name: body.middle_name.as_deref().map(str::trim).unwrap_or_default().to_string(),
        last_name: required_text(&body.last_name, "lastName")?.to_string(),
        date_of_birth: optional_date(&body.date_of_birth, "dateOfBirth")?,
        date_of_death: optional_date(&body.date_of_death, "dateOfDeath")?,
    };
    Ok(ApiResponse::created(state.catalog.create_artist(artist).await?))
}

/// PATCH /api/artists/:id
pub async fn artist_patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<ArtistRequest>,
) -> ApiResult<Artist> {
    user.require_staff()?;
    let text = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let update = ArtistUpdate {
        first_name: text(body.first_name),
        middle_name: body.middle_name.map(|s| s.trim().to_string()),
        last_name: text(body.last_name),
        date_of_birth: optional_date(&body.date_of_birth, "dateOfBirth")?,
        date_of_death: optional_date(&body.date_of_death, "dateOfDeath")?,
    };
    if update.is_empty() {
        return Err(ApiError::bad_request("No update fields provided"));
    }
    let artist = state
        .catalog
        .update_artist(id, update)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Artist {} not found", id)))?;
    Ok(ApiResponse::success(artist))
}

/// DELETE /api/artists/:id
pub async fn artist_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    user.require_staff()?;
    if !state.catalog.delete_artist(id).await.map_err(ApiError::from_delete)? {
        return Err(ApiError::not_found(format!("Artist {} not found", id)));
    }
    Ok(ApiResponse::success(json!({ "id": id })).message("Artist deleted"))
}

/// GET /api/artists/:id/works
pub async fn artist_works_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<Artifact>> {
    Ok(ApiResponse::success(state.catalog.artist_works(id).await?))
}

/// PUT /api/artists/:id/works/:artifact_id
pub async fn artist_work_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, artifact_id)): Path<(i64, i64)>,
) -> ApiResult<Vec<Artifact>> {
    user.require_staff()?;
    state.catalog.link_work(id, artifact_id).await?;
    Ok(ApiResponse::success(state.catalog.artist_works(id).await?))
}

/// DELETE /api/artists/:id/works/:artifact_id
pub async fn artist_work_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, artifact_id)): Path<(i64, i64)>,
) -> ApiResult<Value> {
    user.require_staff()?;
    if !state.catalog.unlink_work(id, artifact_id).await? {
        return Err(ApiError::not_found("Artifact is not linked to this artist"));
    }
    Ok(ApiResponse::success(json!({ "artistId": id, "artifactId": artifact_id })))
}
