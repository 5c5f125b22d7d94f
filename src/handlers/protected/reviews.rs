// handlers/protected/reviews.rs - artifact and event reviews, /api/reviews

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::required_text;
use crate::database::models::{ArtifactReview, EventReview, VisitorReviews};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::types::Role;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReviewRequest {
    #[serde(alias = "review", alias = "description")]
    pub body: Option<String>,
}

/// GET /api/artifacts/:id/reviews - newest first
pub async fn artifact_reviews_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<ArtifactReview>> {
    Ok(ApiResponse::success(state.catalog.artifact_reviews(id).await?))
}

/// POST /api/artifacts/:id/reviews - visitors only; replaces an earlier review
pub async fn artifact_review_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<ReviewRequest>,
) -> ApiResult<Value> {
    user.require(&[Role::Visitor])?;
    let text = required_text(&body.body, "body")?;
    state.catalog.put_artifact_review(&user.email, id, text).await?;
    Ok(ApiResponse::created(json!({ "artifactId": id, "body": text })).message("Review saved"))
}

/// DELETE /api/artifacts/:id/reviews - the caller's own review
pub async fn artifact_review_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    user.require(&[Role::Visitor])?;
    if !state.catalog.delete_artifact_review(&user.email, id).await? {
        return Err(ApiError::not_found("Review not found"));
    }
    Ok(ApiResponse::success(json!({ "artifactId": id })).message("Review deleted"))
}

/// GET /api/events/:id/reviews
pub async fn event_reviews_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<EventReview>> {
    Ok(ApiResponse::success(state.catalog.event_reviews(id).await?))
}

/// POST /api/events/:id/reviews
pub async fn event_review_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<ReviewRequest>,
) -> ApiResult<Value> {
    user.require(&[Role::Visitor])?;
    let text = required_text(&body.body, "body")?;
    state.catalog.put_event_review(&user.email, id, text).await?;
    Ok(ApiResponse::created(json!({ "eventId": id, "body": text })).message("Review saved"))
}

/// DELETE /api/events/:id/reviews
pub async fn event_review_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    user.require(&[Role::Visitor])?;
    if !state.catalog.delete_event_review(&user.email, id).await? {
        return Err(ApiError::not_found("Review not found"));
    }
    Ok(ApiResponse::success(json!({ "eventId": id })).message("Review deleted"))
}

/// GET /api/reviews - everything the calling visitor has written
pub async fn reviews_get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<VisitorReviews> {
    user.require(&[Role::Visitor])?;
    Ok(ApiResponse::success(state.catalog.visitor_reviews(&user.email).await?))
}
