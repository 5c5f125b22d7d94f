// handlers/public/auth/refresh.rs - POST /auth/refresh

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Session;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(alias = "refresh")]
    pub refresh_token: Option<String>,
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair
pub async fn refresh_post(State(state): State<AppState>, Json(body): Json<RefreshRequest>) -> ApiResult<Session> {
    let token = body
        .refresh_token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::missing_field("refresh_token"))?;

    let session = state.credentials().refresh(token.trim()).await?;
    Ok(ApiResponse::success(session))
}
