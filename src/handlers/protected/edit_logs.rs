// handlers/protected/edit_logs.rs - GET /api/edit-logs

use axum::{extract::State, Extension};

use crate::database::models::EditLog;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::types::Role;
use crate::AppState;

/// GET /api/edit-logs - staff edits reported to the calling supervisor, newest first
pub async fn edit_logs_get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Vec<EditLog>> {
    user.require(&[Role::Supervisor])?;
    Ok(ApiResponse::success(state.catalog.edit_logs(&user.email).await?))
}
