// handlers/public/auth/login.rs - POST /auth/login/visitor, POST /auth/login/staff

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Session;
use crate::types::{Portal, Role};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /auth/login/visitor - Authenticate an account holding a visitor row
///
/// Expected Input:
/// ```json
/// { "email": "a@x.com", "password": "pw123" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "message": "Visitor login successful",
///   "data": {
///     "email": "a@x.com",
///     "username": "ada",
///     "role": "visitor",
///     "access_token": "eyJhbGciOiJIUzI1NiI...",
///     "refresh_token": "eyJhbGciOiJIUzI1NiI...",
///     "token_type": "Bearer",
///     "expires_in": 86400
///   }
/// }
/// ```
pub async fn login_visitor(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> ApiResult<Session> {
    login(&state, body, Portal::Visitor).await
}

/// POST /auth/login/staff - Supervisors first, then employees
pub async fn login_staff(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> ApiResult<Session> {
    login(&state, body, Portal::Staff).await
}

async fn login(state: &AppState, body: LoginRequest, portal: Portal) -> ApiResult<Session> {
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::missing_field("email"))?;
    let password = body
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::missing_field("password"))?;

    let session = state.credentials().login(email, password, portal).await?;
    let message = match session.role {
        Role::Visitor => "Visitor login successful",
        Role::Supervisor => "Supervisor login successful",
        Role::Employee => "Employee login successful",
    };
    Ok(ApiResponse::success(session).message(message))
}
