// handlers/protected/account.rs - /api/account (the caller's own profile)

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::hash_password_blocking;
use crate::database::models::{Account, AccountUpdate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

/// Username and/or password change. `newUsername` / `newPassword` are
/// accepted as aliases.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(alias = "newUsername")]
    pub username: Option<String>,
    #[serde(alias = "newPassword")]
    pub password: Option<String>,
}

/// Turn the request into a store update, hashing any new password
pub async fn profile_update(state: &AppState, body: ProfileUpdateRequest) -> Result<AccountUpdate, ApiError> {
    let username = body.username.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
    let password_hash = match body.password.filter(|p| !p.is_empty()) {
        Some(password) => {
            if password.chars().count() < state.min_password_length {
                return Err(ApiError::invalid_field(
                    "password",
                    format!("must be at least {} characters", state.min_password_length),
                ));
            }
            Some(hash_password_blocking(password).await.map_err(|e| {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            })?)
        }
        None => None,
    };

    let update = AccountUpdate {
        username,
        password_hash,
    };
    if update.is_empty() {
        return Err(ApiError::bad_request("No update fields provided"));
    }
    Ok(update)
}

/// GET /api/account
pub async fn account_get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Account> {
    let account = state
        .accounts
        .account(&user.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Account not found"))?;
    Ok(ApiResponse::success(account))
}

/// PATCH /api/account
pub async fn account_patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ProfileUpdateRequest>,
) -> ApiResult<Account> {
    let update = profile_update(&state, body).await?;
    if !state.accounts.update_account(&user.email, update).await? {
        return Err(ApiError::not_found("Account not found"));
    }
    let account = state
        .accounts
        .account(&user.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Account not found"))?;
    Ok(ApiResponse::success(account).message("Profile updated successfully"))
}

/// DELETE /api/account - Removes the account and its role rows.
/// A supervisor who still has employees gets 409.
pub async fn account_delete(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    let deleted = state
        .accounts
        .delete_account(&user.email)
        .await
        .map_err(ApiError::from_delete)?;
    if !deleted {
        return Err(ApiError::not_found("Account not found"));
    }
    info!("Account '{}' deleted", user.email);
    Ok(ApiResponse::success(json!({ "email": user.email })).message("Account deleted successfully"))
}
