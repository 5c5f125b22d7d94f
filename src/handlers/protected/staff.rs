// handlers/protected/staff.rs - /api/supervisor, /api/supervisor/employees, /api/employee

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::account::{profile_update, ProfileUpdateRequest};
use crate::database::models::{EmployeeInfo, EmployeeSummary, SupervisorInfo};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::normalize_email;
use crate::types::Role;
use crate::AppState;

/// GET /api/supervisor - Username and museum of the calling supervisor
pub async fn supervisor_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<SupervisorInfo> {
    user.require(&[Role::Supervisor])?;
    let info = state
        .accounts
        .supervisor_info(&user.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Supervisor not found"))?;
    Ok(ApiResponse::success(info))
}

/// GET /api/supervisor/employees
pub async fn employees_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<EmployeeSummary>> {
    user.require(&[Role::Supervisor])?;
    let employees = state.accounts.employees_of(&user.email).await?;
    Ok(ApiResponse::success(employees))
}

/// Employee row, only when it reports to `supervisor_email`
async fn supervised_employee(state: &AppState, supervisor_email: &str, email: &str) -> Result<EmployeeInfo, ApiError> {
    state
        .accounts
        .employee_info(email)
        .await?
        .filter(|info| info.supervisor_email == supervisor_email)
        .ok_or_else(|| ApiError::not_found(format!("Employee '{}' not found", email)))
}

/// PATCH /api/supervisor/employees/:email - Change an employee's username or password
pub async fn employee_patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
    Json(body): Json<ProfileUpdateRequest>,
) -> ApiResult<EmployeeInfo> {
    user.require(&[Role::Supervisor])?;
    let email = normalize_email(&email);
    supervised_employee(&state, &user.email, &email).await?;

    let update = profile_update(&state, body).await?;
    state.accounts.update_account(&email, update).await?;

    let info = supervised_employee(&state, &user.email, &email).await?;
    info!("Supervisor '{}' updated employee '{}'", user.email, email);
    Ok(ApiResponse::success(info).message("Employee updated successfully"))
}

/// DELETE /api/supervisor/employees/:email
pub async fn employee_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Value> {
    user.require(&[Role::Supervisor])?;
    let email = normalize_email(&email);
    supervised_employee(&state, &user.email, &email).await?;

    state
        .accounts
        .delete_account(&email)
        .await
        .map_err(ApiError::from_delete)?;
    info!("Supervisor '{}' deleted employee '{}'", user.email, email);
    Ok(ApiResponse::success(json!({ "email": email })).message("Employee deleted successfully"))
}

/// GET /api/employee - Supervisor and museum of the calling employee
pub async fn employee_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<EmployeeInfo> {
    user.require(&[Role::Employee])?;
    let info = state
        .accounts
        .employee_info(&user.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;
    Ok(ApiResponse::success(info))
}
