// handlers/public/auth/register.rs - POST /auth/register/:role

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{RegisteredAccount, RegistrationRequest};
use crate::types::Role;
use crate::AppState;

/// POST /auth/register/:role - Create an account and its role row in one transaction
///
/// `role` is one of `visitor`, `supervisor`, `employee`.
///
/// Expected Input:
/// ```json
/// {
///   "email": "s@x.com",
///   "username": "sam",
///   "password": "pw123",
///   "firstName": "Sam",
///   "middleName": "",            // optional
///   "lastName": "Smith",
///   "yearOfBirth": 1980,
///   "museumName": "Town Museum",  // supervisor only
///   "museumAddress": "1 Main St", // supervisor and employee
///   "supervisorEmail": "b@x.com"  // employee only
/// }
/// ```
///
/// Errors: 400 missing field, 409 duplicate email, 422 unknown supervisor or museum.
pub async fn register_post(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(body): Json<RegistrationRequest>,
) -> ApiResult<RegisteredAccount> {
    let role: Role = role.parse().map_err(ApiError::not_found)?;

    let account = state.registration().register(role, body).await?;
    let message = match role {
        Role::Visitor => "Account created successfully",
        Role::Supervisor => "Supervisor registered successfully",
        Role::Employee => "Employee registered successfully",
    };
    Ok(ApiResponse::created(account).message(message))
}
