// handlers/protected/auth.rs - GET /api/auth/whoami

use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/whoami - Claims carried by the caller's access token
///
/// ```json
/// { "success": true, "data": { "email": "a@x.com", "role": "visitor", "exp": 1767225600 } }
/// ```
pub async fn whoami(Extension(user): Extension<AuthUser>) -> ApiResult<AuthUser> {
    Ok(ApiResponse::success(user))
}
