// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::JwtError;
use crate::database::DatabaseError;
use crate::services::AccountError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },
    MissingField(String),

    // 401 Unauthorized
    Unauthorized(String),
    InvalidCredentials,

    // 403 Forbidden
    Forbidden(String),
    RoleMismatch(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),
    DuplicateAccount(String),

    // 422 Unprocessable Entity (well-formed request naming rows that do not exist)
    ReferentialViolation(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::MissingField(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::InvalidCredentials => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::RoleMismatch(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::DuplicateAccount(_) => 409,
            ApiError::ReferentialViolation(_) => 422,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::MissingField(_) => "Missing required fields",
            ApiError::Unauthorized(msg) => msg,
            ApiError::InvalidCredentials => "Invalid email or password",
            ApiError::Forbidden(msg) => msg,
            ApiError::RoleMismatch(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::DuplicateAccount(msg) => msg,
            ApiError::ReferentialViolation(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, field_errors } => {
                let mut response = json!({
                    "error": true,
                    "message": message,
                    "code": self.error_code()
                });

                if let Some(field_errors) = field_errors {
                    response["field_errors"] = json!(field_errors);
                }

                response
            }
            ApiError::MissingField(field) => {
                json!({
                    "error": true,
                    "message": format!("Missing field: {}", field),
                    "code": self.error_code(),
                    "field_errors": { field: "This field is required" }
                })
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::MissingField(_) => "MISSING_FIELD",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::RoleMismatch(_) => "ROLE_MISMATCH",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            ApiError::ReferentialViolation(_) => "REFERENTIAL_VIOLATION",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: Option<HashMap<String, String>>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    /// Single-field validation failure
    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(field.to_string(), reason.into());
        ApiError::validation_error("Invalid field format", Some(field_errors))
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        ApiError::MissingField(field.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn referential_violation(message: impl Into<String>) -> Self {
        ApiError::ReferentialViolation(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    /// Storage error raised by a delete. A foreign key violation there means
    /// other rows still point at the target.
    pub fn from_delete(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ForeignKeyViolation(constraint) => {
                tracing::warn!("Delete blocked by {}", constraint);
                ApiError::conflict("Record is still referenced by other records")
            }
            other => other.into(),
        }
    }
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::UniqueViolation(constraint) => {
                tracing::warn!("Unique constraint violated: {}", constraint);
                ApiError::conflict("Record already exists")
            }
            DatabaseError::ForeignKeyViolation(constraint) => {
                tracing::warn!("Foreign key violated: {}", constraint);
                ApiError::referential_violation("Referenced record does not exist")
            }
            DatabaseError::CheckViolation(constraint) => {
                tracing::warn!("Check constraint violated: {}", constraint);
                ApiError::validation_error("Record violates a data constraint", None)
            }
            DatabaseError::ConnectionError(msg) => {
                tracing::error!("Database connection error: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::MigrationError(msg) => {
                tracing::error!("Migration error: {}", msg);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
            DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseUrl => {
                tracing::error!("Database misconfigured: {}", err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidCredentials => ApiError::InvalidCredentials,
            AccountError::RoleMismatch(_) => ApiError::RoleMismatch(err.to_string()),
            AccountError::DuplicateAccount(_) => ApiError::DuplicateAccount(err.to_string()),
            AccountError::MissingField(field) => ApiError::missing_field(field),
            AccountError::InvalidField { field, reason } => ApiError::invalid_field(field, reason),
            AccountError::ReferentialViolation(what) => {
                ApiError::referential_violation(format!("Referenced {} does not exist", what))
            }
            AccountError::InvalidToken(msg) => ApiError::unauthorized(format!("Invalid token: {}", msg)),
            AccountError::StorageFailure(db_err) => db_err.into(),
            AccountError::Hashing(_) | AccountError::TokenIssuance(_) => {
                tracing::error!("Account flow failed: {}", err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidToken(_) | JwtError::WrongKind { .. } => ApiError::unauthorized(err.to_string()),
            JwtError::TokenGeneration(_) | JwtError::InvalidSecret => {
                tracing::error!("Token error: {}", err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Portal;

    #[test]
    fn account_errors_map_to_their_statuses() {
        let cases: Vec<(AccountError, u16, &str)> = vec![
            (AccountError::InvalidCredentials, 401, "INVALID_CREDENTIALS"),
            (AccountError::RoleMismatch(Portal::Visitor), 403, "ROLE_MISMATCH"),
            (AccountError::DuplicateAccount("a@x.com".into()), 409, "DUPLICATE_ACCOUNT"),
            (AccountError::MissingField("email"), 400, "MISSING_FIELD"),
            (AccountError::ReferentialViolation("museum".into()), 422, "REFERENTIAL_VIOLATION"),
            (
                AccountError::StorageFailure(DatabaseError::ConnectionError("reset".into())),
                503,
                "SERVICE_UNAVAILABLE",
            ),
        ];
        for (err, status, code) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status_code(), status);
            assert_eq!(api.error_code(), code);
        }
    }

    #[test]
    fn missing_field_names_the_field() {
        let body = ApiError::missing_field("yearOfBirth").to_json();
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Missing field: yearOfBirth");
        assert_eq!(body["field_errors"]["yearOfBirth"], "This field is required");
    }

    #[test]
    fn storage_details_stay_out_of_the_response() {
        let api: ApiError = DatabaseError::ConnectionError("host db-7 refused".into()).into();
        assert!(!api.to_json().to_string().contains("db-7"));

        let blocked = ApiError::from_delete(DatabaseError::ForeignKeyViolation("artifacts_exhibit_id_fkey".into()));
        assert_eq!(blocked.status_code(), 409);
    }
}
