pub mod credential_service;
pub mod registration_service;

use thiserror::Error;

use crate::auth::{JwtError, PasswordError};
use crate::database::DatabaseError;
use crate::types::Portal;

pub use credential_service::{CredentialService, Session, VerifiedAccount};
pub use registration_service::{normalize_email, RegisteredAccount, RegistrationRequest, RegistrationService};

/// Failures of the credential and registration flows
#[derive(Debug, Error)]
pub enum AccountError {
    /// Unknown email and wrong password are indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is not registered for the {0} portal")]
    RoleMismatch(Portal),

    #[error("An account with email '{0}' already exists")]
    DuplicateAccount(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Referenced record does not exist: {0}")]
    ReferentialViolation(String),

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] DatabaseError),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),
}

impl From<JwtError> for AccountError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidToken(msg) => AccountError::InvalidToken(msg),
            JwtError::WrongKind { expected } => {
                AccountError::InvalidToken(format!("expected a {:?} token", expected).to_lowercase())
            }
            other => AccountError::TokenIssuance(other.to_string()),
        }
    }
}
