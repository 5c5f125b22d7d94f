use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use super::AccountError;
use crate::auth::hash_password_blocking;
use crate::database::models::{Museum, NewAccount, RoleAssignment};
use crate::database::{AccountStore, DatabaseError};
use crate::types::Role;

/// Registration body as sent by the front end. Everything is optional here
/// so that a missing field is reported by name instead of as a JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    /// Number or numeric string
    pub year_of_birth: Option<Value>,
    pub museum_name: Option<String>,
    pub museum_address: Option<String>,
    pub supervisor_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredAccount {
    pub email: String,
    pub role: Role,
}

pub struct RegistrationService {
    store: Arc<dyn AccountStore>,
    min_password_length: usize,
}

/// Present and non-blank
fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, AccountError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AccountError::MissingField(field)),
    }
}

fn year_of_birth(value: &Option<Value>) -> Result<i32, AccountError> {
    let invalid = |reason: &str| AccountError::InvalidField {
        field: "yearOfBirth",
        reason: reason.to_string(),
    };
    let year = match value {
        None | Some(Value::Null) => return Err(AccountError::MissingField("yearOfBirth")),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(AccountError::MissingField("yearOfBirth")),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid("not a number"))?,
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| invalid("not a whole number"))?,
        Some(_) => return Err(invalid("not a number")),
    };
    if !(1800..=9999).contains(&year) {
        return Err(invalid("out of range"));
    }
    Ok(year as i32)
}

impl RegistrationService {
    pub fn new(store: Arc<dyn AccountStore>, min_password_length: usize) -> Self {
        Self {
            store,
            min_password_length,
        }
    }

    /// Validate, hash, and write the account plus its role row atomically
    pub async fn register(&self, role: Role, request: RegistrationRequest) -> Result<RegisteredAccount, AccountError> {
        let (account, assignment) = self.validate(role, &request).await?;
        let email = account.email.clone();

        match self.store.register(account, assignment).await {
            Ok(()) => {
                info!("Registered {} '{}'", role, email);
                Ok(RegisteredAccount { email, role })
            }
            Err(DatabaseError::UniqueViolation(_)) => {
                warn!("Registration refused for '{}': email already in use", email);
                Err(AccountError::DuplicateAccount(email))
            }
            Err(DatabaseError::ForeignKeyViolation(constraint)) => {
                warn!("Registration refused for '{}': {}", email, constraint);
                Err(AccountError::ReferentialViolation(referenced_entity(&constraint).to_string()))
            }
            Err(e) => {
                error!("Registration of '{}' failed and was rolled back: {}", email, e);
                Err(AccountError::StorageFailure(e))
            }
        }
    }

    /// Field checks run in a fixed order, common fields first
    async fn validate(&self, role: Role, request: &RegistrationRequest) -> Result<(NewAccount, RoleAssignment), AccountError> {
        let email = normalize_email(required(&request.email, "email")?);
        let username = required(&request.username, "username")?;
        let first_name = required(&request.first_name, "firstName")?;
        let last_name = required(&request.last_name, "lastName")?;
        let password = request
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(AccountError::MissingField("password"))?;
        let year_of_birth = year_of_birth(&request.year_of_birth)?;

        if !email.contains('@') {
            return Err(AccountError::InvalidField {
                field: "email",
                reason: "not an email address".to_string(),
            });
        }
        if password.chars().count() < self.min_password_length {
            return Err(AccountError::InvalidField {
                field: "password",
                reason: format!("must be at least {} characters", self.min_password_length),
            });
        }

        let assignment = match role {
            Role::Visitor => RoleAssignment::Visitor,
            Role::Supervisor => RoleAssignment::Supervisor {
                museum: Museum {
                    address: required(&request.museum_address, "museumAddress")?.to_string(),
                    name: required(&request.museum_name, "museumName")?.to_string(),
                },
            },
            Role::Employee => RoleAssignment::Employee {
                supervisor_email: normalize_email(required(&request.supervisor_email, "supervisorEmail")?),
                museum_address: required(&request.museum_address, "museumAddress")?.to_string(),
            },
        };

        let account = NewAccount {
            email,
            first_name: first_name.to_string(),
            middle_name: request.middle_name.as_deref().map(str::trim).unwrap_or_default().to_string(),
            last_name: last_name.to_string(),
            username: username.to_string(),
            password_hash: hash_password_blocking(password.to_string()).await?,
            year_of_birth,
        };
        Ok((account, assignment))
    }
}

/// Emails are stored and compared lowercase
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Human name for the row a foreign key points at
fn referenced_entity(constraint: &str) -> &'static str {
    if constraint.contains("supervisor") {
        "supervisor"
    } else if constraint.contains("museum") {
        "museum"
    } else {
        "referenced record"
    }
}
