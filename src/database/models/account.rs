use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Museum;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub year_of_birth: i32,
    pub created_at: DateTime<Utc>,
}

/// Account row as inserted by registration. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: String,
    pub year_of_birth: i32,
}

/// Role row written alongside the account in the same transaction
#[derive(Debug, Clone)]
pub enum RoleAssignment {
    Visitor,
    /// The museum is inserted if its address is not known yet
    Supervisor { museum: Museum },
    Employee {
        supervisor_email: String,
        museum_address: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password_hash.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SupervisorInfo {
    pub email: String,
    pub username: String,
    pub museum_address: Option<String>,
    pub museum_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmployeeInfo {
    pub email: String,
    pub username: String,
    pub supervisor_email: String,
    pub museum_address: String,
    pub museum_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmployeeSummary {
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub username: String,
    pub museum_address: String,
}
