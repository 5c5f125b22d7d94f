/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account roles. Every account carries exactly one role row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Visitor,
    Supervisor,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Visitor => "visitor",
            Role::Supervisor => "supervisor",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visitor" => Ok(Role::Visitor),
            "supervisor" => Ok(Role::Supervisor),
            "employee" => Ok(Role::Employee),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// Which role rows an account holds. Filled from the three role tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSet {
    pub visitor: bool,
    pub supervisor: bool,
    pub employee: bool,
}

impl RoleSet {
    pub fn contains(&self, role: Role) -> bool {
        match role {
            Role::Visitor => self.visitor,
            Role::Supervisor => self.supervisor,
            Role::Employee => self.employee,
        }
    }
}

/// Login paths. Each portal accepts a fixed, ordered list of roles and the
/// first role the account holds wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    Visitor,
    Staff,
}

impl Portal {
    pub fn accepted_roles(&self) -> &'static [Role] {
        match self {
            Portal::Visitor => &[Role::Visitor],
            Portal::Staff => &[Role::Supervisor, Role::Employee],
        }
    }

    /// First accepted role present in `roles`, in priority order
    pub fn resolve(&self, roles: &RoleSet) -> Option<Role> {
        self.accepted_roles().iter().copied().find(|r| roles.contains(*r))
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Portal::Visitor => f.write_str("visitor"),
            Portal::Staff => f.write_str("staff"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_portal_prefers_supervisor() {
        let roles = RoleSet { visitor: false, supervisor: true, employee: true };
        assert_eq!(Portal::Staff.resolve(&roles), Some(Role::Supervisor));

        let roles = RoleSet { employee: true, ..Default::default() };
        assert_eq!(Portal::Staff.resolve(&roles), Some(Role::Employee));
    }

    #[test]
    fn visitor_portal_ignores_staff_rows() {
        let roles = RoleSet { supervisor: true, ..Default::default() };
        assert_eq!(Portal::Visitor.resolve(&roles), None);
    }

    #[test]
    fn roles_parse_from_path_segments() {
        assert_eq!("employee".parse::<Role>(), Ok(Role::Employee));
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(Role::Supervisor.to_string(), "supervisor");
    }
}
