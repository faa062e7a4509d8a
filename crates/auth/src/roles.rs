use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse-grained actor category. Exactly one per authenticated session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Therapist,
    Admin,
    Backoffice,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 4] = [Role::Client, Role::Therapist, Role::Admin, Role::Backoffice];

    /// The role whose access is gated by fine-grained permissions.
    pub const RESTRICTED: Role = Role::Backoffice;

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Therapist => "therapist",
            Role::Admin => "admin",
            Role::Backoffice => "backoffice",
        }
    }

    /// Whether permission requirements apply to this role.
    ///
    /// All other roles are pre-authorized by role membership alone.
    pub fn is_restricted(&self) -> bool {
        *self == Self::RESTRICTED
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Therapist".parse::<Role>(), Ok(Role::Therapist));
        assert_eq!(" backoffice ".parse::<Role>(), Ok(Role::Backoffice));
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(RoleParseError("superuser".to_string()))
        );
    }

    #[test]
    fn only_backoffice_is_restricted() {
        let restricted: Vec<Role> = Role::ALL.into_iter().filter(Role::is_restricted).collect();
        assert_eq!(restricted, vec![Role::Backoffice]);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let r: Role = serde_json::from_str("\"client\"").unwrap();
        assert_eq!(r, Role::Client);
    }
}
