use serde::{Deserialize, Serialize};

use crate::{Permission, Role};

/// The acting user as seen by authorization checks.
///
/// A missing permission list deserializes as empty; it is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Actor {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            permissions: Vec::new(),
        }
    }

    pub fn with_permissions<I, P>(role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self {
            role,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn holds(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

/// Session state: set at login, cleared at logout.
///
/// Owned by the caller and passed into resolver operations explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    actor: Option<Actor>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    pub fn login(&mut self, actor: Actor) {
        tracing::debug!(role = %actor.role, permissions = actor.permissions.len(), "session login");
        self.actor = Some(actor);
    }

    pub fn logout(&mut self) {
        if let Some(actor) = self.actor.take() {
            tracing::debug!(role = %actor.role, "session logout");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.actor.is_some()
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_then_logout_clears_actor() {
        let mut session = Session::anonymous();
        assert!(!session.is_authenticated());

        session.login(Actor::with_permissions(Role::Backoffice, ["VIEW_CLIENTS"]));
        assert!(session.is_authenticated());
        assert_eq!(session.actor().map(|a| a.role), Some(Role::Backoffice));

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.actor().is_none());
    }

    #[test]
    fn actor_without_permissions_field_deserializes_empty() {
        let actor: Actor = serde_json::from_str(r#"{"role":"backoffice"}"#).unwrap();
        assert_eq!(actor, Actor::new(Role::Backoffice));
    }
}
