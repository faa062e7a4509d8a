use serde::Serialize;
use thiserror::Error;

use crate::{Actor, Permission, RequiredPermissions, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permissions {}", join(.missing))]
    Forbidden { missing: Vec<Permission> },
}

fn join(perms: &[Permission]) -> String {
    perms.iter().map(Permission::as_str).collect::<Vec<_>>().join(", ")
}

/// Required permissions the actor lacks.
///
/// Empty when the requirement is absent or when `role` bypasses permission
/// checks. Order follows the requirement's declaration order.
pub fn missing_permissions(
    required: Option<&RequiredPermissions>,
    role: Role,
    held: &[Permission],
) -> Vec<Permission> {
    let Some(required) = required else {
        return Vec::new();
    };
    if !role.is_restricted() {
        return Vec::new();
    }

    required
        .as_slice()
        .iter()
        .filter(|p| !held.contains(*p))
        .cloned()
        .collect()
}

/// The authorization predicate shared by menu filtering and route checks.
///
/// - No IO
/// - No panics
/// - Absent requirement: always true
/// - Non-restricted role: always true
/// - Restricted role: true iff every required permission is held
pub fn is_authorized(required: Option<&RequiredPermissions>, role: Role, held: &[Permission]) -> bool {
    missing_permissions(required, role, held).is_empty()
}

/// `Result`-flavoured form of [`is_authorized`] for callers that want the
/// missing permissions reported.
pub fn authorize(actor: &Actor, required: Option<&RequiredPermissions>) -> Result<(), AuthzError> {
    let missing = missing_permissions(required, actor.role, &actor.permissions);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthzError::Forbidden { missing })
    }
}

/// Single-permission convenience check; always true for non-restricted roles.
pub fn has_permission(actor: &Actor, permission: &Permission) -> bool {
    !actor.role.is_restricted() || actor.holds(permission)
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationExplanation {
    pub role: Role,
    pub required_permissions: Vec<String>,
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// True when the role is not subject to permission checks.
    pub role_bypasses_permissions: bool,
    pub held_permissions: Vec<String>,
    pub missing_permissions: Vec<String>,
}

/// Explain why an authorization decision was made (or would be made).
pub fn explain_authorization(
    actor: &Actor,
    required: Option<&RequiredPermissions>,
) -> AuthorizationExplanation {
    let required_list: Vec<String> = required
        .map(|r| r.as_slice().iter().map(|p| p.as_str().to_string()).collect())
        .unwrap_or_default();

    let mut held: Vec<String> = actor.permissions.iter().map(|p| p.as_str().to_string()).collect();
    held.sort();
    held.dedup();

    let missing: Vec<String> = missing_permissions(required, actor.role, &actor.permissions)
        .iter()
        .map(|p| p.as_str().to_string())
        .collect();

    let bypass = !actor.role.is_restricted();
    let reason = if required.is_none() {
        "No permissions required (open access)".to_string()
    } else if bypass {
        format!("Role '{}' is not subject to permission checks", actor.role)
    } else if missing.is_empty() {
        format!("Role '{}' holds every required permission", actor.role)
    } else {
        format!("Role '{}' is missing permissions: {:?}", actor.role, missing)
    };

    AuthorizationExplanation {
        role: actor.role,
        required_permissions: required_list,
        granted: missing.is_empty(),
        reason,
        role_bypasses_permissions: bypass,
        held_permissions: held,
        missing_permissions: missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn backoffice(perms: &[&'static str]) -> Actor {
        Actor::with_permissions(Role::Backoffice, perms.iter().copied())
    }

    #[test]
    fn absent_requirement_is_open_access() {
        for role in Role::ALL {
            assert!(is_authorized(None, role, &[]));
        }
    }

    #[test]
    fn restricted_role_needs_every_permission() {
        let required = RequiredPermissions::all(["VIEW_X", "EDIT_X"]);
        let actor = backoffice(&["VIEW_X"]);

        let err = authorize(&actor, Some(&required)).unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                missing: vec![Permission::from_static("EDIT_X")]
            }
        );
        assert_eq!(err.to_string(), "forbidden: missing permissions EDIT_X");

        let actor = backoffice(&["EDIT_X", "VIEW_X"]);
        assert!(authorize(&actor, Some(&required)).is_ok());
    }

    #[test]
    fn restricted_role_without_permissions_is_denied_single_requirement() {
        let required = RequiredPermissions::one("VIEW_CLIENTS");
        assert!(!is_authorized(Some(&required), Role::Backoffice, &[]));
    }

    #[test]
    fn empty_requirement_set_passes_for_restricted_role() {
        let required = RequiredPermissions::all(Vec::<Permission>::new());
        assert!(is_authorized(Some(&required), Role::Backoffice, &[]));
    }

    #[test]
    fn explanation_reports_missing_permissions() {
        let required = RequiredPermissions::all(["VIEW_X", "EDIT_X"]);
        let explanation = explain_authorization(&backoffice(&["VIEW_X"]), Some(&required));

        assert!(!explanation.granted);
        assert!(!explanation.role_bypasses_permissions);
        assert_eq!(explanation.missing_permissions, vec!["EDIT_X".to_string()]);
        assert_eq!(explanation.held_permissions, vec!["VIEW_X".to_string()]);
    }

    #[test]
    fn explanation_flags_bypass_for_other_roles() {
        let required = RequiredPermissions::one("VIEW_X");
        let explanation = explain_authorization(&Actor::new(Role::Admin), Some(&required));

        assert!(explanation.granted);
        assert!(explanation.role_bypasses_permissions);
        assert!(explanation.reason.contains("not subject"));
    }

    fn non_restricted_role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Client), Just(Role::Therapist), Just(Role::Admin)]
    }

    proptest! {
        #[test]
        fn non_restricted_roles_always_have_permission(
            role in non_restricted_role(),
            perm in "[A-Z_]{1,16}",
        ) {
            let actor = Actor::new(role);
            prop_assert!(has_permission(&actor, &Permission::new(perm)));
        }

        #[test]
        fn restricted_has_permission_is_membership(
            held in prop::collection::vec("[A-C]{1,2}", 0..6),
            perm in "[A-C]{1,2}",
        ) {
            let actor = Actor::with_permissions(Role::Backoffice, held.iter().cloned().map(Permission::new));
            let expected = held.contains(&perm);
            prop_assert_eq!(has_permission(&actor, &Permission::new(perm)), expected);
        }
    }
}
