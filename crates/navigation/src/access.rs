//! Route access decisions.
//!
//! A path resolves to exactly one of three outcomes:
//! - `Granted`: matched for the actor's role and the permission check passed
//! - `Forbidden`: matched for the actor's role but permissions are missing
//! - `NotFound`: not registered for the actor's role at all
//!
//! The boolean `is_route_accessible` surface is a projection of this.

use std::collections::BTreeMap;

use serde::Serialize;

use mindbridge_auth::{missing_permissions, Actor, Permission, RequiredPermissions};

use crate::route::RouteTable;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Static,
    Dynamic,
}

/// The table entry a path resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRoute {
    pub kind: RouteKind,
    /// The static path or the dynamic template.
    pub route: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteDecision {
    Granted {
        matched: MatchedRoute,
    },
    Forbidden {
        matched: MatchedRoute,
        missing: Vec<Permission>,
    },
    NotFound,
}

impl RouteDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// Only an unmatched path is "not found"; a permission failure is not.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn matched(&self) -> Option<&MatchedRoute> {
        match self {
            Self::Granted { matched } | Self::Forbidden { matched, .. } => Some(matched),
            Self::NotFound => None,
        }
    }
}

/// Resolve `path` for `actor`.
///
/// Static tables are consulted first. A path registered statically for some
/// other role is not found for this actor, and dynamic templates are not
/// tried for it. Otherwise the actor's dynamic templates are tried in order.
/// The path is compared verbatim.
pub fn resolve_route(table: &RouteTable, path: &str, actor: &Actor) -> RouteDecision {
    let decision = if let Some(route) = table.static_route(actor.role, path) {
        decide(
            MatchedRoute {
                kind: RouteKind::Static,
                route: route.path.clone(),
                params: BTreeMap::new(),
            },
            route.required_permissions.as_ref(),
            actor,
        )
    } else if table.is_static_path(path) {
        RouteDecision::NotFound
    } else if let Some(m) = table.match_dynamic(actor.role, path) {
        decide(
            MatchedRoute {
                kind: RouteKind::Dynamic,
                route: m.descriptor.path.clone(),
                params: m.params,
            },
            m.descriptor.required_permissions.as_ref(),
            actor,
        )
    } else {
        RouteDecision::NotFound
    };

    tracing::debug!(
        path,
        role = %actor.role,
        granted = decision.is_granted(),
        not_found = decision.is_not_found(),
        "route resolved"
    );
    decision
}

fn decide(matched: MatchedRoute, required: Option<&RequiredPermissions>, actor: &Actor) -> RouteDecision {
    let missing = missing_permissions(required, actor.role, &actor.permissions);
    if missing.is_empty() {
        RouteDecision::Granted { matched }
    } else {
        RouteDecision::Forbidden { matched, missing }
    }
}

/// Boolean route check.
///
/// With `check_for_not_found == false` answers "may the actor open this
/// path"; with `true` answers "should this path be treated as not found".
pub fn is_route_accessible(table: &RouteTable, path: &str, actor: &Actor, check_for_not_found: bool) -> bool {
    let decision = resolve_route(table, path, actor);
    if check_for_not_found {
        decision.is_not_found()
    } else {
        decision.is_granted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindbridge_auth::Role;

    use crate::route::RouteDescriptor;

    fn table() -> RouteTable {
        let statics = BTreeMap::from([
            (Role::Therapist, vec![RouteDescriptor::open("/dashboard")]),
            (Role::Client, vec![RouteDescriptor::open("/appointments/book")]),
            (
                Role::Backoffice,
                vec![RouteDescriptor::gated("/backoffice/clients", RequiredPermissions::one("VIEW_CLIENTS"))],
            ),
        ]);
        let dynamics = BTreeMap::from([
            (Role::Therapist, vec![RouteDescriptor::open("/appointments/:appointmentId")]),
            (
                Role::Backoffice,
                vec![RouteDescriptor::gated(
                    "/backoffice/clients/:id",
                    RequiredPermissions::all(["VIEW_CLIENTS", "EDIT_CLIENTS"]),
                )],
            ),
        ]);
        RouteTable::new(statics, dynamics).unwrap()
    }

    #[test]
    fn static_permission_failure_is_forbidden_not_not_found() {
        let t = table();
        let actor = Actor::new(Role::Backoffice);

        let decision = resolve_route(&t, "/backoffice/clients", &actor);
        assert_eq!(
            decision,
            RouteDecision::Forbidden {
                matched: MatchedRoute {
                    kind: RouteKind::Static,
                    route: "/backoffice/clients".to_string(),
                    params: BTreeMap::new(),
                },
                missing: vec![Permission::from_static("VIEW_CLIENTS")],
            }
        );
        assert!(!is_route_accessible(&t, "/backoffice/clients", &actor, false));
        assert!(!is_route_accessible(&t, "/backoffice/clients", &actor, true));
    }

    #[test]
    fn other_roles_static_path_shadows_own_dynamic_template() {
        let t = table();
        let therapist = Actor::new(Role::Therapist);

        assert!(is_route_accessible(&t, "/appointments/17", &therapist, false));
        // `/appointments/book` belongs to clients; the therapist template is not tried.
        assert!(is_route_accessible(&t, "/appointments/book", &therapist, true));
        assert!(!is_route_accessible(&t, "/appointments/book", &therapist, false));
    }

    #[test]
    fn dynamic_match_reports_params() {
        let t = table();
        let actor = Actor::with_permissions(Role::Backoffice, ["VIEW_CLIENTS", "EDIT_CLIENTS"]);

        let decision = resolve_route(&t, "/backoffice/clients/abc", &actor);
        let matched = decision.matched().unwrap();
        assert!(decision.is_granted());
        assert_eq!(matched.kind, RouteKind::Dynamic);
        assert_eq!(matched.params.get("id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn unknown_path_is_not_found_for_everyone() {
        let t = table();
        for role in Role::ALL {
            let actor = Actor::new(role);
            assert_eq!(resolve_route(&t, "/nowhere", &actor), RouteDecision::NotFound);
        }
    }

    #[test]
    fn decision_serializes_with_outcome_tag() {
        let json = serde_json::to_value(RouteDecision::NotFound).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "not_found" }));
    }
}
