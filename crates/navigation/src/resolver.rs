//! Access resolver facade.
//!
//! Owns the validated tables and answers every navigation question for an
//! explicitly supplied actor. Immutable after construction, so one instance
//! can be shared across threads behind an `Arc`.

use std::collections::BTreeMap;

use mindbridge_auth::{
    explain_authorization, AuthorizationExplanation, Actor, Permission, RequiredPermissions, Role,
    Session,
};

use crate::access::{self, RouteDecision};
use crate::config::{ConfigError, NavigationConfig};
use crate::menu::{filter_menu, MenuItem};
use crate::route::RouteTable;

/// Fallback landing path for a role with no configured landing route.
const ROOT: &str = "/";

#[derive(Debug, Clone)]
pub struct AccessResolver {
    menu: Vec<MenuItem>,
    routes: RouteTable,
    landing_routes: BTreeMap<Role, String>,
    entry_paths: Vec<String>,
}

impl AccessResolver {
    pub fn from_config(config: NavigationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let routes = config.route_table()?;

        tracing::info!(
            menu_items = config.menu.len(),
            roles = routes.roles().len(),
            entry_paths = config.entry_paths.len(),
            "navigation tables loaded"
        );

        Ok(Self {
            menu: config.menu,
            routes,
            landing_routes: config.landing_routes,
            entry_paths: config.entry_paths,
        })
    }

    /// Resolver over the built-in catalog.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_config(NavigationConfig::default())
    }

    /// Sidebar items `role` may see. `None` permissions are treated as empty.
    pub fn menu_items_by_role(&self, role: Role, permissions: Option<&[Permission]>) -> Vec<MenuItem> {
        let held = permissions.unwrap_or_default();
        let items = filter_menu(&self.menu, role, held);
        tracing::debug!(%role, visible = items.len(), "menu filtered");
        items
    }

    pub fn menu_items(&self, actor: &Actor) -> Vec<MenuItem> {
        self.menu_items_by_role(actor.role, Some(actor.permissions.as_slice()))
    }

    pub fn resolve_route(&self, actor: &Actor, path: &str) -> RouteDecision {
        access::resolve_route(&self.routes, path, actor)
    }

    pub fn is_route_accessible(&self, actor: &Actor, path: &str, check_for_not_found: bool) -> bool {
        access::is_route_accessible(&self.routes, path, actor, check_for_not_found)
    }

    pub fn has_permission(&self, actor: &Actor, permission: &Permission) -> bool {
        mindbridge_auth::has_permission(actor, permission)
    }

    /// Explain the permission check behind a route decision.
    ///
    /// Unmatched paths are explained as open access: there is no requirement
    /// to check, the route simply does not exist for the actor.
    pub fn explain_route(&self, actor: &Actor, path: &str) -> (RouteDecision, AuthorizationExplanation) {
        let decision = self.resolve_route(actor, path);
        let required = self.requirement_for(actor.role, &decision);
        let explanation = explain_authorization(actor, required);
        (decision, explanation)
    }

    fn requirement_for(&self, role: Role, decision: &RouteDecision) -> Option<&RequiredPermissions> {
        let matched = decision.matched()?;
        let route = match matched.kind {
            access::RouteKind::Static => self.routes.static_route(role, &matched.route)?,
            access::RouteKind::Dynamic => self
                .routes
                .dynamic_routes(role)
                .find(|r| r.path == matched.route)?,
        };
        route.required_permissions.as_ref()
    }

    pub fn default_route(&self, role: Role) -> &str {
        self.landing_routes.get(&role).map(String::as_str).unwrap_or(ROOT)
    }

    pub fn is_entry_path(&self, path: &str) -> bool {
        self.entry_paths.iter().any(|p| p == path)
    }

    /// Where an authenticated actor sitting on an entry path (`/`, `/login`,
    /// ...) should be sent.
    ///
    /// `None` when unauthenticated, when `current_path` is not an entry path,
    /// or when the actor is already on the landing route. Re-evaluating with
    /// the latest inputs always gives the current answer.
    pub fn entry_redirect(&self, session: &Session, current_path: &str) -> Option<&str> {
        let actor = session.actor()?;
        if !self.is_entry_path(current_path) {
            return None;
        }

        let target = self.default_route(actor.role);
        if target == current_path {
            return None;
        }

        tracing::debug!(role = %actor.role, from = current_path, to = target, "entry redirect");
        Some(target)
    }
}
