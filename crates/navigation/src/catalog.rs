//! Built-in navigation tables for the MindBridge web app.
//!
//! Used whenever no external navigation config is supplied.

use std::collections::BTreeMap;

use mindbridge_auth::{Permission, RequiredPermissions, Role};

use crate::config::NavigationConfig;
use crate::menu::MenuItem;
use crate::route::RouteDescriptor;

/// Backoffice capabilities.
pub mod perms {
    use super::Permission;

    pub const VIEW_CLIENTS: Permission = Permission::from_static("VIEW_CLIENTS");
    pub const EDIT_CLIENTS: Permission = Permission::from_static("EDIT_CLIENTS");
    pub const VIEW_THERAPISTS: Permission = Permission::from_static("VIEW_THERAPISTS");
    pub const EDIT_THERAPISTS: Permission = Permission::from_static("EDIT_THERAPISTS");
    pub const VIEW_APPOINTMENTS: Permission = Permission::from_static("VIEW_APPOINTMENTS");
    pub const MANAGE_APPOINTMENTS: Permission = Permission::from_static("MANAGE_APPOINTMENTS");
    pub const VIEW_BILLING: Permission = Permission::from_static("VIEW_BILLING");
    pub const MANAGE_BILLING: Permission = Permission::from_static("MANAGE_BILLING");
    pub const VIEW_REPORTS: Permission = Permission::from_static("VIEW_REPORTS");
}

use mindbridge_auth::Role::{Admin, Backoffice, Client, Therapist};
use perms::*;

const EVERYONE: &[Role] = &Role::ALL;

pub const ENTRY_PATHS: &[&str] = &["/", "/login", "/register", "/forgot-password"];

fn one(p: Permission) -> RequiredPermissions {
    RequiredPermissions::One(p)
}

fn all(ps: &[Permission]) -> RequiredPermissions {
    RequiredPermissions::All(ps.to_vec())
}

fn open(paths: &[&str]) -> Vec<RouteDescriptor> {
    paths.iter().copied().map(RouteDescriptor::open).collect()
}

/// The full sidebar tree before filtering.
pub fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("home", "Dashboard", "/dashboard", &[Therapist]),
        MenuItem::new("home", "Dashboard", "/admin/dashboard", &[Admin]),
        MenuItem::new("home", "Home", "/backoffice", &[Backoffice]),
        MenuItem::new("calendar", "Appointments", "/appointments", &[Client]).with_children(vec![
            MenuItem::new("list", "Upcoming", "/appointments", &[Client]),
            MenuItem::new("plus", "Book a session", "/appointments/book", &[Client]),
        ]),
        MenuItem::new("calendar", "Appointments", "/appointments", &[Admin]),
        MenuItem::new("calendar", "Calendar", "/calendar", &[Therapist]).with_children(vec![
            MenuItem::new("calendar", "Sessions", "/calendar", &[Therapist]),
            MenuItem::new("clock", "Availability", "/availability", &[Therapist]),
        ]),
        MenuItem::new("users", "Clients", "/clients", &[Therapist, Admin]),
        MenuItem::new("stethoscope", "Therapists", "/therapists", &[Client, Admin]),
        MenuItem::new("message", "Chat", "/chat", &[Client, Therapist]),
        MenuItem::new("card", "Billing", "/billing", &[Client, Therapist, Admin]),
        MenuItem::new("chart", "Reports", "/reports", &[Admin]),
        MenuItem::new("briefcase", "Management", "/backoffice", &[Backoffice]).with_children(vec![
            MenuItem::new("users", "Clients", "/backoffice/clients", &[Backoffice])
                .requires(one(VIEW_CLIENTS)),
            MenuItem::new("stethoscope", "Therapists", "/backoffice/therapists", &[Backoffice])
                .requires(one(VIEW_THERAPISTS)),
            MenuItem::new("calendar", "Appointments", "/backoffice/appointments", &[Backoffice])
                .requires(one(VIEW_APPOINTMENTS)),
        ]),
        MenuItem::new("card", "Finance", "/backoffice/billing", &[Backoffice]).with_children(vec![
            MenuItem::new("card", "Billing", "/backoffice/billing", &[Backoffice])
                .requires(one(VIEW_BILLING)),
            MenuItem::new("chart", "Reports", "/backoffice/reports", &[Backoffice])
                .requires(one(VIEW_REPORTS)),
        ]),
        MenuItem::new("gear", "Settings", "/settings", EVERYONE),
    ]
}

/// Exact-match routes per role.
pub fn static_routes() -> BTreeMap<Role, Vec<RouteDescriptor>> {
    let mut backoffice = open(&["/backoffice", "/settings", "/profile"]);
    backoffice.extend([
        RouteDescriptor::gated("/backoffice/clients", one(VIEW_CLIENTS)),
        RouteDescriptor::gated("/backoffice/therapists", one(VIEW_THERAPISTS)),
        RouteDescriptor::gated("/backoffice/appointments", one(VIEW_APPOINTMENTS)),
        RouteDescriptor::gated("/backoffice/billing", one(VIEW_BILLING)),
        RouteDescriptor::gated("/backoffice/reports", one(VIEW_REPORTS)),
    ]);

    BTreeMap::from([
        (
            Client,
            open(&[
                "/appointments",
                "/appointments/book",
                "/therapists",
                "/chat",
                "/billing",
                "/profile",
                "/settings",
            ]),
        ),
        (
            Therapist,
            open(&[
                "/dashboard",
                "/calendar",
                "/availability",
                "/clients",
                "/chat",
                "/billing",
                "/profile",
                "/settings",
            ]),
        ),
        (
            Admin,
            open(&[
                "/admin/dashboard",
                "/appointments",
                "/clients",
                "/therapists",
                "/billing",
                "/reports",
                "/profile",
                "/settings",
            ]),
        ),
        (Backoffice, backoffice),
    ])
}

/// Parameterised routes per role, tried in order.
pub fn dynamic_routes() -> BTreeMap<Role, Vec<RouteDescriptor>> {
    BTreeMap::from([
        (
            Client,
            open(&[
                "/therapists/:therapistId",
                "/appointments/:appointmentId",
                "/chat/:conversationId",
                "/video-call/:sessionId",
            ]),
        ),
        (
            Therapist,
            open(&[
                "/clients/:clientId",
                "/clients/:clientId/notes",
                "/appointments/:appointmentId",
                "/chat/:conversationId",
                "/video-call/:sessionId",
            ]),
        ),
        (
            Admin,
            open(&[
                "/clients/:clientId",
                "/therapists/:therapistId",
                "/appointments/:appointmentId",
                "/billing/invoices/:invoiceId",
            ]),
        ),
        (
            Backoffice,
            vec![
                RouteDescriptor::gated("/backoffice/clients/:clientId", one(VIEW_CLIENTS)),
                RouteDescriptor::gated(
                    "/backoffice/clients/:clientId/edit",
                    all(&[VIEW_CLIENTS, EDIT_CLIENTS]),
                ),
                RouteDescriptor::gated("/backoffice/therapists/:therapistId", one(VIEW_THERAPISTS)),
                RouteDescriptor::gated(
                    "/backoffice/therapists/:therapistId/edit",
                    all(&[VIEW_THERAPISTS, EDIT_THERAPISTS]),
                ),
                RouteDescriptor::gated(
                    "/backoffice/appointments/:appointmentId",
                    all(&[VIEW_APPOINTMENTS, MANAGE_APPOINTMENTS]),
                ),
                RouteDescriptor::gated(
                    "/backoffice/billing/invoices/:invoiceId",
                    all(&[VIEW_BILLING, MANAGE_BILLING]),
                ),
            ],
        ),
    ])
}

/// Landing path per role.
pub fn landing_routes() -> BTreeMap<Role, String> {
    BTreeMap::from([
        (Client, "/appointments".to_string()),
        (Therapist, "/dashboard".to_string()),
        (Admin, "/admin/dashboard".to_string()),
        (Backoffice, "/backoffice".to_string()),
    ])
}

pub fn navigation_config() -> NavigationConfig {
    NavigationConfig {
        menu: menu(),
        static_routes: static_routes(),
        dynamic_routes: dynamic_routes(),
        landing_routes: landing_routes(),
        entry_paths: ENTRY_PATHS.iter().map(|p| p.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        navigation_config().validate().unwrap();
    }

    #[test]
    fn every_landing_route_is_a_static_route_of_its_role() {
        let statics = static_routes();
        for (role, landing) in landing_routes() {
            assert!(
                statics[&role].iter().any(|r| r.path == landing),
                "{role} landing {landing} missing from its static table"
            );
        }
    }

    #[test]
    fn every_menu_path_is_routable_for_its_roles() {
        let statics = static_routes();
        fn walk(items: &[MenuItem], statics: &BTreeMap<Role, Vec<RouteDescriptor>>) {
            for item in items {
                for role in &item.roles {
                    assert!(
                        statics[role].iter().any(|r| r.path == item.path),
                        "menu path {} not routable for {role}",
                        item.path
                    );
                }
                walk(item.children.as_deref().unwrap_or_default(), statics);
            }
        }
        walk(&menu(), &statics);
    }
}
