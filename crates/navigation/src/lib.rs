//! `mindbridge-navigation` — role/permission-based menu and route resolution.
//!
//! Everything here is a pure lookup over static tables:
//! - [`menu`]: prune a declarative sidebar tree for an actor
//! - [`route`]: static and dynamic (`/clients/:id`) route tables
//! - [`access`]: route decisions (granted / forbidden / not found)
//! - [`resolver`]: the facade the application talks to
//!
//! Tables come from [`config::NavigationConfig`], either loaded from JSON or
//! taken from the built-in [`catalog`].

pub mod access;
pub mod catalog;
pub mod config;
pub mod menu;
pub mod resolver;
pub mod route;

pub use access::{is_route_accessible, resolve_route, MatchedRoute, RouteDecision, RouteKind};
pub use config::{ConfigError, NavigationConfig, CONFIG_ENV_VAR};
pub use menu::{filter_menu, MenuItem};
pub use resolver::AccessResolver;
pub use route::{RouteDescriptor, RoutePattern, RouteTable};
