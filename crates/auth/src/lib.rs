//! `mindbridge-auth` — pure authorization boundary for navigation.
//!
//! This crate is intentionally decoupled from HTTP, storage and rendering.
//! Every check takes the acting [`Actor`] explicitly; nothing is read from
//! ambient session state.

pub mod authorize;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{
    authorize, explain_authorization, has_permission, is_authorized, missing_permissions,
    AuthorizationExplanation, AuthzError,
};
pub use permissions::{Permission, RequiredPermissions};
pub use principal::{Actor, Session};
pub use roles::{Role, RoleParseError};
