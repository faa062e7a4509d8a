//! Subcommand implementations. Each returns the JSON value to print.

use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};

use mindbridge_auth::{Actor, Permission, Role, Session};
use mindbridge_core::normalize_pathname;
use mindbridge_navigation::AccessResolver;

#[derive(Args)]
pub struct ActorArgs {
    /// Acting role: client, therapist, admin or backoffice
    #[arg(long)]
    pub role: Role,

    /// Held permission (repeatable)
    #[arg(long = "permission")]
    pub permissions: Vec<String>,
}

impl ActorArgs {
    pub fn into_actor(self) -> Actor {
        Actor::with_permissions(self.role, self.permissions.into_iter().map(Permission::new))
    }
}

#[derive(Args)]
pub struct PathArgs {
    /// Path to check, e.g. /clients/42
    pub path: String,

    /// Use the path verbatim instead of normalizing it first
    #[arg(long)]
    pub raw: bool,
}

impl PathArgs {
    pub fn resolve(&self) -> String {
        if self.raw {
            self.path.clone()
        } else {
            normalize_pathname(&self.path)
        }
    }
}

pub fn menu(resolver: &AccessResolver, actor: &Actor) -> Result<Value> {
    Ok(serde_json::to_value(resolver.menu_items(actor))?)
}

pub fn route(resolver: &AccessResolver, actor: &Actor, path: &str, not_found: bool) -> Result<Value> {
    let answer = resolver.is_route_accessible(actor, path, not_found);
    let question = if not_found { "not_found" } else { "accessible" };
    Ok(json!({ "path": path, "role": actor.role, question: answer }))
}

pub fn explain(resolver: &AccessResolver, actor: &Actor, path: &str) -> Result<Value> {
    let (decision, explanation) = resolver.explain_route(actor, path);
    Ok(json!({
        "path": path,
        "decision": decision,
        "authorization": explanation,
    }))
}

pub fn default_route(resolver: &AccessResolver, role: Role) -> Result<Value> {
    Ok(json!({ "role": role, "defaultRoute": resolver.default_route(role) }))
}

pub fn redirect(
    resolver: &AccessResolver,
    role: Option<Role>,
    permissions: Vec<String>,
    path: &str,
) -> Result<Value> {
    let session = match role {
        Some(role) => Session::authenticated(Actor::with_permissions(
            role,
            permissions.into_iter().map(Permission::new),
        )),
        None => Session::anonymous(),
    };
    Ok(json!({
        "path": path,
        "authenticated": session.is_authenticated(),
        "redirectTo": resolver.entry_redirect(&session, path),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> AccessResolver {
        AccessResolver::builtin().unwrap()
    }

    #[test]
    fn route_reports_requested_question() {
        let actor = Actor::new(Role::Client);
        let v = route(&resolver(), &actor, "/dashboard", true).unwrap();
        assert_eq!(v["not_found"], json!(true));

        let v = route(&resolver(), &actor, "/chat", false).unwrap();
        assert_eq!(v["accessible"], json!(true));
    }

    #[test]
    fn path_args_normalize_unless_raw() {
        let args = PathArgs {
            path: "/clients/42/?tab=notes".to_string(),
            raw: false,
        };
        assert_eq!(args.resolve(), "/clients/42");

        let raw = PathArgs { raw: true, ..args };
        assert_eq!(raw.resolve(), "/clients/42/?tab=notes");
    }

    #[test]
    fn anonymous_redirect_is_null() {
        let v = redirect(&resolver(), None, Vec::new(), "/login").unwrap();
        assert_eq!(v["redirectTo"], Value::Null);

        let v = redirect(&resolver(), Some(Role::Client), Vec::new(), "/login").unwrap();
        assert_eq!(v["redirectTo"], json!("/appointments"));
    }

    #[test]
    fn explain_includes_decision_outcome() {
        let actor = Actor::new(Role::Backoffice);
        let v = explain(&resolver(), &actor, "/backoffice/reports").unwrap();
        assert_eq!(v["decision"]["outcome"], json!("forbidden"));
        assert_eq!(v["authorization"]["granted"], json!(false));
    }
}
