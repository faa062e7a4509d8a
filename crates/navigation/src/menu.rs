//! Sidebar menu tree and role/permission pruning.

use serde::{Deserialize, Serialize};

use mindbridge_auth::{authorize::is_authorized, Permission, RequiredPermissions, Role};

/// A node of the declarative sidebar menu.
///
/// The same label/path may appear several times gated by different roles;
/// filtering leaves at most one visible copy per actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub icon: String,
    pub label: String,
    pub path: String,
    pub roles: Vec<Role>,
    /// Nested entries. The wire key is `childRoute`, the name the web
    /// client's sidebar uses; `children` is also accepted on input.
    #[serde(
        default,
        rename = "childRoute",
        alias = "children",
        skip_serializing_if = "Option::is_none"
    )]
    pub children: Option<Vec<MenuItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permissions: Option<RequiredPermissions>,
}

impl MenuItem {
    pub fn new(
        icon: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
        roles: &[Role],
    ) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            path: path.into(),
            roles: roles.to_vec(),
            children: None,
            required_permissions: None,
        }
    }

    pub fn requires(mut self, required: RequiredPermissions) -> Self {
        self.required_permissions = Some(required);
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = Some(children);
        self
    }

    /// Depth of the subtree rooted here (a leaf is 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(MenuItem::depth)
            .max()
            .unwrap_or(0)
    }

    fn visible_to(&self, role: Role, held: &[Permission]) -> bool {
        self.roles.contains(&role) && is_authorized(self.required_permissions.as_ref(), role, held)
    }
}

/// Prune a menu tree down to what `role` (holding `held`) may see.
///
/// Children are resolved before their parent. An item survives iff its roles
/// include `role`, the permission predicate passes, and, when it declares
/// children, at least one child survives. A declared-but-empty child list
/// therefore drops the parent. Order is preserved at every level and the
/// input is never mutated.
pub fn filter_menu(items: &[MenuItem], role: Role, held: &[Permission]) -> Vec<MenuItem> {
    items
        .iter()
        .filter_map(|item| filter_item(item, role, held))
        .collect()
}

fn filter_item(item: &MenuItem, role: Role, held: &[Permission]) -> Option<MenuItem> {
    let children = match &item.children {
        Some(children) => {
            let kept = filter_menu(children, role, held);
            if kept.is_empty() {
                return None;
            }
            Some(kept)
        }
        None => None,
    };

    if !item.visible_to(role, held) {
        return None;
    }

    Some(MenuItem {
        icon: item.icon.clone(),
        label: item.label.clone(),
        path: item.path.clone(),
        roles: item.roles.clone(),
        children,
        required_permissions: item.required_permissions.clone(),
    })
}
