//! Navigation configuration: menu tree, route tables, landing and entry paths.
//!
//! Loaded from JSON when `MINDBRIDGE_NAV_CONFIG` (or an explicit path) is
//! given, otherwise taken from [`crate::catalog`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mindbridge_auth::Role;
use mindbridge_core::{DomainError, DomainResult};

use crate::menu::MenuItem;
use crate::route::{ensure_absolute, RouteDescriptor, RouteTable};

/// Environment variable naming a JSON navigation config file.
pub const CONFIG_ENV_VAR: &str = "MINDBRIDGE_NAV_CONFIG";

/// Maximum nesting of the sidebar tree (top level plus one child level).
pub const MAX_MENU_DEPTH: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read navigation config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed navigation config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid navigation config: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub static_routes: BTreeMap<Role, Vec<RouteDescriptor>>,
    #[serde(default)]
    pub dynamic_routes: BTreeMap<Role, Vec<RouteDescriptor>>,
    pub landing_routes: BTreeMap<Role, String>,
    #[serde(default = "default_entry_paths")]
    pub entry_paths: Vec<String>,
}

fn default_entry_paths() -> Vec<String> {
    crate::catalog::ENTRY_PATHS.iter().map(|p| p.to_string()).collect()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        crate::catalog::navigation_config()
    }
}

impl NavigationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            menu_items = config.menu.len(),
            "loaded navigation config"
        );
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or fall back to the
    /// built-in catalog when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(PathBuf::from(path)),
            None => {
                tracing::warn!("{CONFIG_ENV_VAR} not set; using built-in navigation catalog");
                Ok(Self::default())
            }
        }
    }

    /// Build the route table (also validates it).
    pub fn route_table(&self) -> DomainResult<RouteTable> {
        RouteTable::new(self.static_routes.clone(), self.dynamic_routes.clone())
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_menu(&self.menu)?;
        let table = self.route_table()?;

        for (role, landing) in &self.landing_routes {
            ensure_absolute(landing)?;
            if table.static_route(*role, landing).is_none() {
                return Err(DomainError::invariant(format!(
                    "landing route '{landing}' is not a static route of role '{role}'"
                )));
            }
        }

        let mut roles_in_use = table.roles();
        collect_menu_roles(&self.menu, &mut roles_in_use);
        if let Some(role) = roles_in_use
            .iter()
            .find(|r| !self.landing_routes.contains_key(*r))
        {
            return Err(DomainError::invariant(format!(
                "role '{role}' has no landing route"
            )));
        }

        for entry in &self.entry_paths {
            ensure_absolute(entry)?;
        }
        Ok(())
    }
}

fn validate_menu(items: &[MenuItem]) -> DomainResult<()> {
    for item in items {
        ensure_absolute(&item.path)?;
        if item.roles.is_empty() {
            return Err(DomainError::validation(format!(
                "menu item '{}' names no roles",
                item.label
            )));
        }
        if item.depth() > MAX_MENU_DEPTH {
            return Err(DomainError::validation(format!(
                "menu item '{}' nests deeper than {MAX_MENU_DEPTH} levels",
                item.label
            )));
        }
        if let Some(children) = &item.children {
            validate_menu(children)?;
        }
    }
    Ok(())
}

fn collect_menu_roles(items: &[MenuItem], out: &mut BTreeSet<Role>) {
    for item in items {
        out.extend(item.roles.iter().copied());
        collect_menu_roles(item.children.as_deref().unwrap_or_default(), out);
    }
}
