//! Static and dynamic route tables.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use mindbridge_auth::{RequiredPermissions, Role};
use mindbridge_core::{segments, DomainError, DomainResult, PARAM_MARKER};

/// A navigable path (or path template) and the permissions it demands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permissions: Option<RequiredPermissions>,
}

impl RouteDescriptor {
    pub fn open(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required_permissions: None,
        }
    }

    pub fn gated(path: impl Into<String>, required: RequiredPermissions) -> Self {
        Self {
            path: path.into(),
            required_permissions: Some(required),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route template such as `/clients/:id/notes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    template: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(template: &str) -> DomainResult<Self> {
        ensure_absolute(template)?;

        let mut parsed = Vec::new();
        for seg in segments(template) {
            if seg.is_empty() {
                return Err(DomainError::validation(format!(
                    "route template '{template}' contains an empty segment"
                )));
            }
            match seg.strip_prefix(PARAM_MARKER) {
                Some("") => {
                    return Err(DomainError::validation(format!(
                        "route template '{template}' has an unnamed parameter"
                    )));
                }
                Some(name) => parsed.push(Segment::Param(name.to_string())),
                None => parsed.push(Segment::Literal(seg.to_string())),
            }
        }

        Ok(Self {
            template: template.to_string(),
            segments: parsed,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match `path` segment by segment.
    ///
    /// Segment counts must be equal; parameters match any non-empty segment,
    /// literals must match exactly. Returns the captured parameters.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let candidate = segments(path);
        if candidate.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (pattern, actual) in self.segments.iter().zip(candidate) {
            match pattern {
                Segment::Literal(lit) if lit == actual => {}
                Segment::Param(name) if !actual.is_empty() => {
                    params.insert(name.clone(), actual.to_string());
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

#[derive(Debug, Clone)]
struct DynamicRoute {
    descriptor: RouteDescriptor,
    pattern: RoutePattern,
}

/// A dynamic template that matched a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicMatch<'a> {
    pub descriptor: &'a RouteDescriptor,
    pub params: BTreeMap<String, String>,
}

/// Role-keyed route tables.
///
/// Static routes match by exact string equality. Dynamic routes are tried in
/// declaration order and the first matching template wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    static_routes: BTreeMap<Role, Vec<RouteDescriptor>>,
    dynamic_routes: BTreeMap<Role, Vec<DynamicRoute>>,
    all_static_paths: BTreeSet<String>,
}

impl RouteTable {
    /// Build and validate route tables.
    ///
    /// Rejects relative paths, malformed templates, duplicate paths within a
    /// role, and paths registered both statically and dynamically for a role.
    pub fn new(
        static_routes: BTreeMap<Role, Vec<RouteDescriptor>>,
        dynamic_routes: BTreeMap<Role, Vec<RouteDescriptor>>,
    ) -> DomainResult<Self> {
        let mut all_static_paths = BTreeSet::new();
        for (role, routes) in &static_routes {
            let mut seen = BTreeSet::new();
            for route in routes {
                ensure_absolute(&route.path)?;
                if !seen.insert(route.path.as_str()) {
                    return Err(DomainError::invariant(format!(
                        "static route '{}' registered twice for role '{role}'",
                        route.path
                    )));
                }
                all_static_paths.insert(route.path.clone());
            }
        }

        let mut parsed_dynamic = BTreeMap::new();
        for (role, routes) in dynamic_routes {
            let mut seen = BTreeSet::new();
            let mut parsed = Vec::with_capacity(routes.len());
            for descriptor in routes {
                let pattern = RoutePattern::parse(&descriptor.path)?;
                if !seen.insert(descriptor.path.clone()) {
                    return Err(DomainError::invariant(format!(
                        "dynamic route '{}' registered twice for role '{role}'",
                        descriptor.path
                    )));
                }
                let clashes_static = static_routes
                    .get(&role)
                    .is_some_and(|s| s.iter().any(|r| r.path == descriptor.path));
                if clashes_static {
                    return Err(DomainError::invariant(format!(
                        "route '{}' is both static and dynamic for role '{role}'",
                        descriptor.path
                    )));
                }
                parsed.push(DynamicRoute { descriptor, pattern });
            }
            parsed_dynamic.insert(role, parsed);
        }

        Ok(Self {
            static_routes,
            dynamic_routes: parsed_dynamic,
            all_static_paths,
        })
    }

    /// Exact static match within `role`'s table.
    pub fn static_route(&self, role: Role, path: &str) -> Option<&RouteDescriptor> {
        self.static_routes.get(&role)?.iter().find(|r| r.path == path)
    }

    /// Whether any role's static table holds `path`.
    pub fn is_static_path(&self, path: &str) -> bool {
        self.all_static_paths.contains(path)
    }

    /// First dynamic template under `role` that matches `path`.
    pub fn match_dynamic(&self, role: Role, path: &str) -> Option<DynamicMatch<'_>> {
        self.dynamic_routes.get(&role)?.iter().find_map(|route| {
            route.pattern.matches(path).map(|params| DynamicMatch {
                descriptor: &route.descriptor,
                params,
            })
        })
    }

    /// Roles that have at least one static or dynamic route.
    pub fn roles(&self) -> BTreeSet<Role> {
        self.static_routes
            .keys()
            .chain(self.dynamic_routes.keys())
            .copied()
            .collect()
    }

    pub fn dynamic_routes(&self, role: Role) -> impl Iterator<Item = &RouteDescriptor> {
        self.dynamic_routes
            .get(&role)
            .into_iter()
            .flatten()
            .map(|r| &r.descriptor)
    }
}

pub(crate) fn ensure_absolute(path: &str) -> DomainResult<()> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(DomainError::validation(format!("path '{path}' must start with '/'")))
    }
}
