use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "VIEW_CLIENTS"). They only carry
/// meaning for the restricted role; see [`crate::Role::is_restricted`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

/// Permissions a resource demands: a single one, or a set that must all be held.
///
/// Deserializes from either a bare string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredPermissions {
    One(Permission),
    All(Vec<Permission>),
}

impl RequiredPermissions {
    pub fn one(p: impl Into<Permission>) -> Self {
        Self::One(p.into())
    }

    pub fn all<I, P>(perms: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::All(perms.into_iter().map(Into::into).collect())
    }

    pub fn as_slice(&self) -> &[Permission] {
        match self {
            Self::One(p) => core::slice::from_ref(p),
            Self::All(ps) => ps,
        }
    }
}
