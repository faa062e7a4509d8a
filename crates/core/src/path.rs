//! Pathname helpers.
//!
//! Resolvers compare paths verbatim. Callers that receive raw locations
//! (with query strings, doubled or trailing slashes) should run them through
//! [`normalize_pathname`] first.

/// Prefix marking a positional parameter in a route template (`/clients/:id`).
pub const PARAM_MARKER: char = ':';

/// Split a path into its `/`-delimited segments.
///
/// The leading slash produces no segment, so `/clients/42` yields
/// `["clients", "42"]`. Interior empty segments are preserved, which keeps
/// `/a//b` distinct from `/a/b`.
pub fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// Normalize a raw location into the pathname form the resolver expects.
///
/// - drops `?query` and `#fragment`
/// - collapses repeated `/`
/// - removes a trailing `/` (the root stays `/`)
/// - guarantees a leading `/`
pub fn normalize_pathname(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];

    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if parts.is_empty() {
        return "/".to_string();
    }

    let mut out = String::with_capacity(path.len() + 1);
    for part in parts {
        out.push('/');
        out.push_str(part);
    }
    out
}
