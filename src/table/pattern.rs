//! URL pattern parsing and segment matching.
//!
//! Patterns are `/`-separated. Each segment is either a literal, a
//! `{name}` parameter, or a trailing `{*name}` catch-all:
//!
//! ```text
//! test/all-defaults/{p1}/{p2}
//! files/{*path}
//! ```
//!
//! Complex segments such as `file.{ext}` are not supported.

use super::entry::{RouteValue, RouteValues};
use smallvec::SmallVec;

/// Segments stay on the stack for typical pattern depths.
pub const MAX_INLINE_SEGMENTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Param(String),
    CatchAll(String),
}

#[derive(Debug, Clone)]
pub(crate) struct UrlPattern {
    segments: SmallVec<[Segment; MAX_INLINE_SEGMENTS]>,
}

/// Strip the leading `/` or `~/` and any trailing `/`.
pub(crate) fn normalize_path(path: &str) -> &str {
    let path = path.strip_prefix('~').unwrap_or(path);
    path.trim_matches('/')
}

impl UrlPattern {
    /// Parse a pattern. The error string describes what is wrong with it.
    pub(crate) fn parse(pattern: &str) -> Result<Self, String> {
        let normalized = normalize_path(pattern);
        let mut segments: SmallVec<[Segment; MAX_INLINE_SEGMENTS]> = SmallVec::new();
        if normalized.is_empty() {
            return Ok(UrlPattern { segments });
        }

        let raw: Vec<&str> = normalized.split('/').collect();
        let last = raw.len() - 1;
        for (i, segment) in raw.iter().enumerate() {
            if segment.is_empty() {
                return Err("empty segment".to_string());
            }
            let parsed = if let Some(inner) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                let (catch_all, name) = match inner.strip_prefix('*') {
                    Some(name) => (true, name),
                    None => (false, inner),
                };
                if name.is_empty() || name.contains(['{', '}', '*']) {
                    return Err(format!("invalid parameter segment '{segment}'"));
                }
                if catch_all && i != last {
                    return Err(format!("catch-all '{segment}' must be the last segment"));
                }
                if segments.iter().any(|s| s.param_name().is_some_and(|n| n.eq_ignore_ascii_case(name))) {
                    return Err(format!("parameter '{name}' appears more than once"));
                }
                if catch_all {
                    Segment::CatchAll(name.to_string())
                } else {
                    Segment::Param(name.to_string())
                }
            } else if segment.contains(['{', '}']) {
                return Err(format!("complex segment '{segment}' is not supported"));
            } else {
                Segment::Literal((*segment).to_string())
            };
            segments.push(parsed);
        }

        Ok(UrlPattern { segments })
    }

    /// Whether `name` is a parameter of this pattern.
    pub(crate) fn has_param(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|s| s.param_name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    /// Match a normalized request path, producing the route values.
    ///
    /// Values start from `defaults` and are overlaid with captured segments.
    /// A missing trailing parameter falls back to its default; without one
    /// the pattern does not match.
    pub(crate) fn matches(&self, path: &str, defaults: &RouteValues) -> Option<RouteValues> {
        let request: SmallVec<[&str; MAX_INLINE_SEGMENTS]> = if path.is_empty() {
            SmallVec::new()
        } else {
            path.split('/').collect()
        };

        let has_catch_all = matches!(self.segments.last(), Some(Segment::CatchAll(_)));
        if !has_catch_all && request.len() > self.segments.len() {
            return None;
        }

        let mut values = defaults.clone();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(literal) => {
                    let provided = request.get(i)?;
                    if !provided.eq_ignore_ascii_case(literal) {
                        return None;
                    }
                }
                Segment::Param(name) => match request.get(i) {
                    Some(provided) if !provided.is_empty() => {
                        values.set(name.as_str(), RouteValue::from(*provided));
                    }
                    Some(_) => return None,
                    None => {
                        if !defaults.contains_key(name) {
                            return None;
                        }
                    }
                },
                Segment::CatchAll(name) => {
                    let rest = request.get(i..).map(|r| r.join("/")).unwrap_or_default();
                    if !rest.is_empty() {
                        values.set(name.as_str(), RouteValue::from(rest));
                    } else if !defaults.contains_key(name) {
                        values.set(name.as_str(), RouteValue::Optional);
                    }
                }
            }
        }

        Some(values)
    }
}

impl Segment {
    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Param(name) | Segment::CatchAll(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}
