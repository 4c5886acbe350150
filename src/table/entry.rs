use crate::verbs::VerbSet;
use http::Method;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A route value: either a concrete literal or the "optional" sentinel.
///
/// `Optional` means the parameter may be left out of the URL entirely. It is
/// not the same as a fallback value; a matched route reports it as
/// `Optional` rather than as any literal.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteValue {
    Literal(Value),
    Optional,
}

impl RouteValue {
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, RouteValue::Optional)
    }

    /// Text form used for constraint checks. `None` for the optional sentinel.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RouteValue::Literal(Value::String(s)) => Some(Cow::Borrowed(s)),
            RouteValue::Literal(Value::Null) => Some(Cow::Borrowed("")),
            RouteValue::Literal(other) => Some(Cow::Owned(other.to_string())),
            RouteValue::Optional => None,
        }
    }
}

impl From<Value> for RouteValue {
    fn from(value: Value) -> Self {
        RouteValue::Literal(value)
    }
}

impl From<&str> for RouteValue {
    fn from(value: &str) -> Self {
        RouteValue::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for RouteValue {
    fn from(value: String) -> Self {
        RouteValue::Literal(Value::String(value))
    }
}

impl From<i64> for RouteValue {
    fn from(value: i64) -> Self {
        RouteValue::Literal(Value::from(value))
    }
}

impl From<i32> for RouteValue {
    fn from(value: i32) -> Self {
        RouteValue::Literal(Value::from(value))
    }
}

impl From<bool> for RouteValue {
    fn from(value: bool) -> Self {
        RouteValue::Literal(Value::Bool(value))
    }
}

impl Serialize for RouteValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RouteValue::Literal(v) => v.serialize(serializer),
            RouteValue::Optional => serializer.serialize_none(),
        }
    }
}

/// Insertion-ordered map with ASCII case-insensitive string keys.
///
/// Used for both the defaults and the constraints of a route. Compiled
/// tables are small and read in order, so a vector beats hashing here.
#[derive(Clone, PartialEq)]
pub struct RouteMap<V> {
    entries: Vec<(String, V)>,
}

pub type RouteValues = RouteMap<RouteValue>;
pub type RouteConstraints = RouteMap<Constraint>;

impl<V> Default for RouteMap<V> {
    fn default() -> Self {
        RouteMap {
            entries: Vec::new(),
        }
    }
}

impl<V> RouteMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Insert a new key. Returns `false` and leaves the map untouched if the
    /// key is already present.
    pub fn try_insert(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for RouteMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = RouteMap::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

impl<V: fmt::Debug> fmt::Debug for RouteMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<V: Serialize> Serialize for RouteMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// The request a route is matched against.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub method: &'a Method,
    pub path: &'a str,
}

/// A pluggable route constraint.
///
/// `parameter` is the key the constraint was registered under. When it is a
/// URL parameter of the pattern, its value is in `values`; otherwise the
/// constraint applies to the route as a whole.
pub trait RouteConstraint: Send + Sync {
    /// Name shown in diagnostics and serialized tables.
    fn name(&self) -> &str;

    fn matches(&self, request: &RouteRequest<'_>, parameter: &str, values: &RouteValues) -> bool;
}

/// A constraint attached to a route entry.
#[derive(Clone)]
pub enum Constraint {
    /// Regular expression the value must match in full (case-insensitive).
    Pattern(String),
    /// Literal uppercase verb names the request method must be one of.
    Methods(Vec<String>),
    /// Host-supplied matcher.
    Custom(Arc<dyn RouteConstraint>),
}

impl Constraint {
    #[must_use]
    pub fn pattern(regex: impl Into<String>) -> Self {
        Constraint::Pattern(regex.into())
    }

    /// The verb constraint for a resolved verb set.
    #[must_use]
    pub fn methods(verbs: VerbSet) -> Self {
        Constraint::Methods(verbs.method_names())
    }

    pub fn custom(matcher: impl RouteConstraint + 'static) -> Self {
        Constraint::Custom(Arc::new(matcher))
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constraint::Pattern(a), Constraint::Pattern(b)) => a == b,
            (Constraint::Methods(a), Constraint::Methods(b)) => a == b,
            (Constraint::Custom(a), Constraint::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            Constraint::Methods(m) => f.debug_tuple("Methods").field(m).finish(),
            Constraint::Custom(c) => f.debug_tuple("Custom").field(&c.name()).finish(),
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Constraint::Pattern(p) => serializer.serialize_str(p),
            Constraint::Methods(m) => m.serialize(serializer),
            Constraint::Custom(c) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("custom", c.name())?;
                map.end()
            }
        }
    }
}

/// A compiled route: name, URL pattern, defaults and constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    pub name: String,
    pub url: String,
    pub defaults: RouteValues,
    pub constraints: RouteConstraints,
}

impl RouteEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        RouteEntry {
            name: name.into(),
            url: url.into(),
            defaults: RouteValues::new(),
            constraints: RouteConstraints::new(),
        }
    }

    #[must_use]
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<RouteValue>) -> Self {
        self.defaults.set(key, value.into());
        self
    }

    #[must_use]
    pub fn with_optional(mut self, key: impl Into<String>) -> Self {
        self.defaults.set(key, RouteValue::Optional);
        self
    }

    #[must_use]
    pub fn with_constraint(mut self, key: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints.set(key, constraint);
        self
    }
}
