use super::entry::{Constraint, RouteConstraint, RouteEntry, RouteRequest, RouteValue, RouteValues};
use super::pattern::{normalize_path, UrlPattern};
use crate::error::TableError;
use crate::verbs::Verb;
use http::Method;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// The mutable sink the compiler registers entries into.
///
/// Entries are append-only while compiling. `rollback_to` exists so a
/// failed compile can discard everything it added.
pub trait RouteRegistry {
    /// Append an entry. Fails if the name is taken or the entry is malformed.
    fn register(&mut self, entry: RouteEntry) -> Result<(), TableError>;

    fn contains_name(&self, name: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry registered at or after position `len`.
    fn rollback_to(&mut self, len: usize);

    /// Entries registered at or after position `start`, in table order.
    fn entries_from(&self, start: usize) -> Vec<Arc<RouteEntry>>;

    /// Register a route with defaults and no constraints.
    fn map_route(
        &mut self,
        name: &str,
        url: &str,
        defaults: RouteValues,
    ) -> Result<(), TableError> {
        let mut entry = RouteEntry::new(name, url);
        entry.defaults = defaults;
        self.register(entry)
    }
}

/// Result of successfully matching a request to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched entry, shared with the table.
    pub entry: Arc<RouteEntry>,
    /// Defaults overlaid with the values captured from the path.
    pub values: RouteValues,
}

impl RouteMatch {
    #[inline]
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&RouteValue> {
        self.values.get(name)
    }

    /// The value as text; `None` when absent or optional.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .and_then(RouteValue::as_text)
            .map(|t| t.into_owned())
    }
}

#[derive(Clone)]
enum CompiledConstraint {
    Pattern { key: String, regex: Regex },
    Methods { methods: Vec<Method> },
    Custom { key: String, matcher: Arc<dyn RouteConstraint> },
}

#[derive(Clone)]
struct CompiledRoute {
    entry: Arc<RouteEntry>,
    pattern: UrlPattern,
    constraints: Vec<CompiledConstraint>,
}

impl CompiledRoute {
    fn compile(entry: RouteEntry) -> Result<Self, TableError> {
        let pattern = UrlPattern::parse(&entry.url).map_err(|reason| TableError::InvalidPattern {
            route: entry.name.clone(),
            pattern: entry.url.clone(),
            reason,
        })?;

        let mut constraints = Vec::with_capacity(entry.constraints.len());
        for (key, constraint) in entry.constraints.iter() {
            let compiled = match constraint {
                Constraint::Pattern(source) => {
                    let regex = RegexBuilder::new(&format!("^(?:{source})$"))
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| TableError::InvalidConstraint {
                            route: entry.name.clone(),
                            parameter: key.to_string(),
                            source: e,
                        })?;
                    CompiledConstraint::Pattern {
                        key: key.to_string(),
                        regex,
                    }
                }
                Constraint::Methods(names) => CompiledConstraint::Methods {
                    // Names that are not valid verbs can never match.
                    methods: names
                        .iter()
                        .filter_map(|n| Verb::parse(n).map(Verb::as_method))
                        .collect(),
                },
                Constraint::Custom(matcher) => CompiledConstraint::Custom {
                    key: key.to_string(),
                    matcher: Arc::clone(matcher),
                },
            };
            constraints.push(compiled);
        }

        Ok(CompiledRoute {
            entry: Arc::new(entry),
            pattern,
            constraints,
        })
    }

    fn satisfies(&self, request: &RouteRequest<'_>, values: &RouteValues) -> bool {
        self.constraints.iter().all(|c| match c {
            CompiledConstraint::Methods { methods } => methods.contains(request.method),
            CompiledConstraint::Pattern { key, regex } => match values.get(key) {
                Some(value) => match value.as_text() {
                    Some(text) => regex.is_match(&text),
                    // absent optional parameter
                    None => true,
                },
                None => regex.is_match(normalize_path(request.path)),
            },
            CompiledConstraint::Custom { key, matcher } => matcher.matches(request, key, values),
        })
    }
}

/// Route names compare ASCII case-insensitively, like route values.
fn name_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Ordered route table with name lookup and first-match dispatch.
///
/// Built once at startup, then shared read-only (typically behind an `Arc`
/// or an [`ArcSwap`](arc_swap::ArcSwap), see [`crate::hot_reload`]).
#[derive(Clone, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry by its route name, ignoring ASCII case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<RouteEntry>> {
        self.by_name.get(&name_key(name)).map(|&i| &self.routes[i].entry)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &Arc<RouteEntry>> {
        self.routes.iter().map(|r| &r.entry)
    }

    /// Match a request against every route in registration order.
    ///
    /// The first route whose pattern and constraints all accept the request
    /// wins. Returns `None` when nothing matches.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let request = RouteRequest { method, path };
        let normalized = normalize_path(path);

        debug!(method = %method, path = %path, routes = self.routes.len(), "Route match attempt");

        for route in &self.routes {
            let Some(values) = route.pattern.matches(normalized, &route.entry.defaults) else {
                continue;
            };
            if !route.satisfies(&request, &values) {
                continue;
            }
            debug!(
                method = %method,
                path = %path,
                route_name = %route.entry.name,
                route_pattern = %route.entry.url,
                "Route matched"
            );
            return Some(RouteMatch {
                entry: Arc::clone(&route.entry),
                values,
            });
        }

        debug!(method = %method, path = %path, "No route matched");
        None
    }

    /// Log a summary of the table.
    pub fn log_summary(&self) {
        let summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|r| format!("{} -> {}", r.entry.name, r.entry.url))
            .collect();
        info!(
            routes_count = self.routes.len(),
            routes_summary = ?summary,
            "Route table loaded"
        );
    }
}

impl RouteRegistry for RouteTable {
    fn register(&mut self, entry: RouteEntry) -> Result<(), TableError> {
        let key = name_key(&entry.name);
        if self.by_name.contains_key(&key) {
            return Err(TableError::DuplicateName { name: entry.name });
        }
        let compiled = CompiledRoute::compile(entry)?;
        self.by_name.insert(key, self.routes.len());
        self.routes.push(compiled);
        Ok(())
    }

    fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(&name_key(name))
    }

    fn len(&self) -> usize {
        self.routes.len()
    }

    fn rollback_to(&mut self, len: usize) {
        for removed in self.routes.drain(len.min(self.routes.len())..) {
            self.by_name.remove(&name_key(&removed.entry.name));
        }
    }

    fn entries_from(&self, start: usize) -> Vec<Arc<RouteEntry>> {
        self.routes
            .iter()
            .skip(start)
            .map(|r| Arc::clone(&r.entry))
            .collect()
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|r| &r.entry))
            .finish()
    }
}
