use crate::table::{Constraint, RouteConstraints, RouteValue, RouteValues};
use crate::verbs::Verb;

/// A route declaration attached to a handler.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteDeclaration {
    /// URL pattern, e.g. `test/all-defaults/{p1}/{p2}`.
    pub url: String,
    /// Explicit route name. When absent the compiler synthesizes one.
    pub name: Option<String>,
    pub defaults: RouteValues,
    pub constraints: RouteConstraints,
    /// Shorthand verb, as in a `Get("url")` style declaration.
    pub verb: Option<Verb>,
}

impl RouteDeclaration {
    pub fn new(url: impl Into<String>) -> Self {
        RouteDeclaration {
            url: url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = Some(verb);
        self
    }

    #[must_use]
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<RouteValue>) -> Self {
        self.defaults.set(key, value.into());
        self
    }

    #[must_use]
    pub fn with_constraint(mut self, key: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints.set(key, constraint);
        self
    }
}

/// A marker attached to a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// Simple verb marker.
    Verb(Verb),
    /// Method names, parsed case-insensitively at compile time.
    AcceptVerbs(Vec<String>),
    /// The handler is not invokable and must not be routed.
    NonAction,
    Route(RouteDeclaration),
    /// Literal default for a URL parameter.
    Default { name: String, value: RouteValue },
    /// The URL parameter may be omitted entirely.
    Optional { name: String },
    /// Combined parameter marker: default, optional flag and regex constraint.
    UrlParam {
        name: String,
        default: Option<RouteValue>,
        constraint: Option<String>,
    },
    Constraint { name: String, constraint: Constraint },
}

/// A routable unit as reported by a catalog: owner, name and markers.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerDescriptor {
    pub owner: String,
    pub name: String,
    pub markers: Vec<Marker>,
}

impl HandlerDescriptor {
    /// Build from a raw marker list, as produced by file or generated catalogs.
    ///
    /// Raw lists can express an excluded handler that also declares a route;
    /// the compiler rejects that combination.
    pub fn from_markers(
        owner: impl Into<String>,
        name: impl Into<String>,
        markers: Vec<Marker>,
    ) -> Self {
        HandlerDescriptor {
            owner: owner.into(),
            name: name.into(),
            markers,
        }
    }

    /// Start a routable handler with its single declaration.
    pub fn routable(
        owner: impl Into<String>,
        name: impl Into<String>,
        declaration: RouteDeclaration,
    ) -> RoutableHandler {
        RoutableHandler {
            inner: HandlerDescriptor::from_markers(owner, name, vec![Marker::Route(declaration)]),
        }
    }

    /// A handler that must never be routed.
    pub fn excluded(owner: impl Into<String>, name: impl Into<String>) -> Self {
        HandlerDescriptor::from_markers(owner, name, vec![Marker::NonAction])
    }

    /// A handler with no routing information at all.
    pub fn plain(owner: impl Into<String>, name: impl Into<String>) -> Self {
        HandlerDescriptor::from_markers(owner, name, Vec::new())
    }

    pub fn declarations(&self) -> impl Iterator<Item = &RouteDeclaration> {
        self.markers.iter().filter_map(|m| match m {
            Marker::Route(declaration) => Some(declaration),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.markers.iter().any(|m| matches!(m, Marker::NonAction))
    }
}

/// Builder for a routable handler.
///
/// There is no way to add a second declaration or an exclusion marker here,
/// so handlers built this way cannot be ambiguous or conflicting.
#[derive(Debug, Clone)]
pub struct RoutableHandler {
    inner: HandlerDescriptor,
}

impl RoutableHandler {
    #[must_use]
    pub fn verb(mut self, verb: Verb) -> Self {
        self.inner.markers.push(Marker::Verb(verb));
        self
    }

    #[must_use]
    pub fn accept_verbs<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner
            .markers
            .push(Marker::AcceptVerbs(verbs.into_iter().map(Into::into).collect()));
        self
    }

    #[must_use]
    pub fn default_value(mut self, name: impl Into<String>, value: impl Into<RouteValue>) -> Self {
        self.inner.markers.push(Marker::Default {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.inner.markers.push(Marker::Optional { name: name.into() });
        self
    }

    #[must_use]
    pub fn url_param(
        mut self,
        name: impl Into<String>,
        default: Option<RouteValue>,
        constraint: Option<&str>,
    ) -> Self {
        self.inner.markers.push(Marker::UrlParam {
            name: name.into(),
            default,
            constraint: constraint.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub fn constraint(mut self, name: impl Into<String>, constraint: Constraint) -> Self {
        self.inner.markers.push(Marker::Constraint {
            name: name.into(),
            constraint,
        });
        self
    }

    #[must_use]
    pub fn build(self) -> HandlerDescriptor {
        self.inner
    }
}

impl From<RoutableHandler> for HandlerDescriptor {
    fn from(handler: RoutableHandler) -> Self {
        handler.build()
    }
}
