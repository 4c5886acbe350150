//! # Verbs
//!
//! Request verbs and the [`VerbSet`] a compiled route accepts.
//!
//! A handler can carry several kinds of verb information: simple verb
//! markers (`Verb(Post)`), accept-verbs markers listing method names as
//! strings, and a shorthand verb on the route declaration itself. All of
//! them are unioned; none override each other. A handler with no verb
//! information at all accepts `GET`.
//!
//! The set has a fixed canonical order (`GET, POST, PUT, DELETE, HEAD,
//! PATCH, OPTIONS`), so both the synthesized route name and the expanded
//! verb constraint are independent of the order markers were declared in.

use crate::catalog::{HandlerDescriptor, Marker};
use crate::error::CompileError;
use http::Method;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// A single request verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    Options,
}

impl Verb {
    /// Every verb, in canonical order.
    pub const ALL: [Verb; 7] = [
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Delete,
        Verb::Head,
        Verb::Patch,
        Verb::Options,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Title-case label used in synthesized route names (`Get`, `Post`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Verb::Get => "Get",
            Verb::Post => "Post",
            Verb::Put => "Put",
            Verb::Delete => "Delete",
            Verb::Head => "Head",
            Verb::Patch => "Patch",
            Verb::Options => "Options",
        }
    }

    /// Uppercase method name as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
            Verb::Patch => "PATCH",
            Verb::Options => "OPTIONS",
        }
    }

    #[must_use]
    pub fn as_method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Head => Method::HEAD,
            Verb::Patch => Method::PATCH,
            Verb::Options => Method::OPTIONS,
        }
    }

    /// Parse a verb name, ignoring ASCII case.
    #[must_use]
    pub fn parse(token: &str) -> Option<Verb> {
        let token = token.trim();
        Verb::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::parse(s).ok_or_else(|| s.to_string())
    }
}

/// A set of verbs stored as a small flag set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VerbSet(u8);

impl VerbSet {
    #[must_use]
    pub const fn empty() -> Self {
        VerbSet(0)
    }

    #[must_use]
    pub const fn single(verb: Verb) -> Self {
        VerbSet(verb.bit())
    }

    pub fn insert(&mut self, verb: Verb) {
        self.0 |= verb.bit();
    }

    #[must_use]
    pub const fn contains(self, verb: Verb) -> bool {
        self.0 & verb.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Verb> {
        Verb::ALL.into_iter().filter(move |v| self.contains(*v))
    }

    /// Canonical rendering used in route names, e.g. `Get` or `Get, Post`.
    #[must_use]
    pub fn label(self) -> String {
        self.iter()
            .map(Verb::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Literal uppercase method names, in canonical order.
    #[must_use]
    pub fn method_names(self) -> Vec<String> {
        self.iter().map(|v| v.as_str().to_string()).collect()
    }

    #[must_use]
    pub fn allows(self, method: &Method) -> bool {
        self.iter().any(|v| v.as_method() == *method)
    }
}

impl BitOr for VerbSet {
    type Output = VerbSet;

    fn bitor(self, rhs: VerbSet) -> VerbSet {
        VerbSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for VerbSet {
    fn bitor_assign(&mut self, rhs: VerbSet) {
        self.0 |= rhs.0;
    }
}

impl From<Verb> for VerbSet {
    fn from(verb: Verb) -> Self {
        VerbSet::single(verb)
    }
}

impl FromIterator<Verb> for VerbSet {
    fn from_iter<I: IntoIterator<Item = Verb>>(iter: I) -> Self {
        iter.into_iter().fold(VerbSet::empty(), |set, v| set | v.into())
    }
}

impl fmt::Debug for VerbSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Resolve the verbs a handler accepts from its markers.
///
/// Fails with [`CompileError::ConflictingHandlerConfiguration`] when the
/// handler is both excluded and routable, and with
/// [`CompileError::UnsupportedVerbToken`] for an accept-verbs entry that
/// does not name a known verb.
pub fn resolve_verbs(handler: &HandlerDescriptor) -> Result<VerbSet, CompileError> {
    if handler.is_excluded() {
        if let Some(declaration) = handler.declarations().next() {
            return Err(CompileError::ConflictingHandlerConfiguration {
                owner: handler.owner.clone(),
                handler: handler.name.clone(),
                url: declaration.url.clone(),
            });
        }
    }

    let mut verbs = VerbSet::empty();
    for marker in &handler.markers {
        match marker {
            Marker::Verb(verb) => verbs.insert(*verb),
            Marker::Route(declaration) => {
                if let Some(verb) = declaration.verb {
                    verbs.insert(verb);
                }
            }
            Marker::AcceptVerbs(tokens) => {
                for token in tokens {
                    let verb =
                        Verb::parse(token).ok_or_else(|| CompileError::UnsupportedVerbToken {
                            owner: handler.owner.clone(),
                            handler: handler.name.clone(),
                            token: token.clone(),
                        })?;
                    verbs.insert(verb);
                }
            }
            _ => {}
        }
    }

    if verbs.is_empty() {
        verbs.insert(Verb::Get);
    }
    Ok(verbs)
}
