//! Error types for route compilation and route table registration.
//!
//! Compilation is a one-shot transform run at startup, so nothing here is
//! retried or recovered. Every variant carries enough context (owner,
//! handler or initializer, offending token) for the hosting bootstrap to
//! report the problem and stop.

use thiserror::Error;

/// Errors raised while compiling a handler catalog into a route table.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A handler carries more than one route declaration.
    #[error("handler '{handler}' in '{owner}' carries {count} route declarations; at most one is allowed")]
    AmbiguousRouteDeclaration {
        owner: String,
        handler: String,
        count: usize,
    },

    /// A handler is marked as not invokable but also declares a route.
    #[error("handler '{handler}' in '{owner}' is marked non-routable but declares route '{url}'")]
    ConflictingHandlerConfiguration {
        owner: String,
        handler: String,
        url: String,
    },

    /// An accept-verbs marker names a verb outside the supported set.
    #[error("handler '{handler}' in '{owner}' accepts unsupported verb '{token}'")]
    UnsupportedVerbToken {
        owner: String,
        handler: String,
        token: String,
    },

    /// Two markers contribute a default for the same parameter.
    #[error("handler '{handler}' in '{owner}' declares more than one default for parameter '{parameter}'")]
    DuplicateParameterDefault {
        owner: String,
        handler: String,
        parameter: String,
    },

    /// Two markers contribute a constraint for the same parameter.
    #[error("handler '{handler}' in '{owner}' declares more than one constraint for parameter '{parameter}'")]
    DuplicateParameterConstraint {
        owner: String,
        handler: String,
        parameter: String,
    },

    /// A route initializer does not have the required shape.
    #[error("route initializer '{initializer}' in '{owner}' {violation}")]
    InvalidRouteInitializer {
        owner: String,
        initializer: String,
        violation: InitializerViolation,
    },

    /// A valid route initializer failed while registering its routes.
    #[error("route initializer '{initializer}' in '{owner}' failed")]
    InitializerFailed {
        owner: String,
        initializer: String,
        #[source]
        source: TableError,
    },

    /// The route table rejected a compiled entry.
    #[error("route for handler '{handler}' in '{owner}' could not be registered")]
    Registration {
        owner: String,
        handler: String,
        #[source]
        source: TableError,
    },
}

impl CompileError {
    /// Stable identifier for the error kind, suitable for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::AmbiguousRouteDeclaration { .. } => "AmbiguousRouteDeclaration",
            CompileError::ConflictingHandlerConfiguration { .. } => {
                "ConflictingHandlerConfiguration"
            }
            CompileError::UnsupportedVerbToken { .. } => "UnsupportedVerbToken",
            CompileError::DuplicateParameterDefault { .. } => "DuplicateParameterDefault",
            CompileError::DuplicateParameterConstraint { .. } => "DuplicateParameterConstraint",
            CompileError::InvalidRouteInitializer { .. } => "InvalidRouteInitializer",
            CompileError::InitializerFailed { .. } => "InitializerFailed",
            CompileError::Registration { .. } => "Registration",
        }
    }

    /// The owner scope that was being compiled when the error occurred.
    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            CompileError::AmbiguousRouteDeclaration { owner, .. }
            | CompileError::ConflictingHandlerConfiguration { owner, .. }
            | CompileError::UnsupportedVerbToken { owner, .. }
            | CompileError::DuplicateParameterDefault { owner, .. }
            | CompileError::DuplicateParameterConstraint { owner, .. }
            | CompileError::InvalidRouteInitializer { owner, .. }
            | CompileError::InitializerFailed { owner, .. }
            | CompileError::Registration { owner, .. } => owner,
        }
    }
}

/// The specific way a route initializer's declared signature is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitializerViolation {
    /// The initializer does not take exactly one parameter.
    #[error("must accept a route table as its only parameter (found {found} parameters)")]
    WrongArity { found: usize },

    /// The single parameter is not the route table type.
    #[error("must accept a route table as its only parameter (found '{found}')")]
    WrongParameterType { found: String },

    /// The initializer needs an owner instance to be called.
    #[error("must be callable without an owner instance")]
    RequiresInstance,
}

/// Errors raised by a [`RouteRegistry`](crate::table::RouteRegistry) when an
/// entry cannot be registered.
#[derive(Debug, Error)]
pub enum TableError {
    /// A route with the same name is already registered.
    #[error("a route named '{name}' is already registered")]
    DuplicateName { name: String },

    /// The URL pattern could not be parsed.
    #[error("route '{route}' has an invalid URL pattern '{pattern}': {reason}")]
    InvalidPattern {
        route: String,
        pattern: String,
        reason: String,
    },

    /// A regular-expression constraint did not compile.
    #[error("route '{route}' has an invalid constraint for '{parameter}'")]
    InvalidConstraint {
        route: String,
        parameter: String,
        #[source]
        source: regex::Error,
    },
}
