use crate::error::TableError;
use crate::table::RouteRegistry;
use std::fmt;
use std::sync::Arc;

/// Callback type for route initializers.
pub type InitializerFn =
    Arc<dyn Fn(&mut dyn RouteRegistry) -> Result<(), TableError> + Send + Sync>;

/// How an initializer is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Callable without an owner instance.
    Static,
    /// Needs an owner instance; not allowed for initializers.
    Instance,
}

/// Type of a declared initializer parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    /// The mutable route table handle.
    RouteTable,
    /// Anything else, by type name.
    Other(String),
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterType::RouteTable => f.write_str("RouteTable"),
            ParameterType::Other(name) => f.write_str(name),
        }
    }
}

/// The shape an initializer was declared with, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializerSignature {
    pub receiver: Receiver,
    pub parameters: Vec<ParameterType>,
}

impl InitializerSignature {
    /// The only accepted shape: static, one route table parameter.
    #[must_use]
    pub fn expected() -> Self {
        InitializerSignature {
            receiver: Receiver::Static,
            parameters: vec![ParameterType::RouteTable],
        }
    }
}

/// An imperative registration callback scoped to one owner.
#[derive(Clone)]
pub struct RouteInitializer {
    pub owner: String,
    pub name: String,
    pub signature: InitializerSignature,
    callback: InitializerFn,
}

impl RouteInitializer {
    pub fn new<F>(owner: impl Into<String>, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut dyn RouteRegistry) -> Result<(), TableError> + Send + Sync + 'static,
    {
        RouteInitializer {
            owner: owner.into(),
            name: name.into(),
            signature: InitializerSignature::expected(),
            callback: Arc::new(callback),
        }
    }

    /// Override the declared signature.
    ///
    /// Catalog backends that discover initializers from some other
    /// description use this to report the shape they found, so the compiler
    /// can reject it.
    #[must_use]
    pub fn with_signature(mut self, signature: InitializerSignature) -> Self {
        self.signature = signature;
        self
    }

    pub(crate) fn invoke(&self, table: &mut dyn RouteRegistry) -> Result<(), TableError> {
        (self.callback)(table)
    }
}

impl fmt::Debug for RouteInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteInitializer")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
