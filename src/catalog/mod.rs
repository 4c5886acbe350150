//! # Handler Catalog
//!
//! The compiler never discovers handlers on its own. A [`HandlerCatalog`]
//! enumerates owners, their handlers (with markers) and their route
//! initializers, and the compiler consumes that description.
//!
//! Two backends ship with the crate:
//!
//! - [`StaticCatalog`], built in code with the [`HandlerDescriptor`]
//!   builders.
//! - [`load_catalog`], which reads a YAML or JSON catalog file into a
//!   `StaticCatalog`.
//!
//! ```rust
//! use waymark::catalog::{HandlerCatalog, HandlerDescriptor, RouteDeclaration, StaticCatalog};
//! use waymark::verbs::Verb;
//!
//! let catalog = StaticCatalog::new()
//!     .with_handler(HandlerDescriptor::routable("Test", "Basic", RouteDeclaration::new("test/basic")))
//!     .with_handler(
//!         HandlerDescriptor::routable("Test", "Save", RouteDeclaration::new("test/save"))
//!             .verb(Verb::Post),
//!     )
//!     .with_handler(HandlerDescriptor::excluded("Test", "Helper"));
//!
//! assert_eq!(catalog.owners(), vec!["Test"]);
//! assert_eq!(catalog.handlers("Test").len(), 3);
//! ```

mod initializer;
mod load;
mod registry;
mod types;

pub use initializer::{
    InitializerFn, InitializerSignature, ParameterType, Receiver, RouteInitializer,
};
pub use load::{load_catalog, parse_catalog, ConstraintRegistry};
pub use registry::StaticCatalog;
pub use types::{HandlerDescriptor, Marker, RoutableHandler, RouteDeclaration};

/// Source of handlers and initializers for the compiler.
///
/// Enumeration order must be stable: the compiled table's order follows it.
pub trait HandlerCatalog {
    /// Owner names in enumeration order.
    fn owners(&self) -> Vec<String>;

    /// Handlers of one owner, in enumeration order. Unknown owners yield none.
    fn handlers(&self, owner: &str) -> Vec<HandlerDescriptor>;

    /// Route initializers of one owner, in enumeration order.
    fn initializers(&self, owner: &str) -> Vec<RouteInitializer>;
}

impl<T: HandlerCatalog + ?Sized> HandlerCatalog for &T {
    fn owners(&self) -> Vec<String> {
        (**self).owners()
    }

    fn handlers(&self, owner: &str) -> Vec<HandlerDescriptor> {
        (**self).handlers(owner)
    }

    fn initializers(&self, owner: &str) -> Vec<RouteInitializer> {
        (**self).initializers(owner)
    }
}

impl<T: HandlerCatalog + ?Sized> HandlerCatalog for std::sync::Arc<T> {
    fn owners(&self) -> Vec<String> {
        (**self).owners()
    }

    fn handlers(&self, owner: &str) -> Vec<HandlerDescriptor> {
        (**self).handlers(owner)
    }

    fn initializers(&self, owner: &str) -> Vec<RouteInitializer> {
        (**self).initializers(owner)
    }
}
