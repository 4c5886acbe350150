//! # Route Table Compiler
//!
//! Turns a [`HandlerCatalog`](crate::catalog::HandlerCatalog) into entries in
//! a [`RouteRegistry`](crate::table::RouteRegistry).
//!
//! ## Pipeline
//!
//! For each owner scope, in catalog order:
//!
//! 1. Validate every route initializer, then run them in order with the
//!    live table.
//! 2. For each handler in catalog order: check it has at most one route
//!    declaration (none means "not routable", skipped), resolve its verbs,
//!    build the entry and register it.
//!
//! Registration order therefore follows catalog order, and initializer
//! routes always come before the declarative routes of the same scope.
//!
//! ## Failure
//!
//! Any error aborts the call and rolls the table back to where it was
//! before the call started.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use waymark::catalog::{HandlerDescriptor, RouteDeclaration, StaticCatalog};
//! use waymark::compiler::RouteTableCompiler;
//! use waymark::table::RouteTable;
//!
//! let catalog = StaticCatalog::new()
//!     .with_handler(HandlerDescriptor::routable("Test", "Basic", RouteDeclaration::new("test/basic")));
//!
//! let mut table = RouteTable::new();
//! let added = RouteTableCompiler::new(catalog).compile_all(&mut table).unwrap();
//! assert_eq!(added[0].name, "Get.Test.Basic");
//! assert!(table.route(&Method::GET, "/test/basic").is_some());
//! assert!(table.route(&Method::PUT, "/test/basic").is_none());
//! ```

mod builder;
mod core;
mod declaration;
mod initializer;

pub use builder::RouteDefinitionBuilder;
pub use core::RouteTableCompiler;
pub use declaration::validate_declarations;
pub use initializer::{check_signature, run_initializers};
