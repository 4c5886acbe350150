//! # waymark
//!
//! **waymark** compiles declarative route annotations on request handlers
//! into an ordered, immutable route table.
//!
//! ## Overview
//!
//! Handlers are grouped under owners (think controllers and their actions).
//! Each handler may carry a route declaration plus markers for verbs,
//! parameter defaults and constraints. Owners may also carry route
//! initializers: callbacks that register routes imperatively. The compiler
//! walks a [`HandlerCatalog`](catalog::HandlerCatalog), validates what it
//! finds and appends one [`RouteEntry`](table::RouteEntry) per routable
//! handler to a route table.
//!
//! ## Architecture
//!
//! - **[`catalog`]** - Handler descriptors, markers, initializers, and the
//!   in-memory and file-backed catalogs
//! - **[`verbs`]** - The verb set value type and verb resolution
//! - **[`compiler`]** - Declaration validation, entry building, initializer
//!   invocation and the per-scope compile loop
//! - **[`table`]** - The registry trait the compiler writes to and the
//!   reference route table with first-match dispatch
//! - **[`hot_reload`]** - Atomic publishing of freshly compiled tables
//! - **[`config`]** - Compiler key names and owner suffix
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`error`]** - Error taxonomy
//!
//! ### Compilation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host
//!     participant Compiler as RouteTableCompiler
//!     participant Catalog as HandlerCatalog
//!     participant Table as RouteRegistry
//!
//!     Host->>Compiler: compile_all(&mut table)
//!     loop every owner, catalog order
//!         Compiler->>Catalog: initializers(owner)
//!         Compiler->>Compiler: validate all signatures
//!         Compiler->>Table: run each initializer
//!         Compiler->>Catalog: handlers(owner)
//!         loop every handler, catalog order
//!             Compiler->>Compiler: declarations: 0 skip, 1 ok, 2+ error
//!             Compiler->>Compiler: resolve verbs
//!             Compiler->>Compiler: build name, defaults, constraints
//!             Compiler->>Table: register(entry)
//!         end
//!     end
//!     alt any error
//!         Compiler->>Table: rollback_to(start)
//!         Compiler-->>Host: Err(CompileError)
//!     else
//!         Compiler-->>Host: Ok(entries added)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use waymark::{
//!     HandlerDescriptor, RouteDeclaration, RouteTable, RouteTableCompiler, StaticCatalog, Verb,
//! };
//!
//! let catalog = StaticCatalog::new()
//!     .with_handler(HandlerDescriptor::routable(
//!         "Test",
//!         "AllDefaults",
//!         RouteDeclaration::new("test/all-defaults/{p1}/{p2}")
//!             .with_default("p1", "blank")
//!             .with_default("p2", 42),
//!     ))
//!     .with_handler(
//!         HandlerDescriptor::routable("Test", "Save", RouteDeclaration::new("test/save"))
//!             .verb(Verb::Post),
//!     );
//!
//! let mut table = RouteTable::new();
//! RouteTableCompiler::new(catalog).compile_all(&mut table).unwrap();
//!
//! let matched = table.route(&Method::GET, "/test/all-defaults").unwrap();
//! assert_eq!(matched.entry.name, "Get.Test.AllDefaults");
//! assert_eq!(matched.text("p1").as_deref(), Some("blank"));
//! assert_eq!(matched.text("p2").as_deref(), Some("42"));
//!
//! assert!(table.lookup("Post.Test.Save").is_some());
//! assert!(table.route(&Method::GET, "/test/save").is_none());
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`CompileError`] naming the owner, the handler or
//! initializer, and the offending token. A failed call leaves the table as
//! it was before the call.

pub mod catalog;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod hot_reload;
pub mod logging;
pub mod table;
pub mod verbs;

pub use catalog::{
    HandlerCatalog, HandlerDescriptor, Marker, RouteDeclaration, RouteInitializer, StaticCatalog,
};
pub use compiler::RouteTableCompiler;
pub use config::CompilerConfig;
pub use error::{CompileError, InitializerViolation, TableError};
pub use table::{Constraint, RouteEntry, RouteMatch, RouteRegistry, RouteTable, RouteValue};
pub use verbs::{Verb, VerbSet};
