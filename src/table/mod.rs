//! # Route Table Module
//!
//! The route table is the sink the compiler registers entries into, and the
//! structure request dispatch reads from afterwards.
//!
//! ## Overview
//!
//! - [`RouteRegistry`] is the write side the compiler depends on. Any host
//!   table can implement it.
//! - [`RouteTable`] is the reference implementation: an ordered list of
//!   entries with a name index and first-match dispatch.
//!
//! ## Matching
//!
//! Routes are tried in registration order. A route matches when its URL
//! pattern accepts the path (missing trailing parameters fall back to
//! defaults) and every constraint accepts the request:
//!
//! - `Methods` constraints check the request verb.
//! - `Pattern` constraints on a URL parameter check its value in full,
//!   ignoring case; on any other key they check the whole path.
//! - `Custom` constraints are delegated to the host.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use waymark::table::{Constraint, RouteEntry, RouteRegistry, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table
//!     .register(
//!         RouteEntry::new("Get.Pets.Show", "pets/{id}")
//!             .with_constraint("id", Constraint::pattern(r"\d+"))
//!             .with_constraint("verb", Constraint::Methods(vec!["GET".into()])),
//!     )
//!     .unwrap();
//!
//! let matched = table.route(&Method::GET, "/pets/42").unwrap();
//! assert_eq!(matched.text("id").as_deref(), Some("42"));
//! assert!(table.route(&Method::GET, "/pets/abc").is_none());
//! ```

mod core;
mod entry;
mod pattern;
#[cfg(test)]
mod tests;

pub use core::{RouteMatch, RouteRegistry, RouteTable};
pub use entry::{
    Constraint, RouteConstraint, RouteConstraints, RouteEntry, RouteMap, RouteRequest, RouteValue,
    RouteValues,
};
