//! # Hot Reload Module
//!
//! A compiled [`RouteTable`] is read-only. To change routes at runtime,
//! compile a fresh table and publish it with a single atomic pointer swap.
//! Readers holding the previous table keep using it until they drop it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use waymark::catalog::ConstraintRegistry;
//! use waymark::config::CompilerConfig;
//! use waymark::hot_reload::{shared_table, watch_catalog};
//!
//! let shared = shared_table();
//! let watcher = watch_catalog(
//!     "routes.yaml",
//!     shared.clone(),
//!     CompilerConfig::default(),
//!     ConstraintRegistry::new(),
//! )?;
//!
//! // request path: take a snapshot, route against it
//! let table = shared.load();
//! let _ = table.route(&http::Method::GET, "/test/basic");
//! # drop(watcher);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! If the catalog fails to load or compile, the error is logged and the
//! previous table stays published.

use crate::catalog::{load_catalog, ConstraintRegistry, HandlerCatalog};
use crate::compiler::RouteTableCompiler;
use crate::config::CompilerConfig;
use crate::table::RouteTable;
use anyhow::Context;
use arc_swap::ArcSwap;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// A route table that can be swapped atomically while being read.
pub type SharedRouteTable = Arc<ArcSwap<RouteTable>>;

/// An empty shared table.
#[must_use]
pub fn shared_table() -> SharedRouteTable {
    Arc::new(ArcSwap::from_pointee(RouteTable::new()))
}

/// Compile `catalog` into a fresh table and swap it in.
///
/// On error nothing is published and the current table stays in place.
pub fn publish<C: HandlerCatalog>(
    shared: &SharedRouteTable,
    catalog: C,
    config: &CompilerConfig,
) -> anyhow::Result<Arc<RouteTable>> {
    let mut table = RouteTable::new();
    RouteTableCompiler::with_config(catalog, config.clone())
        .compile_all(&mut table)
        .context("failed to compile route table")?;
    table.log_summary();
    let table = Arc::new(table);
    shared.store(Arc::clone(&table));
    Ok(table)
}

/// Load a catalog file and publish it.
pub fn publish_file(
    shared: &SharedRouteTable,
    path: &Path,
    config: &CompilerConfig,
    matchers: &ConstraintRegistry,
) -> anyhow::Result<Arc<RouteTable>> {
    let catalog = load_catalog(path, matchers)?;
    publish(shared, &catalog, config)
}

/// Watch a catalog file and republish the table when it changes.
///
/// The file is published once before watching starts, and that first load
/// must succeed. Keep the returned watcher alive for as long as reloads
/// should happen.
pub fn watch_catalog<P: AsRef<Path>>(
    catalog_path: P,
    shared: SharedRouteTable,
    config: CompilerConfig,
    matchers: ConstraintRegistry,
) -> anyhow::Result<RecommendedWatcher> {
    let path: PathBuf = catalog_path.as_ref().to_path_buf();
    publish_file(&shared, &path, &config, &matchers)?;

    let watch_path = path.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    match publish_file(&shared, &watch_path, &config, &matchers) {
                        Ok(table) => info!(
                            catalog = %watch_path.display(),
                            routes_count = table.entries().count(),
                            "hot-reload: route table republished"
                        ),
                        Err(e) => error!(
                            catalog = %watch_path.display(),
                            error = %format!("{e:#}"),
                            "hot-reload: keeping previous route table"
                        ),
                    }
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )
    .context("failed to create catalog watcher")?;

    watcher
        .watch(&path, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", path.display()))?;
    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{HandlerDescriptor, Marker, RouteDeclaration, StaticCatalog};
    use http::Method;

    #[test]
    fn test_publish_swaps_table() {
        let shared = shared_table();
        let catalog = StaticCatalog::new().with_handler(HandlerDescriptor::routable(
            "Test",
            "Basic",
            RouteDeclaration::new("test/basic"),
        ));
        let before = shared.load_full();
        publish(&shared, &catalog, &CompilerConfig::default()).unwrap();
        assert!(before.route(&Method::GET, "test/basic").is_none());
        assert!(shared.load().route(&Method::GET, "test/basic").is_some());
    }

    #[test]
    fn test_failed_publish_keeps_previous_table() {
        let shared = shared_table();
        let good = StaticCatalog::new().with_handler(HandlerDescriptor::routable(
            "Test",
            "Basic",
            RouteDeclaration::new("test/basic"),
        ));
        publish(&shared, &good, &CompilerConfig::default()).unwrap();

        let bad = StaticCatalog::new().with_handler(HandlerDescriptor::from_markers(
            "Test",
            "Broken",
            vec![Marker::NonAction, Marker::Route(RouteDeclaration::new("x"))],
        ));
        let err = publish(&shared, &bad, &CompilerConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("non-routable"));
        assert!(shared.load().lookup("Get.Test.Basic").is_some());
    }
}
