use super::builder::RouteDefinitionBuilder;
use super::declaration::validate_declarations;
use super::initializer::run_initializers;
use crate::catalog::HandlerCatalog;
use crate::config::CompilerConfig;
use crate::error::{CompileError, TableError};
use crate::table::{RouteEntry, RouteRegistry};
use crate::verbs::resolve_verbs;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Compiles a [`HandlerCatalog`] into a [`RouteRegistry`].
///
/// Each call is all-or-nothing: on error the table is rolled back to its
/// length before the call, then the error is returned.
#[derive(Debug, Clone)]
pub struct RouteTableCompiler<C> {
    catalog: C,
    config: CompilerConfig,
}

impl<C: HandlerCatalog> RouteTableCompiler<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, CompilerConfig::default())
    }

    pub fn with_config(catalog: C, config: CompilerConfig) -> Self {
        RouteTableCompiler { catalog, config }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile every owner in catalog order.
    ///
    /// Returns the entries this call added, in table order.
    pub fn compile_all(
        &self,
        table: &mut dyn RouteRegistry,
    ) -> Result<Vec<Arc<RouteEntry>>, CompileError> {
        let owners = self.catalog.owners();
        self.transaction(table, |table| {
            for owner in &owners {
                self.compile_scope(owner, table)?;
            }
            Ok(())
        })
    }

    /// Compile a single owner scope.
    pub fn compile_owner(
        &self,
        owner: &str,
        table: &mut dyn RouteRegistry,
    ) -> Result<Vec<Arc<RouteEntry>>, CompileError> {
        self.transaction(table, |table| self.compile_scope(owner, table))
    }

    fn transaction<F>(
        &self,
        table: &mut dyn RouteRegistry,
        body: F,
    ) -> Result<Vec<Arc<RouteEntry>>, CompileError>
    where
        F: FnOnce(&mut dyn RouteRegistry) -> Result<(), CompileError>,
    {
        let mark = table.len();
        match body(&mut *table) {
            Ok(()) => Ok(table.entries_from(mark)),
            Err(err) => {
                let discarded = table.len().saturating_sub(mark);
                table.rollback_to(mark);
                warn!(
                    error_kind = err.kind(),
                    owner = err.owner(),
                    error = %err,
                    routes_discarded = discarded,
                    "Route compilation failed; table rolled back"
                );
                Err(err)
            }
        }
    }

    fn compile_scope(&self, owner: &str, table: &mut dyn RouteRegistry) -> Result<(), CompileError> {
        let start = table.len();

        let initializers = self.catalog.initializers(owner);
        run_initializers(&initializers, table)?;

        let builder = RouteDefinitionBuilder::new(&self.config);
        let handlers = self.catalog.handlers(owner);
        let mut skipped = 0usize;
        for handler in &handlers {
            let Some(declaration) = validate_declarations(handler)? else {
                skipped += 1;
                continue;
            };
            // also rejects excluded handlers that declare a route
            let verbs = resolve_verbs(handler)?;
            let entry = builder.build(handler, declaration, verbs)?;
            debug!(
                owner = %owner,
                handler = %handler.name,
                route_name = %entry.name,
                route_pattern = %entry.url,
                verbs = %verbs.label(),
                "Compiled route"
            );
            // hosts may supply registries that accept any name
            if table.contains_name(&entry.name) {
                return Err(CompileError::Registration {
                    owner: owner.to_string(),
                    handler: handler.name.clone(),
                    source: TableError::DuplicateName { name: entry.name },
                });
            }
            table
                .register(entry)
                .map_err(|source| CompileError::Registration {
                    owner: owner.to_string(),
                    handler: handler.name.clone(),
                    source,
                })?;
        }

        info!(
            owner = %owner,
            initializers = initializers.len(),
            handlers = handlers.len(),
            handlers_skipped = skipped,
            routes_added = table.len().saturating_sub(start),
            "Compiled owner scope"
        );
        Ok(())
    }
}
