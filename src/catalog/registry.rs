use super::initializer::RouteInitializer;
use super::types::HandlerDescriptor;
use super::HandlerCatalog;

#[derive(Debug, Clone, Default)]
struct OwnerScope {
    name: String,
    handlers: Vec<HandlerDescriptor>,
    initializers: Vec<RouteInitializer>,
}

/// In-memory catalog. Owners enumerate in the order they were first seen;
/// handlers and initializers in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    owners: Vec<OwnerScope>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn scope_mut(&mut self, owner: &str) -> &mut OwnerScope {
        let index = match self.owners.iter().position(|o| o.name == owner) {
            Some(i) => i,
            None => {
                self.owners.push(OwnerScope {
                    name: owner.to_string(),
                    ..Default::default()
                });
                self.owners.len() - 1
            }
        };
        &mut self.owners[index]
    }

    /// Declare an owner with no handlers yet, fixing its enumeration position.
    pub fn add_owner(&mut self, owner: &str) -> &mut Self {
        self.scope_mut(owner);
        self
    }

    pub fn add_handler(&mut self, handler: impl Into<HandlerDescriptor>) -> &mut Self {
        let handler = handler.into();
        self.scope_mut(&handler.owner.clone()).handlers.push(handler);
        self
    }

    pub fn add_initializer(&mut self, initializer: RouteInitializer) -> &mut Self {
        self.scope_mut(&initializer.owner.clone())
            .initializers
            .push(initializer);
        self
    }

    #[must_use]
    pub fn with_handler(mut self, handler: impl Into<HandlerDescriptor>) -> Self {
        self.add_handler(handler);
        self
    }

    #[must_use]
    pub fn with_initializer(mut self, initializer: RouteInitializer) -> Self {
        self.add_initializer(initializer);
        self
    }

    fn scope(&self, owner: &str) -> Option<&OwnerScope> {
        self.owners.iter().find(|o| o.name == owner)
    }
}

impl HandlerCatalog for StaticCatalog {
    fn owners(&self) -> Vec<String> {
        self.owners.iter().map(|o| o.name.clone()).collect()
    }

    fn handlers(&self, owner: &str) -> Vec<HandlerDescriptor> {
        self.scope(owner)
            .map(|o| o.handlers.clone())
            .unwrap_or_default()
    }

    fn initializers(&self, owner: &str) -> Vec<RouteInitializer> {
        self.scope(owner)
            .map(|o| o.initializers.clone())
            .unwrap_or_default()
    }
}
