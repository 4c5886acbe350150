use crate::catalog::{HandlerDescriptor, Marker, RouteDeclaration};
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::table::{Constraint, RouteConstraints, RouteEntry, RouteValue, RouteValues};
use crate::verbs::VerbSet;

/// Turns one validated handler into a [`RouteEntry`].
#[derive(Debug, Clone, Copy)]
pub struct RouteDefinitionBuilder<'a> {
    config: &'a CompilerConfig,
}

impl<'a> RouteDefinitionBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a CompilerConfig) -> Self {
        RouteDefinitionBuilder { config }
    }

    /// Route name: the declared name, or `<VerbLabel>.<Owner>.<Handler>`.
    #[must_use]
    pub fn route_name(
        &self,
        handler: &HandlerDescriptor,
        declaration: &RouteDeclaration,
        verbs: VerbSet,
    ) -> String {
        match &declaration.name {
            Some(name) => name.clone(),
            None => format!(
                "{}.{}.{}",
                verbs.label(),
                self.config.display_owner(&handler.owner),
                handler.name
            ),
        }
    }

    pub fn build(
        &self,
        handler: &HandlerDescriptor,
        declaration: &RouteDeclaration,
        verbs: VerbSet,
    ) -> Result<RouteEntry, CompileError> {
        Ok(RouteEntry {
            name: self.route_name(handler, declaration, verbs),
            url: declaration.url.clone(),
            defaults: self.defaults(handler, declaration)?,
            constraints: self.constraints(handler, declaration, verbs)?,
        })
    }

    fn defaults(
        &self,
        handler: &HandlerDescriptor,
        declaration: &RouteDeclaration,
    ) -> Result<RouteValues, CompileError> {
        let mut defaults = RouteValues::new();
        defaults.set(
            self.config.owner_key.as_str(),
            RouteValue::from(self.config.display_owner(&handler.owner)),
        );
        defaults.set(
            self.config.handler_key.as_str(),
            RouteValue::from(handler.name.as_str()),
        );

        let duplicate = |parameter: &str| CompileError::DuplicateParameterDefault {
            owner: handler.owner.clone(),
            handler: handler.name.clone(),
            parameter: parameter.to_string(),
        };

        for (key, value) in declaration.defaults.iter() {
            if !defaults.try_insert(key, value.clone()) {
                return Err(duplicate(key));
            }
        }

        for marker in &handler.markers {
            let (name, value) = match marker {
                Marker::Default { name, value } => (name, value.clone()),
                Marker::Optional { name } => (name, RouteValue::Optional),
                Marker::UrlParam {
                    name,
                    default: Some(value),
                    ..
                } => (name, value.clone()),
                _ => continue,
            };
            if !defaults.try_insert(name.as_str(), value) {
                return Err(duplicate(name));
            }
        }
        Ok(defaults)
    }

    fn constraints(
        &self,
        handler: &HandlerDescriptor,
        declaration: &RouteDeclaration,
        verbs: VerbSet,
    ) -> Result<RouteConstraints, CompileError> {
        let mut constraints = RouteConstraints::new();
        constraints.set(
            self.config.verb_constraint_key.as_str(),
            Constraint::methods(verbs),
        );

        let duplicate = |parameter: &str| CompileError::DuplicateParameterConstraint {
            owner: handler.owner.clone(),
            handler: handler.name.clone(),
            parameter: parameter.to_string(),
        };

        for (key, constraint) in declaration.constraints.iter() {
            if !constraints.try_insert(key, constraint.clone()) {
                return Err(duplicate(key));
            }
        }

        for marker in &handler.markers {
            let (name, constraint) = match marker {
                Marker::Constraint { name, constraint } => (name, constraint.clone()),
                Marker::UrlParam {
                    name,
                    constraint: Some(pattern),
                    ..
                } => (name, Constraint::pattern(pattern.as_str())),
                _ => continue,
            };
            if !constraints.try_insert(name.as_str(), constraint) {
                return Err(duplicate(name));
            }
        }
        Ok(constraints)
    }
}
