use crate::catalog::{InitializerSignature, ParameterType, Receiver, RouteInitializer};
use crate::error::{CompileError, InitializerViolation};
use crate::table::RouteRegistry;
use tracing::debug;

/// Check an initializer's declared shape.
///
/// Checked in order: exactly one parameter, that parameter is the route
/// table, no owner instance required.
pub fn check_signature(signature: &InitializerSignature) -> Result<(), InitializerViolation> {
    match signature.parameters.as_slice() {
        [ParameterType::RouteTable] => {}
        [other] => {
            return Err(InitializerViolation::WrongParameterType {
                found: other.to_string(),
            })
        }
        params => {
            return Err(InitializerViolation::WrongArity {
                found: params.len(),
            })
        }
    }
    if signature.receiver == Receiver::Instance {
        return Err(InitializerViolation::RequiresInstance);
    }
    Ok(())
}

/// Validate every initializer, then run them in order against `table`.
///
/// Nothing runs unless all of them are valid.
pub fn run_initializers(
    initializers: &[RouteInitializer],
    table: &mut dyn RouteRegistry,
) -> Result<(), CompileError> {
    for initializer in initializers {
        check_signature(&initializer.signature).map_err(|violation| {
            CompileError::InvalidRouteInitializer {
                owner: initializer.owner.clone(),
                initializer: initializer.name.clone(),
                violation,
            }
        })?;
    }

    for initializer in initializers {
        let before = table.len();
        initializer
            .invoke(table)
            .map_err(|source| CompileError::InitializerFailed {
                owner: initializer.owner.clone(),
                initializer: initializer.name.clone(),
                source,
            })?;
        debug!(
            owner = %initializer.owner,
            initializer = %initializer.name,
            routes_added = table.len().saturating_sub(before),
            "Route initializer ran"
        );
    }
    Ok(())
}
