use crate::catalog::{HandlerDescriptor, RouteDeclaration};
use crate::error::CompileError;

/// The handler's single route declaration, if it has one.
///
/// `Ok(None)` means the handler is not routable and is skipped. More than
/// one declaration is an error.
pub fn validate_declarations(
    handler: &HandlerDescriptor,
) -> Result<Option<&RouteDeclaration>, CompileError> {
    let mut declarations = handler.declarations();
    let Some(first) = declarations.next() else {
        return Ok(None);
    };
    let extra = declarations.count();
    if extra > 0 {
        return Err(CompileError::AmbiguousRouteDeclaration {
            owner: handler.owner.clone(),
            handler: handler.name.clone(),
            count: extra + 1,
        });
    }
    Ok(Some(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Marker;

    #[test]
    fn test_zero_declarations_is_not_routable() {
        let handler = HandlerDescriptor::plain("Test", "Helper");
        assert!(validate_declarations(&handler).unwrap().is_none());
    }

    #[test]
    fn test_single_declaration_proceeds() {
        let handler =
            HandlerDescriptor::routable("Test", "Basic", RouteDeclaration::new("test/basic")).build();
        let declaration = validate_declarations(&handler).unwrap().unwrap();
        assert_eq!(declaration.url, "test/basic");
    }

    #[test]
    fn test_multiple_declarations_are_ambiguous() {
        let handler = HandlerDescriptor::from_markers(
            "Test",
            "Twice",
            vec![
                Marker::Route(RouteDeclaration::new("a")),
                Marker::Route(RouteDeclaration::new("b")),
                Marker::Route(RouteDeclaration::new("c")),
            ],
        );
        match validate_declarations(&handler).unwrap_err() {
            CompileError::AmbiguousRouteDeclaration { handler, count, .. } => {
                assert_eq!(handler, "Twice");
                assert_eq!(count, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
