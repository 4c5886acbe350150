use waymark::catalog::{
    InitializerSignature, ParameterType, Receiver, RouteInitializer, StaticCatalog,
};
use waymark::table::{RouteRegistry, RouteTable};
use waymark::{CompileError, InitializerViolation, RouteTableCompiler};

mod common;
use common::fixtures;

fn noop(name: &str, signature: InitializerSignature) -> RouteInitializer {
    RouteInitializer::new("Test", name, |_: &mut dyn RouteRegistry| Ok(())).with_signature(signature)
}

fn violation(initializer: RouteInitializer) -> InitializerViolation {
    let catalog = StaticCatalog::new().with_initializer(initializer);
    let mut table = RouteTable::new();
    match RouteTableCompiler::new(catalog)
        .compile_all(&mut table)
        .unwrap_err()
    {
        CompileError::InvalidRouteInitializer {
            owner, violation, ..
        } => {
            assert_eq!(owner, "Test");
            violation
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_zero_parameters_is_rejected() {
    let v = violation(noop(
        "none",
        InitializerSignature {
            receiver: Receiver::Static,
            parameters: vec![],
        },
    ));
    assert_eq!(v, InitializerViolation::WrongArity { found: 0 });
}

#[test]
fn test_two_parameters_is_rejected() {
    let v = violation(noop(
        "two",
        InitializerSignature {
            receiver: Receiver::Static,
            parameters: vec![ParameterType::RouteTable, ParameterType::Other("Logger".into())],
        },
    ));
    assert_eq!(v, InitializerViolation::WrongArity { found: 2 });
}

#[test]
fn test_wrong_parameter_type_is_rejected() {
    let v = violation(noop(
        "typed",
        InitializerSignature {
            receiver: Receiver::Static,
            parameters: vec![ParameterType::Other("String".into())],
        },
    ));
    assert_eq!(
        v,
        InitializerViolation::WrongParameterType {
            found: "String".into()
        }
    );
}

#[test]
fn test_instance_bound_is_rejected() {
    let v = violation(noop(
        "instance",
        InitializerSignature {
            receiver: Receiver::Instance,
            parameters: vec![ParameterType::RouteTable],
        },
    ));
    assert_eq!(v, InitializerViolation::RequiresInstance);
}

#[test]
fn test_error_message_names_initializer() {
    let catalog = StaticCatalog::new().with_initializer(noop(
        "instance",
        InitializerSignature {
            receiver: Receiver::Instance,
            parameters: vec![ParameterType::RouteTable],
        },
    ));
    let mut table = RouteTable::new();
    let err = RouteTableCompiler::new(catalog)
        .compile_all(&mut table)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "route initializer 'instance' in 'Test' must be callable without an owner instance"
    );
}

#[test]
fn test_initializers_run_in_catalog_order() {
    let catalog = StaticCatalog::new()
        .with_initializer(fixtures::index_initializer())
        .with_initializer(RouteInitializer::new(
            "Test",
            "second",
            |table: &mut dyn RouteRegistry| {
                // the first initializer's route is already visible
                if table.contains_name("index") {
                    table.map_route("after-index", "after", Default::default())
                } else {
                    Ok(())
                }
            },
        ));
    let mut table = RouteTable::new();
    let added = RouteTableCompiler::new(catalog)
        .compile_all(&mut table)
        .unwrap();
    let names: Vec<&str> = added.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["index", "after-index"]);
}

#[test]
fn test_failing_initializer_rolls_back_earlier_ones() {
    let catalog = StaticCatalog::new()
        .with_initializer(fixtures::index_initializer())
        .with_initializer(RouteInitializer::new(
            "Test",
            "clash",
            |table: &mut dyn RouteRegistry| {
                table.map_route("index", "elsewhere", Default::default())
            },
        ));
    let mut table = RouteTable::new();
    let err = RouteTableCompiler::new(catalog)
        .compile_all(&mut table)
        .unwrap_err();
    match err {
        CompileError::InitializerFailed { initializer, .. } => assert_eq!(initializer, "clash"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(table.is_empty());
}
