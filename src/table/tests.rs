use super::pattern::UrlPattern;
use super::*;
use crate::error::TableError;
use http::Method;

fn get_only() -> Constraint {
    Constraint::Methods(vec!["GET".into()])
}

#[test]
fn test_root_pattern() {
    let pattern = UrlPattern::parse("/").unwrap();
    assert!(pattern.matches("", &RouteValues::new()).is_some());
    assert!(pattern.matches("x", &RouteValues::new()).is_none());
}

#[test]
fn test_parameterized_pattern() {
    let pattern = UrlPattern::parse("items/{id}").unwrap();
    let values = pattern.matches("items/123", &RouteValues::new()).unwrap();
    assert_eq!(values.get("id"), Some(&RouteValue::from("123")));
    assert!(pattern.has_param("ID"));
}

#[test]
fn test_literals_ignore_case() {
    let pattern = UrlPattern::parse("Account/LogOn").unwrap();
    assert!(pattern.matches("account/logon", &RouteValues::new()).is_some());
}

#[test]
fn test_invalid_patterns_are_rejected() {
    for bad in ["a/{}", "a/{b", "a/x{b}", "{*rest}/a", "a//b", "{id}/{ID}"] {
        assert!(UrlPattern::parse(bad).is_err(), "expected '{bad}' to be rejected");
    }
}

#[test]
fn test_missing_segment_without_default_does_not_match() {
    let pattern = UrlPattern::parse("test/some-defaults/{p1}/{p2}").unwrap();
    let defaults: RouteValues = [("p2", RouteValue::from(42))].into_iter().collect();
    assert!(pattern.matches("test/some-defaults", &defaults).is_none());
    let values = pattern.matches("test/some-defaults/blah", &defaults).unwrap();
    assert_eq!(values.get("p1"), Some(&RouteValue::from("blah")));
    assert_eq!(values.get("p2"), Some(&RouteValue::from(42)));
}

#[test]
fn test_catch_all_captures_rest() {
    let pattern = UrlPattern::parse("files/{*path}").unwrap();
    let values = pattern.matches("files/a/b/c.txt", &RouteValues::new()).unwrap();
    assert_eq!(values.get("path"), Some(&RouteValue::from("a/b/c.txt")));
    let empty = pattern.matches("files", &RouteValues::new()).unwrap();
    assert_eq!(empty.get("path"), Some(&RouteValue::Optional));
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut table = RouteTable::new();
    table.register(RouteEntry::new("a", "x")).unwrap();
    let err = table.register(RouteEntry::new("a", "y")).unwrap_err();
    assert!(matches!(err, TableError::DuplicateName { name } if name == "a"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_names_ignore_case() {
    let mut table = RouteTable::new();
    table.register(RouteEntry::new("index", "x")).unwrap();
    let err = table.register(RouteEntry::new("Index", "y")).unwrap_err();
    assert!(matches!(err, TableError::DuplicateName { name } if name == "Index"));
    assert_eq!(table.lookup("INDEX").map(|e| e.name.as_str()), Some("index"));
    assert!(table.contains_name("iNdEx"));

    table.rollback_to(0);
    assert!(!table.contains_name("index"));
    table.register(RouteEntry::new("INDEX", "z")).unwrap();
}

#[test]
fn test_invalid_regex_is_rejected_at_registration() {
    let mut table = RouteTable::new();
    let err = table
        .register(RouteEntry::new("a", "x/{id}").with_constraint("id", Constraint::pattern("(")))
        .unwrap_err();
    assert!(matches!(err, TableError::InvalidConstraint { .. }));
    assert!(table.is_empty());
    assert!(table.lookup("a").is_none());
}

#[test]
fn test_first_registered_route_wins() {
    let mut table = RouteTable::new();
    table
        .register(RouteEntry::new("first", "pets/{id}").with_default("which", "first"))
        .unwrap();
    table
        .register(RouteEntry::new("second", "pets/{name}").with_default("which", "second"))
        .unwrap();
    let matched = table.route(&Method::GET, "pets/7").unwrap();
    assert_eq!(matched.entry.name, "first");
}

#[test]
fn test_method_constraint_filters_requests() {
    let mut table = RouteTable::new();
    table
        .register(RouteEntry::new("r", "test/basic").with_constraint("verb", get_only()))
        .unwrap();
    assert!(table.route(&Method::GET, "test/basic").is_some());
    assert!(table.route(&Method::PUT, "test/basic").is_none());
}

#[test]
fn test_pattern_constraint_on_parameter() {
    let mut table = RouteTable::new();
    table
        .register(
            RouteEntry::new("c", "test/with-constraint/{p1}/{p2}")
                .with_constraint("p2", Constraint::pattern(r"\d+")),
        )
        .unwrap();
    assert!(table.route(&Method::GET, "test/with-constraint/blah/11").is_some());
    assert!(table.route(&Method::GET, "test/with-constraint/blah/1a").is_none());
}

#[test]
fn test_pattern_constraint_skips_absent_optional() {
    let mut table = RouteTable::new();
    table
        .register(
            RouteEntry::new("o", "test/{p1}/{p2}")
                .with_optional("p2")
                .with_constraint("p2", Constraint::pattern(r"\d+")),
        )
        .unwrap();
    let matched = table.route(&Method::GET, "test/blah").unwrap();
    assert_eq!(matched.value("p2"), Some(&RouteValue::Optional));
    assert!(table.route(&Method::GET, "test/blah/x").is_none());
}

#[test]
fn test_whole_route_pattern_constraint() {
    let mut table = RouteTable::new();
    table
        .register(
            RouteEntry::new("w", "docs/{page}").with_constraint("scope", Constraint::pattern("docs/intro")),
        )
        .unwrap();
    assert!(table.route(&Method::GET, "/docs/intro").is_some());
    assert!(table.route(&Method::GET, "/docs/other").is_none());
}

#[test]
fn test_pattern_constraint_on_route_value() {
    let mut table = RouteTable::new();
    table
        .register(
            RouteEntry::new("home", "home/{page}")
                .with_default("owner", "Home")
                .with_constraint("owner", Constraint::pattern("home")),
        )
        .unwrap();
    table
        .register(
            RouteEntry::new("admin", "admin/{page}")
                .with_default("owner", "Admin")
                .with_constraint("owner", Constraint::pattern("home")),
        )
        .unwrap();
    // checked against the value, not the request path
    assert!(table.route(&Method::GET, "/home/about").is_some());
    assert!(table.route(&Method::GET, "/admin/home").is_none());
}

struct TenantIs(&'static str);

impl RouteConstraint for TenantIs {
    fn name(&self) -> &str {
        "tenant_is"
    }

    fn matches(&self, _request: &RouteRequest<'_>, parameter: &str, values: &RouteValues) -> bool {
        values
            .get(parameter)
            .and_then(RouteValue::as_text)
            .is_some_and(|t| t == self.0)
    }
}

#[test]
fn test_custom_constraint_is_consulted() {
    let mut table = RouteTable::new();
    table
        .register(
            RouteEntry::new("t", "{tenant}/home").with_constraint("tenant", Constraint::custom(TenantIs("acme"))),
        )
        .unwrap();
    assert!(table.route(&Method::GET, "acme/home").is_some());
    assert!(table.route(&Method::GET, "other/home").is_none());
}

#[test]
fn test_rollback_drops_names() {
    let mut table = RouteTable::new();
    table.register(RouteEntry::new("keep", "a")).unwrap();
    table.register(RouteEntry::new("drop", "b")).unwrap();
    table.rollback_to(1);
    assert_eq!(table.len(), 1);
    assert!(table.contains_name("keep"));
    assert!(!table.contains_name("drop"));
    table.register(RouteEntry::new("drop", "b")).unwrap();
    assert_eq!(table.entries_from(1)[0].name, "drop");
}

#[test]
fn test_map_route_registers_defaults() {
    let mut table = RouteTable::new();
    let defaults: RouteValues = [("p1", RouteValue::from("blah")), ("p2", RouteValue::Optional)]
        .into_iter()
        .collect();
    table.map_route("index", "test/index/{p1}/{p2}", defaults).unwrap();
    let matched = table.route(&Method::GET, "test/index").unwrap();
    assert_eq!(matched.text("p1").as_deref(), Some("blah"));
    assert_eq!(matched.value("p2"), Some(&RouteValue::Optional));
}
