use http::Method;
use std::time::Duration;
use waymark::catalog::ConstraintRegistry;
use waymark::hot_reload::{shared_table, watch_catalog};
use waymark::CompilerConfig;

mod common;
use common::temp_files;

const CATALOG_V1: &str = r#"
owners:
  - name: Test
    handlers:
      - name: One
        markers:
          - { kind: route, url: "foo" }
"#;

const CATALOG_V2: &str = r#"
owners:
  - name: Test
    handlers:
      - name: Two
        markers:
          - { kind: route, url: "foo" }
"#;

const CATALOG_BROKEN: &str = r#"
owners:
  - name: Test
    handlers:
      - name: Broken
        markers:
          - { kind: route, url: "a" }
          - { kind: route, url: "b" }
"#;

fn matched_name(shared: &waymark::hot_reload::SharedRouteTable) -> Option<String> {
    shared
        .load()
        .route(&Method::GET, "/foo")
        .map(|m| m.entry.name.clone())
}

fn wait_for(shared: &waymark::hot_reload::SharedRouteTable, expected: &str) -> bool {
    for _ in 0..40 {
        if matched_name(shared).as_deref() == Some(expected) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

#[test]
fn test_watch_catalog_reload() {
    let path = temp_files::create_temp_yaml(CATALOG_V1);
    let shared = shared_table();

    let watcher = watch_catalog(
        &path,
        shared.clone(),
        CompilerConfig::default(),
        ConstraintRegistry::new(),
    )
    .expect("watch_catalog");
    assert_eq!(matched_name(&shared).as_deref(), Some("Get.Test.One"));

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(&path, CATALOG_V2).unwrap();
    assert!(wait_for(&shared, "Get.Test.Two"));

    // a broken catalog keeps the previous table
    std::fs::write(&path, CATALOG_BROKEN).unwrap();
    std::thread::sleep(Duration::from_millis(300));
    assert_eq!(matched_name(&shared).as_deref(), Some("Get.Test.Two"));

    drop(watcher);
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_watch_catalog_requires_valid_initial_load() {
    let path = temp_files::create_temp_yaml(CATALOG_BROKEN);
    let shared = shared_table();
    let result = watch_catalog(
        &path,
        shared.clone(),
        CompilerConfig::default(),
        ConstraintRegistry::new(),
    );
    assert!(result.is_err());
    assert!(shared.load().entries().next().is_none());
    temp_files::cleanup_temp_files(&[path]);
}
