#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Global counter and lock for thread-safe temporary file creation
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    static TEMP_LOCK: Mutex<()> = Mutex::new(());

    /// Creates a temporary catalog file with a unique name
    pub fn create_temp_catalog(content: &str, ext: &str) -> PathBuf {
        let _lock = TEMP_LOCK.lock().unwrap();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let path = std::env::temp_dir().join(format!(
            "waymark_test_{}_{}_{}.{}",
            std::process::id(),
            counter,
            nanos,
            ext
        ));

        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_catalog(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> PathBuf {
        create_temp_catalog(content, "json")
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

pub mod fixtures {
    use waymark::catalog::{HandlerDescriptor, Marker, RouteDeclaration, RouteInitializer};
    use waymark::table::{RouteRegistry, RouteValue, RouteValues};

    /// `Test.Basic` at `test/basic` with no verb markers.
    pub fn basic() -> HandlerDescriptor {
        HandlerDescriptor::routable("Test", "Basic", RouteDeclaration::new("test/basic")).build()
    }

    /// `Test.AllDefaults` with both parameters defaulted on the declaration.
    pub fn all_defaults() -> HandlerDescriptor {
        HandlerDescriptor::routable(
            "Test",
            "AllDefaults",
            RouteDeclaration::new("test/all-defaults/{p1}/{p2}")
                .with_default("p1", "blank")
                .with_default("p2", 42),
        )
        .build()
    }

    /// Excluded and routable at once; only expressible as a raw marker list.
    pub fn non_action_with_route() -> HandlerDescriptor {
        HandlerDescriptor::from_markers(
            "Test",
            "NonAction",
            vec![
                Marker::NonAction,
                Marker::Route(RouteDeclaration::new("test/nonaction")),
            ],
        )
    }

    /// Registers `index` at `test/index/{p1}/{p2}`.
    pub fn index_initializer() -> RouteInitializer {
        RouteInitializer::new("Test", "init_routes", |table: &mut dyn RouteRegistry| {
            let defaults: RouteValues = [
                ("p1", RouteValue::from("blah")),
                ("p2", RouteValue::Optional),
            ]
            .into_iter()
            .collect();
            table.map_route("index", "test/index/{p1}/{p2}", defaults)
        })
    }
}
