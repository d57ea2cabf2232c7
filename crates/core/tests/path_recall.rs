//! Path store recall integration tests.
//!
//! These tests verify the persistent path cache around the router:
//! - Warm recalls skip the search and execute fewer convert calls
//! - Stale entries are evicted and the request falls through to search
//! - Corrupt store files are tolerated
//! - Advanced-mode keys pin the producing handler

use std::sync::Arc;

use tempfile::TempDir;

use convoy_core::{
    route_key,
    testing::{fixtures, MockHandler},
    ConversionOption, ConversionRouter, ConvertRequest, FileData, FormatCache, FormatRegistry,
    Handler, JsonPathStore, NoopProgress, PathStore, RouteOutcome, RouterConfig,
};

struct TestHarness {
    registry: Arc<FormatRegistry>,
    store: Arc<JsonPathStore>,
    router: ConversionRouter,
    temp_dir: TempDir,
}

impl TestHarness {
    async fn new(handlers: Vec<Arc<dyn Handler>>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let mut cache = FormatCache::load(&temp_dir.path().join("formats.json"));
        let registry = Arc::new(FormatRegistry::build(handlers, &mut cache).await);
        let store = Arc::new(JsonPathStore::open(temp_dir.path().join("paths.json")));
        let router = ConversionRouter::new(
            Arc::clone(&registry),
            Arc::clone(&store) as Arc<dyn PathStore>,
            RouterConfig::default(),
        );

        Self {
            registry,
            store,
            router,
            temp_dir,
        }
    }

    fn option(&self, handler: &str, code: &str) -> ConversionOption {
        self.registry
            .options()
            .iter()
            .find(|o| o.handler_name() == handler && o.format.format == code)
            .unwrap_or_else(|| panic!("no option {handler}/{code}"))
            .clone()
    }

    async fn convert(
        &self,
        input: ConversionOption,
        output: ConversionOption,
        simple_mode: bool,
    ) -> RouteOutcome {
        self.router
            .convert(
                ConvertRequest {
                    files: vec![FileData::new("in.bin", b"payload".to_vec())],
                    input,
                    output,
                    simple_mode,
                },
                &NoopProgress,
            )
            .await
            .expect("router failed")
    }

    /// Raw key set of the persisted store file.
    fn stored_keys(&self) -> Vec<String> {
        let raw = std::fs::read_to_string(self.temp_dir.path().join("paths.json"))
            .unwrap_or_else(|_| "{}".to_string());
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[tokio::test]
async fn test_warm_recall_executes_fewer_converts() {
    let vector = Arc::new(MockHandler::new("rasteriser").with_formats(vec![
        fixtures::read_only("svg", "image/svg+xml"),
        fixtures::write_only("png", "image/png"),
    ]));
    let flaky = Arc::new(MockHandler::new("flaky").with_formats(vec![
        fixtures::read_only("png", "image/png"),
        fixtures::write_only("pdf", "application/pdf"),
    ]));
    flaky.fail_conversion("image/png", "application/pdf");
    let solid = Arc::new(MockHandler::new("solid").with_formats(vec![
        fixtures::read_only("png", "image/png"),
        fixtures::write_only("pdf", "application/pdf"),
    ]));

    let harness = TestHarness::new(vec![vector.clone() as Arc<dyn Handler>, flaky.clone(), solid.clone()]).await;
    let input = harness.option("rasteriser", "svg");
    let output = harness.option("solid", "pdf");

    // Cold: the search burns converts on the failing candidate.
    let outcome = harness.convert(input.clone(), output.clone(), true).await;
    assert!(matches!(outcome, RouteOutcome::Converted { .. }));
    let cold_converts =
        vector.conversion_count() + flaky.conversion_count() + solid.conversion_count();
    assert_eq!(cold_converts, 3);

    vector.clear_recorded();
    flaky.clear_recorded();
    solid.clear_recorded();

    // Warm: the stored chain replays without searching.
    let outcome = harness.convert(input, output, true).await;
    assert!(matches!(outcome, RouteOutcome::Converted { .. }));
    let warm_converts =
        vector.conversion_count() + flaky.conversion_count() + solid.conversion_count();
    assert_eq!(warm_converts, 2);
    assert_eq!(flaky.conversion_count(), 0);
    assert!(warm_converts < cold_converts);
}

#[tokio::test]
async fn test_stale_recall_evicts_and_researches() {
    let images = Arc::new(MockHandler::new("images").with_formats(vec![
        fixtures::format("png", "image/png"),
        fixtures::format("jpeg", "image/jpeg"),
    ]));
    let harness = TestHarness::new(vec![images.clone() as Arc<dyn Handler>]).await;
    let input = harness.option("images", "png");
    let output = harness.option("images", "jpeg");

    let outcome = harness.convert(input.clone(), output.clone(), true).await;
    assert!(matches!(outcome, RouteOutcome::Converted { .. }));
    assert_eq!(harness.store.len(), 1);
    images.clear_recorded();

    // The stored chain fails once on replay, gets evicted, and the fresh
    // search finds the same route again.
    images.fail_next_convert();
    let outcome = harness.convert(input, output, true).await;
    assert!(matches!(outcome, RouteOutcome::Converted { .. }));

    let recorded = images.recorded_conversions();
    assert_eq!(recorded.len(), 2);
    assert!(!recorded[0].success);
    assert!(recorded[1].success);
    assert_eq!(harness.store.len(), 1);
}

#[tokio::test]
async fn test_stale_recall_with_no_remaining_route() {
    let images = Arc::new(MockHandler::new("images").with_formats(vec![
        fixtures::format("png", "image/png"),
        fixtures::format("jpeg", "image/jpeg"),
    ]));
    let harness = TestHarness::new(vec![images.clone() as Arc<dyn Handler>]).await;
    let input = harness.option("images", "png");
    let output = harness.option("images", "jpeg");

    let outcome = harness.convert(input.clone(), output.clone(), true).await;
    assert!(matches!(outcome, RouteOutcome::Converted { .. }));

    // Now the only hop fails permanently: replay evicts, search fails.
    images.fail_conversion("image/png", "image/jpeg");
    let outcome = harness.convert(input, output, true).await;
    assert!(matches!(outcome, RouteOutcome::NoRoute));
    assert!(harness.store.is_empty());
}

#[tokio::test]
async fn test_corrupt_store_file_is_tolerated() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("paths.json");
    std::fs::write(&store_path, "{definitely not json").unwrap();

    let images = Arc::new(MockHandler::new("images").with_formats(vec![
        fixtures::format("png", "image/png"),
        fixtures::format("jpeg", "image/jpeg"),
    ]));
    let mut cache = FormatCache::new();
    let registry = Arc::new(FormatRegistry::build(vec![images as Arc<dyn Handler>], &mut cache).await);
    let store = Arc::new(JsonPathStore::open(&store_path));
    assert!(store.is_empty());

    let router = ConversionRouter::new(
        Arc::clone(&registry),
        Arc::clone(&store) as Arc<dyn PathStore>,
        RouterConfig::default(),
    );

    let input = registry
        .resolve("images", "image/png", "png")
        .unwrap()
        .clone();
    let output = registry
        .resolve("images", "image/jpeg", "jpeg")
        .unwrap()
        .clone();

    let outcome = router
        .convert(
            ConvertRequest {
                files: vec![FileData::new("in.png", b"payload".to_vec())],
                input,
                output,
                simple_mode: true,
            },
            &NoopProgress,
        )
        .await
        .unwrap();

    assert!(matches!(outcome, RouteOutcome::Converted { .. }));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_simple_and_advanced_keys_are_distinct() {
    let images = Arc::new(MockHandler::new("images").with_formats(vec![
        fixtures::format("png", "image/png"),
        fixtures::format("jpeg", "image/jpeg"),
    ]));
    let harness = TestHarness::new(vec![images as Arc<dyn Handler>]).await;
    let input = harness.option("images", "png");
    let output = harness.option("images", "jpeg");

    harness.convert(input.clone(), output.clone(), true).await;
    harness.convert(input, output, false).await;

    let mut keys = harness.stored_keys();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            route_key("image/png", "image/jpeg", None),
            route_key("image/png", "image/jpeg", Some("images")),
        ]
    );
}
