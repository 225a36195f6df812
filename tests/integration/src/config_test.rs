//! End-to-end configuration resolution against checked-in fixture projects.
//!
//! The fixture projects under test-fixtures/projects/ model the three
//! manifest shapes a transform meets in the wild: inline configuration,
//! file indirection, and a vendored project shadowing an outer one.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use xform_config::{ConfigData, ConfigResolver, ConfigureOptions};

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir
        .join("../../test-fixtures")
        .canonicalize()
        .expect("test-fixtures directory should exist")
}

fn project_dir(name: &str) -> PathBuf {
    fixtures_dir().join("projects").join(name)
}

// ==========================================================================
// Inline configuration
// ==========================================================================

#[test]
fn test_inline_fixture_loads_inline_config() {
    let project = project_dir("inline");
    let resolver = ConfigResolver::new("inlinify");

    let data = resolver.load(project.join("src/index.js")).unwrap();
    assert_eq!(
        data.config,
        Some(json!({"extensions": [".txt", ".md"], "mode": "fast"}))
    );
    assert_eq!(data.config_dir.as_deref(), Some(project.as_path()));
    assert_eq!(data.config_file, None);
}

#[test]
fn test_unnamed_transform_gets_no_config_but_keeps_the_dir() {
    let project = project_dir("inline");
    let resolver = ConfigResolver::new("some-other-transform");

    let data = resolver.load(project.join("src/index.js")).unwrap();
    assert_eq!(data.config, None);
    assert_eq!(data.config_dir.as_deref(), Some(project.as_path()));
}

#[test]
fn test_typed_config_deserializes_fixture_config() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct InlinifyOptions {
        extensions: Vec<String>,
        mode: String,
    }

    let project = project_dir("inline");
    let data = ConfigResolver::new("inlinify")
        .load(project.join("src/index.js"))
        .unwrap();

    let options: Option<InlinifyOptions> = data.typed_config().unwrap();
    assert_eq!(
        options,
        Some(InlinifyOptions {
            extensions: vec![".txt".to_string(), ".md".to_string()],
            mode: "fast".to_string(),
        })
    );
}

// ==========================================================================
// File indirection
// ==========================================================================

#[test]
fn test_indirect_fixture_config_dir_follows_the_file() {
    let project = project_dir("indirect");
    let resolver = ConfigResolver::new("unbundle");

    let data = resolver.load(project.join("lib/nested/entry.js")).unwrap();
    assert_eq!(
        data.config,
        Some(json!({"mode": "strict", "aliases": {"app": "../lib"}}))
    );
    assert_eq!(
        data.config_dir.as_deref(),
        Some(project.join("config").as_path())
    );
    assert_eq!(
        data.config_file.as_deref(),
        Some(project.join("config/unbundle.json").as_path())
    );
}

// ==========================================================================
// Discovery
// ==========================================================================

#[test]
fn test_nearest_manifest_shadows_the_outer_one() {
    let project = project_dir("nested");

    let vendored = ConfigResolver::new("inlinify")
        .load(project.join("vendor/mod.js"))
        .unwrap();
    assert_eq!(vendored.config, Some(json!({"mode": "vendored"})));
    assert_eq!(
        vendored.config_dir.as_deref(),
        Some(project.join("vendor").as_path())
    );

    let outer = ConfigResolver::new("inlinify")
        .load(project.join("src/deep/main.js"))
        .unwrap();
    assert_eq!(outer.config, Some(json!({"mode": "outer"})));
    assert_eq!(outer.config_dir.as_deref(), Some(project.as_path()));
}

#[test]
fn test_no_manifest_anywhere_is_not_an_error() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("orphan.js");
    fs::write(&file, "").unwrap();

    let resolver =
        ConfigResolver::new("inlinify").with_manifest_name("definitely-absent-manifest.json");
    let data = resolver.load(&file).unwrap();
    assert_eq!(data, ConfigData::default());
}

#[test]
fn test_repeated_loads_yield_equal_data() {
    let project = project_dir("indirect");
    let resolver = ConfigResolver::new("unbundle");
    let file = project.join("lib/nested/entry.js");

    let first = resolver.load(&file).unwrap();
    let second = resolver.load(&file).unwrap();
    assert_eq!(first, second);
}

// ==========================================================================
// Supplied configuration
// ==========================================================================

#[test]
fn test_configure_overrides_fixture_config_without_touching_it() {
    let project = project_dir("inline");
    let file = project.join("src/index.js");
    let original = ConfigResolver::new("inlinify");

    let configured = original.configure(
        json!({"mode": "handmade"}),
        ConfigureOptions {
            config_dir: Some(project.clone()),
            ..Default::default()
        },
    );

    let overridden = configured.load(&file).unwrap();
    assert_eq!(overridden.config, Some(json!({"mode": "handmade"})));
    assert_eq!(overridden.config_dir.as_deref(), Some(project.as_path()));

    // The original keeps reading the manifest.
    let from_manifest = original.load(&file).unwrap();
    assert_eq!(
        from_manifest.config,
        Some(json!({"extensions": [".txt", ".md"], "mode": "fast"}))
    );
}

#[test]
fn test_set_config_applies_to_later_loads() {
    let project = project_dir("inline");
    let file = project.join("src/index.js");
    let mut resolver = ConfigResolver::new("inlinify");

    let before = resolver.load(&file).unwrap();
    assert_eq!(
        before.config,
        Some(json!({"extensions": [".txt", ".md"], "mode": "fast"}))
    );

    resolver.set_config(json!({"mode": "pinned"}), ConfigureOptions::default());
    let after = resolver.load(&file).unwrap();
    assert_eq!(after.config, Some(json!({"mode": "pinned"})));
}

// ==========================================================================
// Async parity
// ==========================================================================

#[tokio::test]
async fn test_async_loads_match_sync_loads_across_fixtures() {
    for (transform, file) in [
        ("inlinify", project_dir("inline").join("src/index.js")),
        ("unbundle", project_dir("indirect").join("lib/nested/entry.js")),
        ("inlinify", project_dir("nested").join("vendor/mod.js")),
    ] {
        let resolver = ConfigResolver::new(transform);
        let sync = resolver.load(&file).unwrap();
        let async_ = resolver.load_async(&file).await.unwrap();
        assert_eq!(sync, async_, "sync/async divergence for {transform}");
    }
}
