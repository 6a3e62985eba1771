// crates/localekit-core/tests/catalog.rs
// ============================================================================
// Module: Catalog Tests
// Description: Exercises catalog loading, lookup, mutation, and persistence.
// Purpose: Ensure key-order stability, strict lookup, and fail-closed writes.
// Dependencies: localekit-core, serde_json, tempfile
// ============================================================================

//! Catalog behavior tests covering load/save round trips, dotted-path
//! lookup semantics, and mutation fail-closed rules.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use localekit_core::Catalog;
use localekit_core::CatalogError;
use localekit_core::NodeError;
use localekit_core::SetOutcome;
use localekit_core::strip_bom;

// ============================================================================
// SECTION: Helpers
// ============================================================================

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Parses catalog text with a synthetic path for error reporting.
fn parse(text: &str) -> Result<Catalog, CatalogError> {
    Catalog::parse(text, Path::new("test.json"))
}

const SAMPLE: &str = r#"{
  "detail_hub": {
    "tabs": {
      "overview": "Overview",
      "history": "History"
    },
    "title": "Vehicle details"
  },
  "common": {
    "save": "Save"
  }
}"#;

// ============================================================================
// SECTION: Parse and Shape Tests
// ============================================================================

/// Confirms a nested catalog parses and counts leaves.
#[test]
fn parse_counts_leaves() -> TestResult {
    let catalog = parse(SAMPLE)?;
    assert_eq!(catalog.leaf_count(), 4);
    Ok(())
}

/// Confirms a non-object root is rejected.
#[test]
fn parse_rejects_non_object_root() {
    let result = parse(r#"["a", "b"]"#);
    assert!(matches!(result, Err(CatalogError::RootNotObject { .. })));
}

/// Confirms non-string leaves are rejected with the offending dotted path.
#[test]
fn parse_rejects_numeric_leaf_with_path() {
    let result = parse(r#"{"a": {"b": 3}}"#);
    match result {
        Err(CatalogError::Shape {
            source: NodeError::InvalidValue {
                path,
                found,
            },
            ..
        }) => {
            assert_eq!(path, "a.b");
            assert_eq!(found, "number");
        }
        other => panic!("expected shape error, got {other:?}"),
    }
}

/// Confirms malformed JSON surfaces as a parse error.
#[test]
fn parse_rejects_malformed_json() {
    let result = parse(r#"{"a": "#);
    assert!(matches!(result, Err(CatalogError::Parse { .. })));
}

// ============================================================================
// SECTION: BOM Tests
// ============================================================================

/// Confirms a single leading byte-order mark is stripped and the strip is
/// idempotent.
#[test]
fn strip_bom_is_idempotent() {
    let text = "\u{feff}{\"a\": \"b\"}";
    let once = strip_bom(text);
    assert_eq!(once, "{\"a\": \"b\"}");
    assert_eq!(strip_bom(once), once);
}

/// Confirms loading a BOM-prefixed file succeeds.
#[test]
fn load_accepts_bom_prefixed_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bom.json");
    fs::write(&path, "\u{feff}{\"greeting\": \"hola\"}")?;
    let catalog = Catalog::load(&path)?;
    assert_eq!(catalog.lookup("greeting"), Some("hola"));
    Ok(())
}

/// Confirms a missing file maps to the dedicated missing variant.
#[test]
fn load_missing_file_is_distinguished() {
    let result = Catalog::load(Path::new("/nonexistent/locale/xx.json"));
    assert!(matches!(result, Err(CatalogError::Missing { .. })));
}

// ============================================================================
// SECTION: Lookup Tests
// ============================================================================

/// Confirms lookup requires subtrees at intermediates and a leaf at the end.
#[test]
fn lookup_is_strict_about_shapes() -> TestResult {
    let catalog = parse(SAMPLE)?;
    assert_eq!(catalog.lookup("detail_hub.tabs.overview"), Some("Overview"));
    assert_eq!(catalog.lookup("common.save"), Some("Save"));
    // Final segment resolves to a subtree: absent.
    assert_eq!(catalog.lookup("detail_hub.tabs"), None);
    // Intermediate segment resolves to a leaf: absent.
    assert_eq!(catalog.lookup("detail_hub.title.extra"), None);
    // Missing segment: absent.
    assert_eq!(catalog.lookup("detail_hub.tabs.pricing"), None);
    // Invalid paths are absent, never an error.
    assert_eq!(catalog.lookup(""), None);
    assert_eq!(catalog.lookup("a..b"), None);
    Ok(())
}

// ============================================================================
// SECTION: Mutation Tests
// ============================================================================

/// Confirms set-leaf creates intermediate subtrees on an empty catalog.
#[test]
fn set_leaf_creates_nested_structure() -> TestResult {
    let mut catalog = Catalog::new();
    let outcome = catalog.set_leaf("reports.header.title", "Reports")?;
    assert_eq!(outcome, SetOutcome::Inserted);
    assert_eq!(catalog.lookup("reports.header.title"), Some("Reports"));
    Ok(())
}

/// Confirms set-leaf distinguishes insert, update, and no-op.
#[test]
fn set_leaf_reports_outcome() -> TestResult {
    let mut catalog = Catalog::new();
    assert_eq!(catalog.set_leaf("a.b", "one")?, SetOutcome::Inserted);
    assert_eq!(catalog.set_leaf("a.b", "one")?, SetOutcome::Unchanged);
    assert_eq!(catalog.set_leaf("a.b", "two")?, SetOutcome::Updated);
    Ok(())
}

/// Confirms an intermediate leaf blocks set-leaf.
#[test]
fn set_leaf_rejects_leaf_obstruction() -> TestResult {
    let mut catalog = parse(r#"{"a": {"b": "leaf"}}"#)?;
    let result = catalog.set_leaf("a.b.c", "value");
    assert!(matches!(result, Err(NodeError::LeafObstruction { .. })));
    // Nothing was written through the obstruction.
    assert_eq!(catalog.lookup("a.b"), Some("leaf"));
    Ok(())
}

/// Confirms an existing subtree blocks a leaf write at the same path.
#[test]
fn set_leaf_rejects_subtree_obstruction() -> TestResult {
    let mut catalog = parse(SAMPLE)?;
    let result = catalog.set_leaf("detail_hub.tabs", "flattened");
    assert!(matches!(result, Err(NodeError::SubtreeObstruction { .. })));
    Ok(())
}

/// Confirms delete removes the node and errors on absent paths.
#[test]
fn delete_removes_and_errors_on_missing() -> TestResult {
    let mut catalog = parse(SAMPLE)?;
    catalog.delete("detail_hub.tabs.history")?;
    assert_eq!(catalog.lookup("detail_hub.tabs.history"), None);
    assert_eq!(catalog.lookup("detail_hub.tabs.overview"), Some("Overview"));
    let result = catalog.delete("detail_hub.tabs.history");
    assert!(matches!(result, Err(NodeError::NotFound { .. })));
    Ok(())
}

/// Confirms subtree replacement is wholesale, not element-wise.
#[test]
fn replace_subtree_discards_existing_children() -> TestResult {
    let source = parse(r#"{"tabs": {"overview": "Resumen"}}"#)?;
    let mut target = parse(SAMPLE)?;
    let subtree = source.subtree_at("tabs")?.clone();
    target.replace_subtree("detail_hub.tabs", subtree)?;
    assert_eq!(target.lookup("detail_hub.tabs.overview"), Some("Resumen"));
    // The old sibling key inside the replaced subtree is gone.
    assert_eq!(target.lookup("detail_hub.tabs.history"), None);
    // Nodes outside the replaced subtree are untouched.
    assert_eq!(target.lookup("detail_hub.title"), Some("Vehicle details"));
    Ok(())
}

// ============================================================================
// SECTION: Order and Persistence Tests
// ============================================================================

/// Confirms save/load round trips preserve insertion order, including
/// appended keys.
#[test]
fn round_trip_preserves_key_order() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("order.json");
    let mut catalog = parse(r#"{"zebra": "z", "alpha": "a", "mid": {"x": "1"}}"#)?;
    catalog.set_leaf("mid.y", "2")?;
    catalog.set_leaf("appended", "last")?;
    catalog.save(&path)?;
    let reloaded = Catalog::load(&path)?;
    let keys: Vec<&String> = reloaded.entries().keys().collect();
    assert_eq!(keys, ["zebra", "alpha", "mid", "appended"]);
    assert_eq!(reloaded, catalog);
    Ok(())
}

/// Confirms rendered output carries a trailing newline and re-parses.
#[test]
fn render_ends_with_newline() -> TestResult {
    let catalog = parse(r#"{"a": "b"}"#)?;
    let text = catalog.render(Path::new("render.json"))?;
    assert!(text.ends_with('\n'));
    let reparsed = Catalog::parse(&text, Path::new("render.json"))?;
    assert_eq!(reparsed, catalog);
    Ok(())
}

/// Confirms an oversized catalog is rejected before reading.
#[test]
fn load_rejects_oversized_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("big.json");
    let file = fs::File::create(&path)?;
    file.set_len(localekit_core::MAX_CATALOG_BYTES + 1)?;
    drop(file);
    let result = Catalog::load(&path);
    assert!(matches!(result, Err(CatalogError::TooLarge { .. })));
    Ok(())
}

/// Confirms non-UTF-8 bytes are rejected with the encoding variant.
#[test]
fn load_rejects_invalid_utf8() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("latin1.json");
    fs::write(&path, [0x7b, 0x22, 0xe9, 0x22, 0x3a, 0x20, 0x22, 0x22, 0x7d])?;
    let result = Catalog::load(&path);
    assert!(matches!(result, Err(CatalogError::NotUtf8 { .. })));
    Ok(())
}
