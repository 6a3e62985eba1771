// crates/localekit-core/tests/extract.rs
// ============================================================================
// Module: Extraction Tests
// Description: Exercises call-site pattern matching and source-tree scans.
// Purpose: Ensure key references are found, deduplicated, and deny-listed
//          directories are skipped.
// Dependencies: localekit-core, tempfile
// ============================================================================

//! Key extraction tests for the recognized translate-call shapes and the
//! directory walk.

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

use localekit_core::ExtractError;
use localekit_core::KeyExtractor;
use localekit_core::ScanOptions;

// ============================================================================
// SECTION: Helpers
// ============================================================================

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn extractor() -> KeyExtractor {
    KeyExtractor::new().expect("patterns compile")
}

// ============================================================================
// SECTION: Pattern Tests
// ============================================================================

/// Confirms all four call shapes are recognized in one chunk of text.
#[test]
fn extract_recognizes_all_call_shapes() {
    let text = r#"
        const a = t("detail_hub.tabs.overview");
        const b = t('detail_hub.tabs.history');
        const c = t("scan.results.count", { count: total });
        const d = i18n.t("common.save");
    "#;
    let keys = extractor().extract_from_text(text);
    let expected = [
        "common.save",
        "detail_hub.tabs.history",
        "detail_hub.tabs.overview",
        "scan.results.count",
    ];
    let found: Vec<&str> = keys.iter().map(String::as_str).collect();
    assert_eq!(found, expected);
}

/// Confirms repeated references deduplicate to one key.
#[test]
fn extract_deduplicates_repeats() {
    let text = r#"t("common.save"); t("common.save"); t('common.save')"#;
    let keys = extractor().extract_from_text(text);
    assert_eq!(keys.len(), 1);
}

/// Confirms single-segment keys and deep paths both match.
#[test]
fn extract_accepts_flat_and_deep_keys() {
    let text = r#"t("greeting"); t("a.b.c.d.e_1")"#;
    let keys = extractor().extract_from_text(text);
    assert!(keys.contains("greeting"));
    assert!(keys.contains("a.b.c.d.e_1"));
}

/// Confirms malformed literals do not match.
#[test]
fn extract_skips_malformed_literals() {
    let text = r#"t(".leading.dot"); t("trailing.dot."); t(variable); t("")"#;
    let keys = extractor().extract_from_text(text);
    assert!(keys.is_empty(), "unexpected keys: {keys:?}");
}

// ============================================================================
// SECTION: Scan Tests
// ============================================================================

/// Confirms a tree scan aggregates keys, tracks per-file sets, and skips
/// deny-listed directories and unwanted extensions.
#[test]
fn scan_walks_tree_with_exclusions() -> TestResult {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    fs::create_dir_all(root.join("src/components"))?;
    fs::create_dir_all(root.join("node_modules/lib"))?;
    fs::write(root.join("src/app.js"), r#"t("app.title")"#)?;
    fs::write(
        root.join("src/components/hub.vue"),
        r#"{{ t("detail_hub.title") }} {{ t("app.title") }}"#,
    )?;
    fs::write(root.join("node_modules/lib/ignored.js"), r#"t("vendor.key")"#)?;
    fs::write(root.join("src/readme.md"), r#"t("docs.key")"#)?;

    let options = ScanOptions::new(root, vec!["js".to_string(), "vue".to_string()]);
    let result = extractor().scan(&options)?;

    assert_eq!(result.files_scanned, 2);
    let found: Vec<&str> = result.keys.iter().map(String::as_str).collect();
    assert_eq!(found, ["app.title", "detail_hub.title"]);
    assert_eq!(result.by_file.len(), 2);
    assert!(result.warnings.is_empty());
    Ok(())
}

/// Confirms an unreadable file is a warning, not a scan failure.
#[test]
fn scan_reports_non_utf8_file_as_warning() -> TestResult {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    fs::write(root.join("good.js"), r#"t("app.title")"#)?;
    fs::write(root.join("bad.js"), [0xff, 0xfe, 0x00])?;

    let options = ScanOptions::new(root, vec!["js".to_string()]);
    let result = extractor().scan(&options)?;

    assert!(result.keys.contains("app.title"));
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].file.ends_with("bad.js"));
    Ok(())
}

/// Confirms a missing root directory fails the scan up front.
#[test]
fn scan_rejects_missing_root() {
    let options =
        ScanOptions::new("/nonexistent/source/tree", vec!["js".to_string()]);
    let result = extractor().scan(&options);
    assert!(matches!(result, Err(ExtractError::RootMissing { .. })));
}
