// crates/localekit-core/tests/mojibake.rs
// ============================================================================
// Module: Mojibake Tests
// Description: Exercises the double-encoding repair table on text and trees.
// Purpose: Ensure corruption sequences map back correctly and the fix is
//          idempotent on clean text.
// Dependencies: localekit-core
// ============================================================================

//! Mojibake repair tests for the Spanish/Portuguese character repertoire.

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

use std::path::Path;

use localekit_core::Catalog;
use localekit_core::fix_leaves;
use localekit_core::fix_text;

// ============================================================================
// SECTION: Helpers
// ============================================================================

type TestResult = Result<(), Box<dyn std::error::Error>>;

// ============================================================================
// SECTION: Text Tests
// ============================================================================

/// Confirms the common lowercase accent corruptions repair.
#[test]
fn fix_text_repairs_lowercase_accents() {
    let (fixed, replaced) = fix_text("informaci\u{c3}\u{b3}n del veh\u{c3}\u{ad}culo");
    assert_eq!(fixed, "información del vehículo");
    assert_eq!(replaced, 2);
}

/// Confirms uppercase and tilde corruptions repair.
#[test]
fn fix_text_repairs_uppercase_and_tilde() {
    let (fixed, replaced) = fix_text("A\u{c3}\u{2018}O \u{c3}\u{2030}xito");
    assert_eq!(fixed, "AÑO Éxito");
    assert_eq!(replaced, 2);
}

/// Confirms longer punctuation sequences win over their two-character
/// prefixes.
#[test]
fn fix_text_prefers_longest_match() {
    // The right-single-quote corruption starts with bytes that also begin
    // shorter sequences; it must repair as one unit.
    let (fixed, replaced) = fix_text("driver\u{e2}\u{20ac}\u{2122}s license");
    assert_eq!(fixed, "driver\u{2019}s license");
    assert_eq!(replaced, 1);
}

/// Confirms a doubly encoded byte-order mark is dropped entirely.
#[test]
fn fix_text_drops_double_encoded_bom() {
    let (fixed, replaced) = fix_text("\u{ef}\u{bb}\u{bf}hola");
    assert_eq!(fixed, "hola");
    assert_eq!(replaced, 1);
}

/// Confirms already-correct text passes through untouched.
#[test]
fn fix_text_is_noop_on_clean_text() {
    let clean = "información año coração — “quoted” …";
    let (fixed, replaced) = fix_text(clean);
    assert_eq!(fixed, clean);
    assert_eq!(replaced, 0);
}

/// Confirms the fix is idempotent: repairing repaired text changes nothing.
#[test]
fn fix_text_is_idempotent() {
    let corrupted = "informaci\u{c3}\u{b3}n \u{e2}\u{20ac}\u{153}cita\u{e2}\u{20ac}\u{9d}";
    let (once, first) = fix_text(corrupted);
    assert!(first > 0);
    let (twice, second) = fix_text(&once);
    assert_eq!(twice, once);
    assert_eq!(second, 0);
}

// ============================================================================
// SECTION: Tree Tests
// ============================================================================

/// Confirms the leaf-level fix repairs values across a nested catalog and
/// reports the total replacement count.
#[test]
fn fix_leaves_repairs_nested_values() -> TestResult {
    let mut catalog = Catalog::parse(
        "{\"hub\": {\"title\": \"Informaci\u{c3}\u{b3}n\", \"year\": \"A\u{c3}\u{b1}o\"}, \
         \"ok\": \"clean\"}",
        Path::new("es.json"),
    )?;
    let replaced = fix_leaves(&mut catalog);
    assert_eq!(replaced, 2);
    assert_eq!(catalog.lookup("hub.title"), Some("Información"));
    assert_eq!(catalog.lookup("hub.year"), Some("Año"));
    assert_eq!(catalog.lookup("ok"), Some("clean"));
    Ok(())
}
