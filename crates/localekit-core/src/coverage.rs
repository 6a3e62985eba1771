// crates/localekit-core/src/coverage.rs
// ============================================================================
// Module: Coverage Diffing
// Description: Per-locale missing-key computation and coverage reporting.
// Purpose: Tell operators which used keys each locale fails to translate.
// Dependencies: localekit-core catalog and extract modules
// ============================================================================

//! ## Overview
//! Coverage diffing compares the key references extracted from the source
//! tree against one locale's [`Catalog`]. A key counts as covered only when
//! [`Catalog::lookup`] resolves it to a leaf; every other outcome is missing.
//!
//! ## Invariants
//! - Reports are deterministic: missing keys are sorted, and per-file counts
//!   are ordered by count descending then path ascending.
//! - A locale with no catalog file reports zero coverage rather than failing
//!   the audit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::extract::ScanResult;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Missing-key count for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMissing {
    /// The source file referencing missing keys.
    pub file: PathBuf,
    /// How many of its referenced keys are missing in this locale.
    pub missing: usize,
}

/// Coverage report for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    /// The locale name this report covers.
    pub locale: String,
    /// Whether the locale's catalog file was present and parseable.
    pub catalog_present: bool,
    /// Total distinct keys referenced by the source tree.
    pub used: usize,
    /// Used keys with no corresponding catalog leaf, sorted.
    pub missing: BTreeSet<String>,
    /// Coverage percentage, rounded to one decimal.
    pub coverage: f64,
    /// Per-source-file missing-key counts, worst offenders first.
    pub file_missing: Vec<FileMissing>,
}

// ============================================================================
// SECTION: Diffing
// ============================================================================

/// Computes the coverage report for one locale.
///
/// Pass `None` for `catalog` when the locale's file is missing; every used
/// key then counts as missing and coverage is zero.
#[must_use]
pub fn diff_locale(locale: &str, catalog: Option<&Catalog>, scan: &ScanResult) -> LocaleCoverage {
    let missing: BTreeSet<String> = scan
        .keys
        .iter()
        .filter(|key| catalog.is_none_or(|catalog| catalog.lookup(key).is_none()))
        .cloned()
        .collect();
    let mut file_missing: Vec<FileMissing> = scan
        .by_file
        .iter()
        .filter_map(|(file, keys)| {
            let count = keys.iter().filter(|key| missing.contains(*key)).count();
            (count > 0).then(|| FileMissing {
                file: file.clone(),
                missing: count,
            })
        })
        .collect();
    file_missing.sort_by(|a, b| b.missing.cmp(&a.missing).then_with(|| a.file.cmp(&b.file)));
    LocaleCoverage {
        locale: locale.to_string(),
        catalog_present: catalog.is_some(),
        used: scan.keys.len(),
        coverage: coverage_percent(scan.keys.len(), missing.len()),
        missing,
        file_missing,
    }
}

/// Computes `(used - missing) / used * 100`, rounded to one decimal.
///
/// A scan with no used keys reports full coverage.
#[must_use]
pub fn coverage_percent(used: usize, missing: usize) -> f64 {
    if used == 0 {
        return 100.0;
    }
    #[allow(
        clippy::cast_precision_loss,
        reason = "key counts are far below f64 integer precision"
    )]
    let ratio = (used.saturating_sub(missing)) as f64 / used as f64;
    (ratio * 1000.0).round() / 10.0
}
