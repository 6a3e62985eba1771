// crates/localekit-core/src/lib.rs
// ============================================================================
// Module: Localekit Core Library
// Description: Catalog tree model, key extraction, coverage diffing, repairs.
// Purpose: Provide the reusable audit/repair logic shared by all entry points.
// Dependencies: indexmap, regex, serde, serde_json, thiserror, walkdir
// ============================================================================

//! ## Overview
//! Localekit Core models per-locale translation catalogs as ordered trees of
//! [`CatalogNode`] values and provides the operations the maintenance CLI is
//! built from: source scanning for translation-key references, per-locale
//! coverage diffing, and validate-then-write catalog repair batches.
//!
//! ## Invariants
//! - Catalog key order is insertion order, preserved through load and save.
//! - A catalog leaf is always a string; any other JSON value is rejected at
//!   load time with the offending dotted path.
//! - Repair batches never leave a catalog file as invalid JSON: the in-memory
//!   result is validated before a single write is issued.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod coverage;
pub mod extract;
pub mod mojibake;
pub mod node;
pub mod repair;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::CatalogError;
pub use catalog::MAX_CATALOG_BYTES;
pub use catalog::strip_bom;
pub use coverage::FileMissing;
pub use coverage::LocaleCoverage;
pub use coverage::coverage_percent;
pub use coverage::diff_locale;
pub use extract::ExtractError;
pub use extract::KeyExtractor;
pub use extract::ScanOptions;
pub use extract::ScanResult;
pub use extract::ScanWarning;
pub use mojibake::fix_leaves;
pub use mojibake::fix_text;
pub use node::CatalogNode;
pub use node::NodeError;
pub use node::SetOutcome;
pub use repair::FileOutcome;
pub use repair::FileRepair;
pub use repair::RepairError;
pub use repair::RepairOp;
pub use repair::RepairPlan;
pub use repair::RepairSummary;
pub use repair::apply_file;
pub use repair::apply_plan;
