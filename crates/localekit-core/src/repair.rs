// crates/localekit-core/src/repair.rs
// ============================================================================
// Module: Catalog Repair Operations
// Description: Batch application of catalog mutations with atomic writes.
// Purpose: Apply corrections while guaranteeing no invalid JSON reaches disk.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`RepairPlan`] lists catalog files and the ordered [`RepairOp`] batch
//! for each. Every file is processed read-validate-write: the raw text is
//! loaded, operations are applied in memory, the result is re-validated, and
//! only then is the file rewritten. Any failure aborts that single file's
//! write; files already committed earlier in the batch stay committed.
//!
//! ## Invariants
//! - A file is rewritten only when at least one operation changed it.
//! - Key order in rewritten files is the input insertion order.
//! - The mojibake fix re-validates before committing; a repair that would
//!   produce an unparseable catalog reports the parse error and writes
//!   nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::catalog::CatalogError;
use crate::catalog::MAX_CATALOG_BYTES;
use crate::catalog::strip_bom;
use crate::mojibake;
use crate::node::NodeError;
use crate::node::SetOutcome;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or applying a repair plan.
#[derive(Debug, Error)]
pub enum RepairError {
    /// The plan file could not be read.
    #[error("repair plan io error for {path}: {message}")]
    PlanIo {
        /// The plan path being read.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },
    /// The plan file is not a valid plan document.
    #[error("repair plan parse error in {path}: {message}")]
    PlanParse {
        /// The plan path that failed to parse.
        path: PathBuf,
        /// The parser error message.
        message: String,
    },
    /// A catalog file failed to load or re-validate.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A tree operation failed against the in-memory catalog.
    #[error(transparent)]
    Node(#[from] NodeError),
    /// A merge source path did not resolve to a subtree.
    #[error("merge source {source_path:?} in {source_file:?} is not a subtree")]
    MergeSource {
        /// The authoritative source catalog path.
        source_file: PathBuf,
        /// The dotted path requested within the source catalog.
        source_path: String,
    },
}

// ============================================================================
// SECTION: Plan Types
// ============================================================================

/// One catalog mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RepairOp {
    /// Set a leaf value, creating intermediate subtrees as needed.
    SetLeaf {
        /// Dotted key path of the leaf.
        path: String,
        /// The translated text to store.
        value: String,
    },
    /// Replace the subtree at `target_path` with one copied from an
    /// authoritative source catalog, wholesale.
    MergeSubtree {
        /// Dotted path to replace in the target catalog.
        target_path: String,
        /// Path of the authoritative source catalog file.
        source: PathBuf,
        /// Dotted path of the subtree within the source catalog.
        source_path: String,
    },
    /// Remove the node at `path`.
    DeleteKey {
        /// Dotted key path to remove.
        path: String,
    },
    /// Remove a single leading byte-order mark from the raw file text.
    StripBom,
    /// Apply the mojibake replacement table to the catalog text.
    FixMojibake,
}

/// The ordered repair batch for one catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRepair {
    /// The catalog file to repair.
    pub file: PathBuf,
    /// Operations applied in order.
    pub ops: Vec<RepairOp>,
}

/// A repair batch covering one or more catalog files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairPlan {
    /// Per-file repair batches, processed in order.
    pub files: Vec<FileRepair>,
}

impl RepairPlan {
    /// Loads a repair plan from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`RepairError::PlanIo`] or [`RepairError::PlanParse`] when
    /// the document cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self, RepairError> {
        let text = fs::read_to_string(path).map_err(|err| RepairError::PlanIo {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        serde_json::from_str(strip_bom(&text)).map_err(|err| RepairError::PlanParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

// ============================================================================
// SECTION: Outcome Types
// ============================================================================

/// The result of repairing one catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// The catalog file this outcome describes.
    pub file: PathBuf,
    /// Operations applied before completion or failure.
    pub applied: usize,
    /// Whether the file was rewritten.
    pub changed: bool,
    /// The failure that aborted this file's write, when any.
    pub error: Option<String>,
}

/// Aggregate counts for a repair batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairSummary {
    /// Files named by the plan.
    pub total: usize,
    /// Files rewritten with at least one change.
    pub fixed: usize,
    /// Files processed without any change (no write issued).
    pub skipped: usize,
    /// Files whose write was aborted by a failure.
    pub errors: usize,
    /// Per-file outcomes in plan order.
    pub outcomes: Vec<FileOutcome>,
}

// ============================================================================
// SECTION: Plan Application
// ============================================================================

/// Applies a repair plan, one catalog file at a time.
///
/// A failure aborts only the affected file; earlier files stay committed.
#[must_use]
pub fn apply_plan(plan: &RepairPlan) -> RepairSummary {
    let mut summary = RepairSummary {
        total: plan.files.len(),
        ..RepairSummary::default()
    };
    for file_repair in &plan.files {
        let outcome = match apply_file(file_repair) {
            Ok(outcome) => outcome,
            Err((applied, err)) => FileOutcome {
                file: file_repair.file.clone(),
                applied,
                changed: false,
                error: Some(err.to_string()),
            },
        };
        if outcome.error.is_some() {
            summary.errors += 1;
        } else if outcome.changed {
            summary.fixed += 1;
        } else {
            summary.skipped += 1;
        }
        summary.outcomes.push(outcome);
    }
    summary
}

/// Applies one file's repair batch with the read-validate-write discipline.
///
/// # Errors
///
/// Returns the number of operations applied before the failure together
/// with the failure itself; the file on disk is untouched in that case.
pub fn apply_file(file_repair: &FileRepair) -> Result<FileOutcome, (usize, RepairError)> {
    let raw = read_raw(&file_repair.file).map_err(|err| (0, err))?;
    let mut text = strip_bom(&raw).to_string();
    let mut changed = raw.len() != text.len() && has_strip_bom(&file_repair.ops);
    let mut applied = 0;

    // Raw-depth mojibake fix: when the file does not even parse, the
    // corruption may sit in the structure itself, not just leaf values.
    if has_fix_mojibake(&file_repair.ops)
        && Catalog::parse(&text, &file_repair.file).is_err()
    {
        let (fixed, replaced) = mojibake::fix_text(&text);
        if replaced > 0 {
            text = fixed;
            changed = true;
        }
    }

    let mut catalog =
        Catalog::parse(&text, &file_repair.file).map_err(|err| (applied, err.into()))?;

    for op in &file_repair.ops {
        match op {
            RepairOp::SetLeaf {
                path,
                value,
            } => {
                let outcome =
                    catalog.set_leaf(path, value).map_err(|err| (applied, err.into()))?;
                if !matches!(outcome, SetOutcome::Unchanged) {
                    changed = true;
                }
            }
            RepairOp::MergeSubtree {
                target_path,
                source,
                source_path,
            } => {
                let source_catalog = Catalog::load(source).map_err(|err| (applied, err.into()))?;
                let subtree = source_catalog.subtree_at(source_path).map_err(|_| {
                    (applied, RepairError::MergeSource {
                        source_file: source.clone(),
                        source_path: source_path.clone(),
                    })
                })?;
                catalog
                    .replace_subtree(target_path, subtree.clone())
                    .map_err(|err| (applied, err.into()))?;
                changed = true;
            }
            RepairOp::DeleteKey {
                path,
            } => {
                catalog.delete(path).map_err(|err| (applied, err.into()))?;
                changed = true;
            }
            RepairOp::StripBom => {
                // Already handled on the raw text; idempotent by contract.
            }
            RepairOp::FixMojibake => {
                if mojibake::fix_leaves(&mut catalog) > 0 {
                    changed = true;
                }
            }
        }
        applied += 1;
    }

    if changed {
        catalog.save(&file_repair.file).map_err(|err| (applied, err.into()))?;
    }
    Ok(FileOutcome {
        file: file_repair.file.clone(),
        applied,
        changed,
        error: None,
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the raw catalog text, enforcing the size and encoding limits.
fn read_raw(path: &Path) -> Result<String, RepairError> {
    let metadata = fs::metadata(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            RepairError::Catalog(CatalogError::Missing {
                path: path.to_path_buf(),
            })
        } else {
            RepairError::Catalog(CatalogError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            })
        }
    })?;
    if metadata.len() > MAX_CATALOG_BYTES {
        return Err(RepairError::Catalog(CatalogError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_CATALOG_BYTES,
        }));
    }
    let bytes = fs::read(path).map_err(|err| {
        RepairError::Catalog(CatalogError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    })?;
    String::from_utf8(bytes).map_err(|_| {
        RepairError::Catalog(CatalogError::NotUtf8 {
            path: path.to_path_buf(),
        })
    })
}

/// Returns true when the batch contains a strip-BOM operation.
fn has_strip_bom(ops: &[RepairOp]) -> bool {
    ops.iter().any(|op| matches!(op, RepairOp::StripBom))
}

/// Returns true when the batch contains a mojibake fix.
fn has_fix_mojibake(ops: &[RepairOp]) -> bool {
    ops.iter().any(|op| matches!(op, RepairOp::FixMojibake))
}
