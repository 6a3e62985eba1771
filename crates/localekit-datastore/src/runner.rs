// crates/localekit-datastore/src/runner.rs
// ============================================================================
// Module: Migration Runner
// Description: Ordered statement execution with per-statement reporting.
// Purpose: Give migrations an explicit contract instead of ad-hoc splitting.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`MigrationRunner`] executes an explicit ordered list of statements via a
//! [`StatementExecutor`] and records an outcome for every statement, in
//! input order. A failing statement is reported and skipped; the runner
//! continues with the next statement and never retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::executor::StatementExecutor;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading a statement list document.
#[derive(Debug, Error)]
pub enum StatementListError {
    /// The statement document could not be read.
    #[error("statement list io error for {path}: {message}")]
    Io {
        /// The document path being read.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },
    /// The statement document is not a valid list.
    #[error("statement list parse error in {path}: {message}")]
    Parse {
        /// The document path that failed to parse.
        path: PathBuf,
        /// The parser error message.
        message: String,
    },
    /// The statement list is empty or contains a blank statement.
    #[error("invalid statement list: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Statement List
// ============================================================================

/// An explicit, ordered list of SQL statements.
///
/// # Invariants
/// - Non-empty; every statement has non-whitespace content.
/// - Order is execution order; no delimiter splitting is ever applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementList {
    /// The statements in execution order.
    pub statements: Vec<String>,
}

impl StatementList {
    /// Loads a statement list from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`StatementListError`] when the document cannot be read,
    /// parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, StatementListError> {
        let text = fs::read_to_string(path).map_err(|err| StatementListError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let list: Self = serde_json::from_str(&text).map_err(|err| StatementListError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        list.validate()?;
        Ok(list)
    }

    /// Validates the list contents.
    ///
    /// # Errors
    ///
    /// Returns [`StatementListError::Invalid`] for an empty list or a blank
    /// statement.
    pub fn validate(&self) -> Result<(), StatementListError> {
        if self.statements.is_empty() {
            return Err(StatementListError::Invalid(
                "statement list must contain at least one statement".to_string(),
            ));
        }
        if let Some(index) =
            self.statements.iter().position(|statement| statement.trim().is_empty())
        {
            return Err(StatementListError::Invalid(format!(
                "statement {index} is empty"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOutcome {
    /// Zero-based position of the statement in the input list.
    pub index: usize,
    /// The failure message when the statement was rejected.
    pub error: Option<String>,
}

/// Aggregate report for one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Statements executed (equals the input list length).
    pub total: usize,
    /// Statements that succeeded.
    pub succeeded: usize,
    /// Statements that failed and were skipped.
    pub failed: usize,
    /// Per-statement outcomes in input order.
    pub outcomes: Vec<StatementOutcome>,
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Drives a [`StatementExecutor`] over an ordered statement list.
#[derive(Debug)]
pub struct MigrationRunner<E> {
    /// The executor used for each statement.
    executor: E,
}

impl<E: StatementExecutor> MigrationRunner<E> {
    /// Creates a runner over the given executor.
    pub const fn new(executor: E) -> Self {
        Self {
            executor,
        }
    }

    /// Executes every statement in order, recording one outcome each.
    ///
    /// Failures are recorded and skipped; execution always reaches the end
    /// of the list.
    #[must_use]
    pub fn run(&self, list: &StatementList) -> MigrationReport {
        let mut report = MigrationReport {
            total: list.statements.len(),
            ..MigrationReport::default()
        };
        for (index, statement) in list.statements.iter().enumerate() {
            match self.executor.execute(statement) {
                Ok(()) => {
                    report.succeeded += 1;
                    report.outcomes.push(StatementOutcome {
                        index,
                        error: None,
                    });
                }
                Err(err) => {
                    report.failed += 1;
                    report.outcomes.push(StatementOutcome {
                        index,
                        error: Some(err.to_string()),
                    });
                }
            }
        }
        report
    }
}
