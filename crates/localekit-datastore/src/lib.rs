// crates/localekit-datastore/src/lib.rs
// ============================================================================
// Module: Localekit Datastore Library
// Description: Migration-runner contract for the external data-store API.
// Purpose: Execute explicit ordered SQL statement lists with per-statement
//          reporting, replacing ad-hoc delimiter-splitting scripts.
// Dependencies: reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! The external managed-database service is an opaque collaborator reached
//! over authenticated HTTP. [`MigrationRunner`] drives a [`StatementExecutor`]
//! over an explicit, ordered list of statements; each statement is one atomic
//! unit with its own recorded outcome. Statement boundaries are never guessed
//! from delimiter splitting.
//!
//! ## Invariants
//! - Execution is sequential and synchronous; a failing statement is
//!   reported and skipped, never retried.
//! - The credential is injected at construction time from configuration; it
//!   is never read from source or written to any output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod executor;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use executor::DatastoreError;
pub use executor::HttpStatementExecutor;
pub use executor::REQUEST_TIMEOUT;
pub use executor::StatementExecutor;
pub use runner::MigrationReport;
pub use runner::MigrationRunner;
pub use runner::StatementList;
pub use runner::StatementListError;
pub use runner::StatementOutcome;
