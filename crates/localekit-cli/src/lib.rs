// crates/localekit-cli/src/lib.rs
// ============================================================================
// Module: Localekit CLI Library
// Description: Shared CLI facilities exposed for the binary and tests.
// Purpose: House the localized message catalog behind the `t!` macro.
// Dependencies: standard library
// ============================================================================

//! ## Overview
//! The binary's user-facing strings live in [`i18n`] and are rendered via
//! the [`t!`](crate::t) macro so the maintenance tool's own output honors
//! the same localization discipline it audits in the application.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;
