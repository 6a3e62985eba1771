// crates/localekit-core/src/mojibake.rs
// ============================================================================
// Module: Mojibake Repair Tables
// Description: Ordered literal replacements for double-encoded UTF-8 text.
// Purpose: Map known corruption sequences back to their intended characters.
// Dependencies: localekit-core catalog module
// ============================================================================

//! ## Overview
//! When UTF-8 catalog text is decoded as Windows-1252 and re-encoded, each
//! multi-byte character becomes a recognizable junk sequence ("Ã©" for "é",
//! "â€™" for a right single quote). This module holds the ordered repair
//! table for the character repertoire of the application's locales (Spanish
//! and Brazilian Portuguese) plus common punctuation.
//!
//! ## Invariants
//! - Patterns are ordered longest first so shorter patterns never consume a
//!   prefix of a longer corruption sequence.
//! - No replacement output contains any pattern, making the fix idempotent:
//!   applying it to already-correct text is a no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::catalog::Catalog;

// ============================================================================
// SECTION: Replacement Table
// ============================================================================

/// Ordered replacement table: longest corruption sequences first.
///
/// Second characters that are invisible or C1 controls are written as
/// escapes; the rest appear literally.
pub const REPLACEMENTS: &[(&str, &str)] = &[
    // Three-character sequences (punctuation and a doubly encoded BOM).
    ("\u{e2}\u{20ac}\u{2122}", "\u{2019}"), // â€™ -> ’
    ("\u{e2}\u{20ac}\u{153}", "\u{201c}"),  // â€œ -> “
    ("\u{e2}\u{20ac}\u{9d}", "\u{201d}"),   // â€(9d) -> ”
    ("\u{e2}\u{20ac}\u{201c}", "\u{2013}"), // â€“ -> –
    ("\u{e2}\u{20ac}\u{201d}", "\u{2014}"), // â€” -> —
    ("\u{e2}\u{20ac}\u{a6}", "\u{2026}"),   // â€¦ -> …
    ("\u{ef}\u{bb}\u{bf}", ""),             // ï»¿ -> (doubly encoded BOM)
    // Two-character sequences: uppercase letters.
    ("\u{c3}\u{81}", "Á"),
    ("\u{c3}\u{2030}", "É"), // Ã‰
    ("\u{c3}\u{8d}", "Í"),
    ("\u{c3}\u{201c}", "Ó"), // Ã“
    ("\u{c3}\u{161}", "Ú"),  // Ãš
    ("\u{c3}\u{2018}", "Ñ"), // Ã‘
    ("\u{c3}\u{192}", "Ã"),  // Ãƒ
    ("\u{c3}\u{2022}", "Õ"), // Ã•
    ("\u{c3}\u{2021}", "Ç"), // Ã‡
    ("\u{c3}\u{20ac}", "À"), // Ã€
    ("\u{c3}\u{201a}", "Â"), // Ã‚
    ("\u{c3}\u{160}", "Ê"),  // ÃŠ
    ("\u{c3}\u{201d}", "Ô"), // Ã”
    // Two-character sequences: lowercase letters.
    ("\u{c3}\u{a1}", "á"),
    ("\u{c3}\u{a9}", "é"),
    ("\u{c3}\u{ad}", "í"),
    ("\u{c3}\u{b3}", "ó"),
    ("\u{c3}\u{ba}", "ú"),
    ("\u{c3}\u{b1}", "ñ"),
    ("\u{c3}\u{bc}", "ü"),
    ("\u{c3}\u{a3}", "ã"),
    ("\u{c3}\u{b5}", "õ"),
    ("\u{c3}\u{a2}", "â"),
    ("\u{c3}\u{aa}", "ê"),
    ("\u{c3}\u{b4}", "ô"),
    ("\u{c3}\u{a7}", "ç"),
    ("\u{c3}\u{a0}", "à"),
];

// ============================================================================
// SECTION: Fix Operations
// ============================================================================

/// Applies the replacement table to raw text.
///
/// Returns the repaired text and the number of sequences replaced.
#[must_use]
pub fn fix_text(input: &str) -> (String, usize) {
    let mut text = input.to_string();
    let mut replaced = 0;
    for (pattern, replacement) in REPLACEMENTS {
        let hits = text.matches(pattern).count();
        if hits > 0 {
            text = text.replace(pattern, replacement);
            replaced += hits;
        }
    }
    (text, replaced)
}

/// Applies the replacement table to every leaf string in a catalog.
///
/// Returns the total number of sequences replaced across all leaves.
pub fn fix_leaves(catalog: &mut Catalog) -> usize {
    let mut total = 0;
    catalog.map_leaves(|text| {
        let (fixed, replaced) = fix_text(text);
        if replaced == 0 {
            None
        } else {
            total += replaced;
            Some(fixed)
        }
    });
    total
}
