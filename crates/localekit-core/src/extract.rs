// crates/localekit-core/src/extract.rs
// ============================================================================
// Module: Translation Key Extraction
// Description: Source-tree scanner for translation-key references.
// Purpose: Produce the set of key paths the application actually uses.
// Dependencies: regex, thiserror, walkdir
// ============================================================================

//! ## Overview
//! [`KeyExtractor`] walks a source tree and applies a fixed set of textual
//! patterns recognizing translate-call shapes. Each distinct call-site form
//! (plain call, single-quoted call, parameterized call, namespaced call) is
//! matched independently, because one file may use several forms.
//!
//! ## Invariants
//! - Output ordering is independent of filesystem enumeration order (BTree
//!   collections throughout).
//! - Unreadable files are skipped with a warning, never fatal.
//! - Keys inside comments are indistinguishable from live keys; the scan is
//!   an over-approximation, never an under-approximation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use regex::Regex;
use thiserror::Error;
use walkdir::WalkDir;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Call-site patterns recognized by the extractor, matched independently.
///
/// Capture group 1 is always the key-path literal.
const CALL_PATTERNS: &[&str] = &[
    // Plain call with a double-quoted key: t("detail_hub.tabs.overview")
    r#"\bt\(\s*"([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)"\s*\)"#,
    // Plain call with a single-quoted key: t('detail_hub.tabs.overview')
    r"\bt\(\s*'([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)'\s*\)",
    // Call with an interpolation parameter object: t("key", { count: n })
    r#"\bt\(\s*"([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)"\s*,"#,
    // Namespaced call: i18n.t("key")
    r#"\bi18n\.t\(\s*"([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)""#,
];

/// Directory names excluded from traversal when no override is configured.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] =
    &["node_modules", "dist", "build", "target", ".git", "coverage", "vendor"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while scanning a source tree.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The configured source root does not exist or is not a directory.
    #[error("source root not found: {path}")]
    RootMissing {
        /// The missing source root.
        path: PathBuf,
    },
    /// A call-site pattern failed to compile.
    #[error("invalid call-site pattern {pattern:?}: {message}")]
    Pattern {
        /// The offending pattern text.
        pattern: String,
        /// The compiler error message.
        message: String,
    },
}

// ============================================================================
// SECTION: Scan Types
// ============================================================================

/// Options controlling a source scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root directory to enumerate.
    pub root: PathBuf,
    /// File extensions (without dots) included in the scan.
    pub extensions: Vec<String>,
    /// Directory names excluded from traversal.
    pub exclude_dirs: Vec<String>,
}

impl ScanOptions {
    /// Creates scan options with the default directory deny-list.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// A non-fatal problem encountered while scanning one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    /// The file that could not be processed.
    pub file: PathBuf,
    /// Why the file was skipped.
    pub message: String,
}

/// Deduplicated key references extracted from a source tree.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// All distinct key paths referenced anywhere in the tree.
    pub keys: BTreeSet<String>,
    /// Key paths referenced per source file.
    pub by_file: BTreeMap<PathBuf, BTreeSet<String>>,
    /// Files skipped with the reason, in path order.
    pub warnings: Vec<ScanWarning>,
    /// Number of files actually scanned.
    pub files_scanned: usize,
}

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Compiled call-site patterns for translation-key extraction.
#[derive(Debug)]
pub struct KeyExtractor {
    /// Compiled patterns, one per recognized call shape.
    patterns: Vec<Regex>,
}

impl KeyExtractor {
    /// Compiles the fixed call-site pattern set.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Pattern`] when a pattern fails to compile.
    pub fn new() -> Result<Self, ExtractError> {
        let mut patterns = Vec::with_capacity(CALL_PATTERNS.len());
        for pattern in CALL_PATTERNS {
            let compiled = Regex::new(pattern).map_err(|err| ExtractError::Pattern {
                pattern: (*pattern).to_string(),
                message: err.to_string(),
            })?;
            patterns.push(compiled);
        }
        Ok(Self {
            patterns,
        })
    }

    /// Extracts the key paths referenced in one chunk of source text.
    #[must_use]
    pub fn extract_from_text(&self, text: &str) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        for pattern in &self.patterns {
            for capture in pattern.captures_iter(text) {
                if let Some(key) = capture.get(1) {
                    keys.insert(key.as_str().to_string());
                }
            }
        }
        keys
    }

    /// Scans a source tree for translation-key references.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::RootMissing`] when the root directory does not
    /// exist. Per-file read failures are reported as warnings in the result.
    pub fn scan(&self, options: &ScanOptions) -> Result<ScanResult, ExtractError> {
        if !options.root.is_dir() {
            return Err(ExtractError::RootMissing {
                path: options.root.clone(),
            });
        }
        let mut result = ScanResult::default();
        let walker = WalkDir::new(&options.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded_dir(entry.path(), &options.exclude_dirs));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    result.warnings.push(ScanWarning {
                        file: err.path().map_or_else(|| options.root.clone(), Path::to_path_buf),
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() || !has_wanted_extension(entry.path(), options) {
                continue;
            }
            let text = match read_utf8(entry.path()) {
                Ok(text) => text,
                Err(message) => {
                    result.warnings.push(ScanWarning {
                        file: entry.path().to_path_buf(),
                        message,
                    });
                    continue;
                }
            };
            result.files_scanned += 1;
            let keys = self.extract_from_text(&text);
            if keys.is_empty() {
                continue;
            }
            result.keys.extend(keys.iter().cloned());
            result.by_file.insert(entry.path().to_path_buf(), keys);
        }
        Ok(result)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when a path's final component matches the deny-list.
fn is_excluded_dir(path: &Path, exclude_dirs: &[String]) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| exclude_dirs.iter().any(|excluded| excluded == name))
}

/// Returns true when a file carries one of the configured extensions.
fn has_wanted_extension(path: &Path, options: &ScanOptions) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| options.extensions.iter().any(|wanted| wanted == extension))
}

/// Reads a file as UTF-8 text, formatting failures as warning messages.
fn read_utf8(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|err| format!("read failed: {err}"))?;
    String::from_utf8(bytes).map_err(|_| "not valid utf-8".to_string())
}
