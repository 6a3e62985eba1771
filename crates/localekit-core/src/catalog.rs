// crates/localekit-core/src/catalog.rs
// ============================================================================
// Module: Catalog Loading, Lookup, and Persistence
// Description: Per-locale translation catalog with ordered keys and file I/O.
// Purpose: Load, validate, query, mutate, and rewrite catalog JSON files.
// Dependencies: indexmap, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Catalog`] is the in-memory form of one locale's JSON catalog file:
//! an ordered map of [`CatalogNode`] trees. Loading strips a single leading
//! byte-order mark, parses with insertion order preserved, and validates that
//! every leaf is a string. Saving pretty-prints with two-space indentation
//! and a trailing newline, keeping the input key order so rewrites produce
//! minimal diffs.
//!
//! ## Invariants
//! - A missing catalog file surfaces as [`CatalogError::Missing`] so callers
//!   can report zero coverage instead of aborting the whole batch.
//! - Parse and validation failures never abort loads of other catalogs.
//! - [`Catalog::save`] serializes a tree that was validated in memory; the
//!   output always re-parses as a well-formed catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::node::CatalogNode;
use crate::node::NodeError;
use crate::node::SetOutcome;
use crate::node::split_path;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a catalog file accepted by [`Catalog::load`].
pub const MAX_CATALOG_BYTES: u64 = 8 * 1024 * 1024;

/// The byte-order mark codepoint stripped before parsing.
const BOM: char = '\u{feff}';

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or saving catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("catalog file not found: {path}")]
    Missing {
        /// The missing catalog path.
        path: PathBuf,
    },
    /// Reading or writing the catalog file failed.
    #[error("catalog io error for {path}: {message}")]
    Io {
        /// The catalog path being accessed.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },
    /// The catalog file exceeds [`MAX_CATALOG_BYTES`].
    #[error("catalog file {path} exceeds size limit ({size} > {limit})")]
    TooLarge {
        /// The oversized catalog path.
        path: PathBuf,
        /// Actual file size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        limit: u64,
    },
    /// The catalog file is not valid UTF-8.
    #[error("catalog file {path} must be utf-8")]
    NotUtf8 {
        /// The catalog path with invalid encoding.
        path: PathBuf,
    },
    /// The catalog text is not well-formed JSON after BOM stripping.
    #[error("catalog parse error in {path}: {message}")]
    Parse {
        /// The catalog path that failed to parse.
        path: PathBuf,
        /// Parser message including line and column.
        message: String,
    },
    /// The catalog root is not a JSON object.
    #[error("catalog root in {path} must be an object")]
    RootNotObject {
        /// The catalog path with a non-object root.
        path: PathBuf,
    },
    /// A value in the catalog violated the leaf-is-string invariant.
    #[error("catalog {path} invalid: {source}")]
    Shape {
        /// The catalog path containing the invalid value.
        path: PathBuf,
        /// The underlying tree-shape error.
        source: NodeError,
    },
}

// ============================================================================
// SECTION: Catalog Type
// ============================================================================

/// One locale's translation catalog, keyed by dot-separated path segments.
///
/// # Invariants
/// - Entry order is insertion order and survives load/save round trips.
/// - Every reachable leaf is a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Root entries of the catalog tree.
    entries: IndexMap<String, CatalogNode>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root entries of the catalog.
    #[must_use]
    pub const fn entries(&self) -> &IndexMap<String, CatalogNode> {
        &self.entries
    }

    /// Counts the leaf values in the catalog.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.entries.values().map(CatalogNode::leaf_count).sum()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Loads and validates a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Missing`] when the file does not exist and
    /// other [`CatalogError`] variants for size, encoding, parse, and shape
    /// failures.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::Missing {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
            }
        };
        if metadata.len() > MAX_CATALOG_BYTES {
            return Err(CatalogError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: MAX_CATALOG_BYTES,
            });
        }
        let bytes = fs::read(path).map_err(|err| CatalogError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let text = String::from_utf8(bytes).map_err(|_| CatalogError::NotUtf8 {
            path: path.to_path_buf(),
        })?;
        Self::parse(strip_bom(&text), path)
    }

    /// Parses catalog text that has already been BOM-stripped.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`], [`CatalogError::RootNotObject`], or
    /// [`CatalogError::Shape`] when the text is not a well-formed catalog.
    pub fn parse(text: &str, path: &Path) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text).map_err(|err| CatalogError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let Value::Object(root) = value else {
            return Err(CatalogError::RootNotObject {
                path: path.to_path_buf(),
            });
        };
        let mut entries = IndexMap::with_capacity(root.len());
        for (key, child) in &root {
            let node =
                CatalogNode::from_value(child, key).map_err(|source| CatalogError::Shape {
                    path: path.to_path_buf(),
                    source,
                })?;
            entries.insert(key.clone(), node);
        }
        Ok(Self {
            entries,
        })
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Renders the catalog as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when serialization fails.
    pub fn render(&self, path: &Path) -> Result<String, CatalogError> {
        let mut text =
            serde_json::to_string_pretty(&self.to_value()).map_err(|err| CatalogError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        text.push('\n');
        Ok(text)
    }

    /// Validates the in-memory tree and writes it to `path` in one pass.
    ///
    /// The rendered text is re-parsed before the write is issued; on any
    /// failure the file on disk is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when rendering, re-validation, or the write
    /// fails.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let text = self.render(path)?;
        // Re-validation guards the no-invalid-JSON-on-disk invariant.
        Self::parse(&text, path)?;
        fs::write(path, text).map_err(|err| CatalogError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Converts the catalog into a JSON value, preserving key order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut root = serde_json::Map::with_capacity(self.entries.len());
        for (key, node) in &self.entries {
            root.insert(key.clone(), node.to_value());
        }
        Value::Object(root)
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Looks up a dotted key path, returning the leaf text when present.
    ///
    /// A key is present only when every intermediate segment resolves to a
    /// subtree and the final segment resolves to a leaf. Any other outcome
    /// (missing segment, intermediate leaf, final subtree) is absent.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let segments = split_path(path).ok()?;
        let (last, intermediate) = segments.split_last()?;
        let mut current = &self.entries;
        for segment in intermediate {
            match current.get(*segment) {
                Some(CatalogNode::Subtree(children)) => current = children,
                _ => return None,
            }
        }
        match current.get(*last) {
            Some(CatalogNode::Leaf(text)) => Some(text),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Sets a leaf value, creating intermediate subtrees as needed.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::LeafObstruction`] when an intermediate segment
    /// holds a leaf and [`NodeError::SubtreeObstruction`] when the final
    /// segment already holds a subtree.
    pub fn set_leaf(&mut self, path: &str, value: &str) -> Result<SetOutcome, NodeError> {
        let segments = split_path(path)?;
        let parent = descend_or_create(&mut self.entries, path, &segments[..segments.len() - 1])?;
        let last = segments[segments.len() - 1];
        match parent.get_mut(last) {
            Some(CatalogNode::Leaf(existing)) => {
                if existing == value {
                    Ok(SetOutcome::Unchanged)
                } else {
                    *existing = value.to_string();
                    Ok(SetOutcome::Updated)
                }
            }
            Some(CatalogNode::Subtree(_)) => Err(NodeError::SubtreeObstruction {
                path: path.to_string(),
            }),
            None => {
                parent.insert(last.to_string(), CatalogNode::Leaf(value.to_string()));
                Ok(SetOutcome::Inserted)
            }
        }
    }

    /// Returns the subtree map at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::NotFound`] when the path does not resolve and
    /// [`NodeError::NotASubtree`] when it resolves to a leaf.
    pub fn subtree_at(&self, path: &str) -> Result<&IndexMap<String, CatalogNode>, NodeError> {
        let segments = split_path(path)?;
        let mut current = &self.entries;
        for (index, segment) in segments.iter().enumerate() {
            match current.get(*segment) {
                Some(CatalogNode::Subtree(children)) => current = children,
                Some(CatalogNode::Leaf(_)) => {
                    return Err(NodeError::NotASubtree {
                        path: segments[..=index].join("."),
                    });
                }
                None => {
                    return Err(NodeError::NotFound {
                        path: path.to_string(),
                    });
                }
            }
        }
        Ok(current)
    }

    /// Replaces the subtree at `target_path` with `subtree`, wholesale.
    ///
    /// Intermediate subtrees are created as needed; any existing node at the
    /// target path is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::LeafObstruction`] when an intermediate segment
    /// holds a leaf.
    pub fn replace_subtree(
        &mut self,
        target_path: &str,
        subtree: IndexMap<String, CatalogNode>,
    ) -> Result<(), NodeError> {
        let segments = split_path(target_path)?;
        let parent =
            descend_or_create(&mut self.entries, target_path, &segments[..segments.len() - 1])?;
        let last = segments[segments.len() - 1];
        parent.insert(last.to_string(), CatalogNode::Subtree(subtree));
        Ok(())
    }

    /// Removes the node at `path`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::NotFound`] when the path does not resolve and
    /// [`NodeError::LeafObstruction`] when an intermediate segment is a leaf.
    pub fn delete(&mut self, path: &str) -> Result<CatalogNode, NodeError> {
        let segments = split_path(path)?;
        let mut current = &mut self.entries;
        for (index, segment) in segments[..segments.len() - 1].iter().enumerate() {
            match current.get_mut(*segment) {
                Some(CatalogNode::Subtree(children)) => current = children,
                Some(CatalogNode::Leaf(_)) => {
                    return Err(NodeError::LeafObstruction {
                        path: path.to_string(),
                        segment: segments[..=index].join("."),
                    });
                }
                None => {
                    return Err(NodeError::NotFound {
                        path: path.to_string(),
                    });
                }
            }
        }
        let last = segments[segments.len() - 1];
        // shift_remove keeps the order of the remaining siblings stable.
        current.shift_remove(last).ok_or_else(|| NodeError::NotFound {
            path: path.to_string(),
        })
    }

    /// Visits every leaf value mutably, returning how many were changed.
    pub fn map_leaves<F>(&mut self, mut apply: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        fn walk<F>(children: &mut IndexMap<String, CatalogNode>, apply: &mut F) -> usize
        where
            F: FnMut(&str) -> Option<String>,
        {
            let mut changed = 0;
            for node in children.values_mut() {
                match node {
                    CatalogNode::Leaf(text) => {
                        if let Some(replacement) = apply(text) {
                            *text = replacement;
                            changed += 1;
                        }
                    }
                    CatalogNode::Subtree(grandchildren) => {
                        changed += walk(grandchildren, apply);
                    }
                }
            }
            changed
        }
        walk(&mut self.entries, &mut apply)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Strips a single leading byte-order mark from catalog text; idempotent.
#[must_use]
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Walks to the parent map of a path, creating missing subtrees.
///
/// # Errors
///
/// Returns [`NodeError::LeafObstruction`] when an intermediate segment holds
/// a leaf value.
fn descend_or_create<'a>(
    entries: &'a mut IndexMap<String, CatalogNode>,
    full_path: &str,
    intermediate: &[&str],
) -> Result<&'a mut IndexMap<String, CatalogNode>, NodeError> {
    let mut current = entries;
    for (index, segment) in intermediate.iter().enumerate() {
        let entry = current
            .entry((*segment).to_string())
            .or_insert_with(|| CatalogNode::Subtree(IndexMap::new()));
        match entry {
            CatalogNode::Subtree(children) => current = children,
            CatalogNode::Leaf(_) => {
                return Err(NodeError::LeafObstruction {
                    path: full_path.to_string(),
                    segment: intermediate[..=index].join("."),
                });
            }
        }
    }
    Ok(current)
}
