// crates/localekit-core/src/node.rs
// ============================================================================
// Module: Catalog Node Model
// Description: Tagged tree variant for translation catalog values.
// Purpose: Make leaf/subtree ambiguity unrepresentable and path ops explicit.
// Dependencies: indexmap, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A catalog value is either a [`CatalogNode::Leaf`] holding a translated
//! string or a [`CatalogNode::Subtree`] holding an ordered map of child
//! nodes. All path operations split dotted keys on `.` and pattern-match on
//! the variant; there is no runtime type probing.
//!
//! ## Invariants
//! - Subtree maps preserve insertion order ([`IndexMap`]).
//! - Conversion from JSON rejects any value that is neither a string nor an
//!   object, naming the offending dotted path.
//! - Mutating operations fail closed: an intermediate leaf is never silently
//!   replaced by a subtree, and a subtree is never silently replaced by a
//!   leaf.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by catalog tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// A dotted key path was empty or contained an empty segment.
    #[error("invalid key path: {path:?}")]
    InvalidPath {
        /// The offending dotted key path.
        path: String,
    },
    /// An intermediate segment resolved to a leaf instead of a subtree.
    #[error("segment {segment:?} of {path:?} is a leaf, not a subtree")]
    LeafObstruction {
        /// The full dotted key path being traversed.
        path: String,
        /// The dotted path of the obstructing leaf.
        segment: String,
    },
    /// The final segment already holds a subtree and cannot take a leaf.
    #[error("{path:?} is a subtree; delete it before setting a leaf value")]
    SubtreeObstruction {
        /// The dotted key path of the existing subtree.
        path: String,
    },
    /// The requested path does not resolve to any node.
    #[error("no node at {path:?}")]
    NotFound {
        /// The dotted key path that failed to resolve.
        path: String,
    },
    /// The requested path resolved to a leaf where a subtree was required.
    #[error("{path:?} is not a subtree")]
    NotASubtree {
        /// The dotted key path of the non-subtree node.
        path: String,
    },
    /// A JSON value was neither a string nor an object.
    #[error("value at {path:?} must be a string or object, found {found}")]
    InvalidValue {
        /// The dotted key path of the invalid value.
        path: String,
        /// A short label for the JSON type encountered.
        found: &'static str,
    },
}

// ============================================================================
// SECTION: Node Type
// ============================================================================

/// A single node in a translation catalog tree.
///
/// # Invariants
/// - [`CatalogNode::Leaf`] holds human-readable text, possibly containing
///   placeholder tokens such as `{count}`.
/// - [`CatalogNode::Subtree`] children keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    /// A translated string value.
    Leaf(String),
    /// A nested map of child nodes, keyed by path segment.
    Subtree(IndexMap<String, CatalogNode>),
}

/// Result of a set-leaf-value operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key did not exist and was inserted.
    Inserted,
    /// The key existed with a different value and was updated.
    Updated,
    /// The key already held exactly this value.
    Unchanged,
}

impl CatalogNode {
    /// Converts a parsed JSON value into a catalog node.
    ///
    /// `prefix` is the dotted path of `value` within the catalog and is used
    /// only for error reporting; pass `""` for the root.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidValue`] when any value in the tree is
    /// neither a string nor an object.
    pub fn from_value(value: &Value, prefix: &str) -> Result<Self, NodeError> {
        match value {
            Value::String(text) => Ok(Self::Leaf(text.clone())),
            Value::Object(entries) => {
                let mut children = IndexMap::with_capacity(entries.len());
                for (key, child) in entries {
                    let child_path = join_path(prefix, key);
                    children.insert(key.clone(), Self::from_value(child, &child_path)?);
                }
                Ok(Self::Subtree(children))
            }
            other => Err(NodeError::InvalidValue {
                path: if prefix.is_empty() {
                    "<root>".to_string()
                } else {
                    prefix.to_string()
                },
                found: json_type_label(other),
            }),
        }
    }

    /// Converts this node back into a JSON value, preserving key order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(text) => Value::String(text.clone()),
            Self::Subtree(children) => {
                let mut entries = Map::with_capacity(children.len());
                for (key, child) in children {
                    entries.insert(key.clone(), child.to_value());
                }
                Value::Object(entries)
            }
        }
    }

    /// Returns true when this node is a subtree.
    #[must_use]
    pub const fn is_subtree(&self) -> bool {
        matches!(self, Self::Subtree(_))
    }

    /// Counts the leaf values in this node's tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Subtree(children) => children.values().map(Self::leaf_count).sum(),
        }
    }
}

// ============================================================================
// SECTION: Path Helpers
// ============================================================================

/// Splits a dotted key path into validated segments.
///
/// # Errors
///
/// Returns [`NodeError::InvalidPath`] when the path is empty or any segment
/// is empty.
pub fn split_path(path: &str) -> Result<Vec<&str>, NodeError> {
    if path.is_empty() {
        return Err(NodeError::InvalidPath {
            path: path.to_string(),
        });
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(NodeError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(segments)
}

/// Joins a dotted prefix and a segment into a dotted path.
fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Returns a short label for a JSON value's type.
const fn json_type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
