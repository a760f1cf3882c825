//! Frontend Models
//!
//! Tree node and category structures plus the serde mirror of the
//! backend's nested hierarchy payload.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node in a category's forest: either a folder or a card.
///
/// Children are `Arc`-shared, so cloning a node is a shallow copy of its
/// child list. Mutators rebuild only the spine from root to the edited
/// node; untouched subtrees are shared between old and new trees, which
/// makes forest snapshots cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem {
    pub id: u32,
    pub name: String,
    pub is_folder: bool,
    /// Containing folder, or None when directly under the category.
    pub parent_id: Option<u32>,
    pub category_id: u32,
    /// UI expansion state; not a structural invariant.
    pub is_expanded: bool,
    /// Card payload (meanings, examples, ...). Opaque to the tree core,
    /// preserved verbatim across all operations.
    pub extra: Map<String, Value>,
    /// Ordered folders-before-cards, lexicographic by name within each group.
    pub children: Vec<Arc<TreeItem>>,
}

impl TreeItem {
    /// A subfolder (folder whose own parent is a folder) may contain
    /// cards only, never folders.
    pub fn is_subfolder(&self) -> bool {
        self.is_folder && self.parent_id.is_some()
    }
}

/// A named top-level container owning an independent forest.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryItem {
    pub id: u32,
    pub name: String,
    pub children: Vec<Arc<TreeItem>>,
}

/// Hierarchy node as served by the backend, children nested inline.
/// Unknown card fields land in `extra` and ride along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: u32,
    pub name: String,
    pub is_folder: bool,
    #[serde(default)]
    pub parent_id: Option<u32>,
    pub category_id: u32,
    #[serde(default)]
    pub children: Vec<RawNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Category with its nested hierarchy, as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCategory {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Error,
    Success,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }
}
