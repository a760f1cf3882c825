//! Tree Core
//!
//! Pure operations over a category's forest: building from the server
//! payload, read-only indexing, structure-sharing mutation, and move
//! validation. Nothing in here touches the network or the DOM.

pub mod build;
pub mod index;
pub mod mutate;
pub mod rules;

use std::sync::Arc;

use crate::models::TreeItem;

/// Canonical child order: folders before cards, case-sensitive
/// lexicographic by name within each group.
pub fn sort_children(children: &mut Vec<Arc<TreeItem>>) {
    children.sort_by(|a, b| {
        b.is_folder
            .cmp(&a.is_folder)
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    pub(crate) fn item(
        id: u32,
        name: &str,
        is_folder: bool,
        parent_id: Option<u32>,
        children: Vec<Arc<TreeItem>>,
    ) -> Arc<TreeItem> {
        Arc::new(TreeItem {
            id,
            name: name.to_string(),
            is_folder,
            parent_id,
            category_id: 1,
            is_expanded: false,
            extra: serde_json::Map::new(),
            children,
        })
    }

    /// Animals(1) { Pets(4) { Fish(5) }, Cat(2), Dog(3) }
    pub(crate) fn sample_tree() -> Vec<Arc<TreeItem>> {
        vec![item(
            1,
            "Animals",
            true,
            None,
            vec![
                item(4, "Pets", true, Some(1), vec![item(5, "Fish", false, Some(4), vec![])]),
                item(2, "Cat", false, Some(1), vec![]),
                item(3, "Dog", false, Some(1), vec![]),
            ],
        )]
    }
}
