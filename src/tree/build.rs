//! Tree Builder
//!
//! Converts the backend's nested hierarchy payload into `TreeItem`
//! trees, applying the canonical sort order at every level.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{CategoryItem, RawCategory, RawNode, TreeItem};
use crate::tree::sort_children;

/// Build one category's forest from nested raw nodes.
///
/// Children are converted first, then each level is sorted. `expanded`
/// carries the ids that were expanded before a reload so the UI state
/// survives a rebuild; everything else starts collapsed.
pub fn build_tree(nodes: &[RawNode], expanded: &HashSet<u32>) -> Vec<Arc<TreeItem>> {
    let mut out: Vec<Arc<TreeItem>> = nodes
        .iter()
        .map(|node| Arc::new(convert(node, expanded)))
        .collect();
    sort_children(&mut out);
    out
}

/// Build the whole multi-category forest.
pub fn build_forest(raw: &[RawCategory], expanded: &HashSet<u32>) -> Vec<CategoryItem> {
    raw.iter()
        .map(|category| CategoryItem {
            id: category.id,
            name: category.name.clone(),
            children: build_tree(&category.children, expanded),
        })
        .collect()
}

/// Convert a single created node (no children) for local insertion.
pub fn from_raw(node: &RawNode) -> TreeItem {
    convert(node, &HashSet::new())
}

fn convert(node: &RawNode, expanded: &HashSet<u32>) -> TreeItem {
    let mut children: Vec<Arc<TreeItem>> = node
        .children
        .iter()
        .map(|child| Arc::new(convert(child, expanded)))
        .collect();
    sort_children(&mut children);
    TreeItem {
        id: node.id,
        name: node.name.clone(),
        is_folder: node.is_folder,
        parent_id: node.parent_id,
        category_id: node.category_id,
        is_expanded: expanded.contains(&node.id),
        extra: node.extra.clone(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::index::flatten;

    fn raw(id: u32, name: &str, is_folder: bool, parent_id: Option<u32>, children: Vec<RawNode>) -> RawNode {
        RawNode {
            id,
            name: name.to_string(),
            is_folder,
            parent_id,
            category_id: 1,
            children,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_build_sorts_folders_before_cards() {
        let nodes = vec![
            raw(2, "zebra", false, None, vec![]),
            raw(3, "apple", false, None, vec![]),
            raw(1, "words", true, None, vec![]),
        ];
        let tree = build_tree(&nodes, &HashSet::new());
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["words", "apple", "zebra"]);
    }

    #[test]
    fn test_build_sorts_every_level() {
        let nodes = vec![raw(
            1,
            "Animals",
            true,
            None,
            vec![
                raw(3, "Dog", false, Some(1), vec![]),
                raw(4, "Pets", true, Some(1), vec![]),
                raw(2, "Cat", false, Some(1), vec![]),
            ],
        )];
        let tree = build_tree(&nodes, &HashSet::new());
        let names: Vec<&str> = tree[0].children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Pets", "Cat", "Dog"]);
    }

    #[test]
    fn test_build_preserves_expanded_ids() {
        let nodes = vec![raw(1, "Animals", true, None, vec![raw(2, "Pets", true, Some(1), vec![])])];
        let expanded: HashSet<u32> = [1].into_iter().collect();
        let tree = build_tree(&nodes, &expanded);
        assert!(tree[0].is_expanded);
        assert!(!tree[0].children[0].is_expanded);
    }

    #[test]
    fn test_build_round_trip_id_multiset() {
        let nodes = vec![
            raw(
                1,
                "Animals",
                true,
                None,
                vec![
                    raw(2, "Cat", false, Some(1), vec![]),
                    raw(4, "Pets", true, Some(1), vec![raw(5, "Fish", false, Some(4), vec![])]),
                    raw(3, "Dog", false, Some(1), vec![]),
                ],
            ),
            raw(6, "Loose", false, None, vec![]),
        ];
        let tree = build_tree(&nodes, &HashSet::new());
        let mut ids: Vec<u32> = flatten(&tree).iter().map(|n| n.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        // Rebuilding from an already-sorted tree keeps the same shape.
        let again = build_tree(&nodes, &HashSet::new());
        assert_eq!(tree, again);
    }

    #[test]
    fn test_build_preserves_card_payload() {
        let mut extra = serde_json::Map::new();
        extra.insert("meanings".into(), serde_json::json!(["feline"]));
        let nodes = vec![RawNode {
            id: 2,
            name: "Cat".into(),
            is_folder: false,
            parent_id: None,
            category_id: 1,
            children: vec![],
            extra: extra.clone(),
        }];
        let tree = build_tree(&nodes, &HashSet::new());
        assert_eq!(tree[0].extra, extra);
    }
}
