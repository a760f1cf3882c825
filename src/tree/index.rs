//! Tree Index
//!
//! Read-only queries over a forest: lookup, ancestry, descendant sets,
//! and flattening for rendering and bulk operations.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::TreeItem;

/// Depth-first search for a node by id. Ids are unique, so the first
/// match is the only one.
pub fn find<'a>(tree: &'a [Arc<TreeItem>], id: u32) -> Option<&'a Arc<TreeItem>> {
    for node in tree {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Ancestor ids from the root down to just above `id`. Empty when the
/// id is not in the tree or sits at the root level.
pub fn parent_chain(tree: &[Arc<TreeItem>], id: u32) -> Vec<u32> {
    fn walk(tree: &[Arc<TreeItem>], id: u32, chain: &mut Vec<u32>) -> bool {
        for node in tree {
            if node.id == id {
                return true;
            }
            chain.push(node.id);
            if walk(&node.children, id, chain) {
                return true;
            }
            chain.pop();
        }
        false
    }

    let mut chain = Vec::new();
    if walk(tree, id, &mut chain) {
        chain
    } else {
        Vec::new()
    }
}

/// All ids reachable from `node`, including its own.
pub fn descendant_ids(node: &TreeItem) -> HashSet<u32> {
    let mut ids = HashSet::new();
    fn collect(node: &TreeItem, ids: &mut HashSet<u32>) {
        ids.insert(node.id);
        for child in &node.children {
            collect(child, ids);
        }
    }
    collect(node, &mut ids);
    ids
}

/// Allocation-free membership test over a subtree, including the root.
/// Used on the dragover hot path where `descendant_ids` would churn.
pub fn contains(node: &TreeItem, id: u32) -> bool {
    node.id == id || node.children.iter().any(|child| contains(child, id))
}

/// Pre-order flattening of the whole forest.
pub fn flatten(tree: &[Arc<TreeItem>]) -> Vec<Arc<TreeItem>> {
    let mut out = Vec::new();
    fn walk(tree: &[Arc<TreeItem>], out: &mut Vec<Arc<TreeItem>>) {
        for node in tree {
            out.push(Arc::clone(node));
            walk(&node.children, out);
        }
    }
    walk(tree, &mut out);
    out
}

/// Pre-order flattening with depth, skipping children of collapsed
/// folders. Feeds the row renderer.
pub fn flatten_visible(tree: &[Arc<TreeItem>]) -> Vec<(Arc<TreeItem>, usize)> {
    let mut out = Vec::new();
    fn walk(tree: &[Arc<TreeItem>], depth: usize, out: &mut Vec<(Arc<TreeItem>, usize)>) {
        for node in tree {
            out.push((Arc::clone(node), depth));
            if node.is_expanded {
                walk(&node.children, depth + 1, out);
            }
        }
    }
    walk(tree, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::testutil::sample_tree;

    #[test]
    fn test_find_nested() {
        let tree = sample_tree();
        assert_eq!(find(&tree, 5).map(|n| n.name.as_str()), Some("Fish"));
        assert!(find(&tree, 99).is_none());
    }

    #[test]
    fn test_parent_chain() {
        let tree = sample_tree();
        assert_eq!(parent_chain(&tree, 5), vec![1, 4]);
        assert_eq!(parent_chain(&tree, 1), Vec::<u32>::new());
        assert_eq!(parent_chain(&tree, 99), Vec::<u32>::new());
    }

    #[test]
    fn test_descendant_ids_include_self() {
        let tree = sample_tree();
        let ids = descendant_ids(&tree[0]);
        assert_eq!(ids, [1, 2, 3, 4, 5].into_iter().collect());
    }

    #[test]
    fn test_contains_matches_descendants() {
        let tree = sample_tree();
        assert!(contains(&tree[0], 5));
        assert!(contains(&tree[0], 1));
        assert!(!contains(&tree[0].children[0], 2));
    }

    #[test]
    fn test_flatten_pre_order() {
        let tree = sample_tree();
        let ids: Vec<u32> = flatten(&tree).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 4, 5, 2, 3]);
    }

    #[test]
    fn test_flatten_visible_skips_collapsed() {
        let tree = sample_tree();
        // Everything starts collapsed: only the root row shows.
        let visible: Vec<u32> = flatten_visible(&tree).iter().map(|(n, _)| n.id).collect();
        assert_eq!(visible, vec![1]);

        let mut root = (*tree[0]).clone();
        root.is_expanded = true;
        let tree = vec![Arc::new(root)];
        let visible: Vec<(u32, usize)> = flatten_visible(&tree).iter().map(|(n, d)| (n.id, *d)).collect();
        assert_eq!(visible, vec![(1, 0), (4, 1), (2, 1), (3, 1)]);
    }
}
