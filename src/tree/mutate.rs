//! Tree Mutator
//!
//! Pure, structure-sharing edits. Every operation takes a forest and
//! returns a new one; the input is never touched, so a caller holding
//! the previous reference has a ready-made snapshot for rollback.
//!
//! Missing ids and missing destinations are logged no-ops rather than
//! errors: callers validate through the index/rules first, and a stale
//! request racing a reload must not crash the UI.

use std::sync::Arc;

use crate::models::TreeItem;
use crate::tree::index::{contains, find};
use crate::tree::sort_children;

/// Field edits applied by [`update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub name: Option<String>,
    pub is_expanded: Option<bool>,
}

impl NodePatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn expanded(is_expanded: bool) -> Self {
        Self { is_expanded: Some(is_expanded), ..Self::default() }
    }
}

/// Replace fields on the matching node. A rename re-sorts the level the
/// node sits in, keeping the canonical order invariant.
pub fn update(tree: &[Arc<TreeItem>], id: u32, patch: &NodePatch) -> Vec<Arc<TreeItem>> {
    update_level(tree, id, patch).unwrap_or_else(|| tree.to_vec())
}

fn update_level(tree: &[Arc<TreeItem>], id: u32, patch: &NodePatch) -> Option<Vec<Arc<TreeItem>>> {
    for (i, node) in tree.iter().enumerate() {
        if node.id == id {
            let mut edited = (**node).clone();
            if let Some(name) = &patch.name {
                edited.name = name.clone();
            }
            if let Some(is_expanded) = patch.is_expanded {
                edited.is_expanded = is_expanded;
            }
            let mut level = tree.to_vec();
            level[i] = Arc::new(edited);
            if patch.name.is_some() {
                sort_children(&mut level);
            }
            return Some(level);
        }
        if let Some(children) = update_level(&node.children, id, patch) {
            let mut parent = (**node).clone();
            parent.children = children;
            let mut level = tree.to_vec();
            level[i] = Arc::new(parent);
            return Some(level);
        }
    }
    None
}

/// Remove the node and its whole subtree from wherever it appears.
pub fn remove(tree: &[Arc<TreeItem>], id: u32) -> Vec<Arc<TreeItem>> {
    detach(tree, id).0
}

/// Remove the node, returning both the remaining forest and the
/// detached subtree (for re-insertion elsewhere).
pub fn detach(tree: &[Arc<TreeItem>], id: u32) -> (Vec<Arc<TreeItem>>, Option<Arc<TreeItem>>) {
    for (i, node) in tree.iter().enumerate() {
        if node.id == id {
            let mut level = tree.to_vec();
            let detached = level.remove(i);
            return (level, Some(detached));
        }
        let (children, detached) = detach(&node.children, id);
        if let Some(detached) = detached {
            let mut parent = (**node).clone();
            parent.children = children;
            let mut level = tree.to_vec();
            level[i] = Arc::new(parent);
            return (level, Some(detached));
        }
    }
    (tree.to_vec(), None)
}

/// Insert a node under `parent_id` (or at the root when None), fixing
/// its `parent_id` field and re-sorting the destination level. Returns
/// None when the destination is missing or not a folder.
pub fn insert(
    tree: &[Arc<TreeItem>],
    parent_id: Option<u32>,
    node: Arc<TreeItem>,
) -> Option<Vec<Arc<TreeItem>>> {
    let mut reparented = (*node).clone();
    reparented.parent_id = parent_id;
    let reparented = Arc::new(reparented);
    match parent_id {
        None => {
            let mut level = tree.to_vec();
            level.push(reparented);
            sort_children(&mut level);
            Some(level)
        }
        Some(pid) => insert_under(tree, pid, reparented),
    }
}

fn insert_under(tree: &[Arc<TreeItem>], pid: u32, node: Arc<TreeItem>) -> Option<Vec<Arc<TreeItem>>> {
    for (i, candidate) in tree.iter().enumerate() {
        if candidate.id == pid {
            if !candidate.is_folder {
                return None;
            }
            let mut parent = (**candidate).clone();
            parent.children.push(node);
            sort_children(&mut parent.children);
            let mut level = tree.to_vec();
            level[i] = Arc::new(parent);
            return Some(level);
        }
        if let Some(children) = insert_under(&candidate.children, pid, Arc::clone(&node)) {
            let mut parent = (**candidate).clone();
            parent.children = children;
            let mut level = tree.to_vec();
            level[i] = Arc::new(parent);
            return Some(level);
        }
    }
    None
}

/// Detach `id` and re-insert it under `new_parent_id` (root when None).
/// The destination is checked before anything is detached, so every
/// failure path leaves the tree exactly as it was.
pub fn move_node(tree: &[Arc<TreeItem>], id: u32, new_parent_id: Option<u32>) -> Vec<Arc<TreeItem>> {
    if let Some(pid) = new_parent_id {
        match find(tree, pid) {
            Some(target) if target.is_folder => {}
            _ => {
                log::warn!("move: destination {pid} missing or not a folder, tree unchanged");
                return tree.to_vec();
            }
        }
        if let Some(moved) = find(tree, id) {
            if contains(moved, pid) {
                log::warn!("move: destination {pid} is inside subtree of {id}, tree unchanged");
                return tree.to_vec();
            }
        }
    }
    let (without, detached) = detach(tree, id);
    let Some(moved) = detached else {
        return tree.to_vec();
    };
    insert(&without, new_parent_id, moved).unwrap_or_else(|| tree.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::index::{find, flatten};
    use crate::tree::testutil::{item, sample_tree};

    #[test]
    fn test_update_patches_fields() {
        let tree = sample_tree();
        let updated = update(&tree, 5, &NodePatch::rename("Goldfish"));
        assert_eq!(find(&updated, 5).unwrap().name, "Goldfish");
        // Original untouched.
        assert_eq!(find(&tree, 5).unwrap().name, "Fish");
    }

    #[test]
    fn test_update_rename_resorts_level() {
        let tree = sample_tree();
        let updated = update(&tree, 3, &NodePatch::rename("Ant"));
        let names: Vec<&str> = find(&updated, 1)
            .unwrap()
            .children
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pets", "Ant", "Cat"]);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let tree = sample_tree();
        assert_eq!(update(&tree, 99, &NodePatch::rename("x")), tree);
    }

    #[test]
    fn test_remove_takes_subtree() {
        let tree = sample_tree();
        let removed = remove(&tree, 4);
        assert!(find(&removed, 4).is_none());
        assert!(find(&removed, 5).is_none());
        assert_eq!(flatten(&removed).len(), 3);
    }

    #[test]
    fn test_move_into_folder_resorts_destination() {
        let tree = sample_tree();
        let moved = move_node(&tree, 2, Some(4));
        let pets = find(&moved, 4).unwrap();
        let names: Vec<&str> = pets.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Cat", "Fish"]);
        assert_eq!(find(&moved, 2).unwrap().parent_id, Some(4));
    }

    #[test]
    fn test_move_to_root() {
        let tree = sample_tree();
        let moved = move_node(&tree, 2, None);
        assert_eq!(find(&moved, 2).unwrap().parent_id, None);
        let roots: Vec<u32> = moved.iter().map(|n| n.id).collect();
        assert_eq!(roots, vec![1, 2]);
    }

    #[test]
    fn test_move_preserves_count() {
        let tree = sample_tree();
        let moved = move_node(&tree, 2, Some(4));
        assert_eq!(flatten(&moved).len(), flatten(&tree).len());
    }

    #[test]
    fn test_move_missing_id_or_target_is_noop() {
        let tree = sample_tree();
        assert_eq!(move_node(&tree, 99, Some(4)), tree);
        assert_eq!(move_node(&tree, 2, Some(99)), tree);
        // Card as destination is a structural no-op too.
        assert_eq!(move_node(&tree, 5, Some(2)), tree);
    }

    #[test]
    fn test_move_into_own_subtree_is_noop() {
        let tree = sample_tree();
        assert_eq!(move_node(&tree, 1, Some(4)), tree);
    }

    #[test]
    fn test_insert_under_card_fails() {
        let tree = sample_tree();
        let node = item(9, "New", false, None, vec![]);
        assert!(insert(&tree, Some(2), node).is_none());
    }
}
