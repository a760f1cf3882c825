//! Move Rules
//!
//! Structural legality of a proposed move, checked before any
//! optimistic apply and again at drop time (the tree may have changed
//! between dragover and drop).

use crate::models::TreeItem;
use crate::tree::index::contains;

/// Why a move was rejected. Local and synchronous; no remote call is
/// issued for a denied move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveDenied {
    /// Destination is a card; only folders hold children.
    TargetNotFolder,
    /// Dropping a node onto itself.
    SelfTarget,
    /// Destination sits inside the dragged subtree (would form a cycle).
    IntoOwnSubtree,
    /// Folders nest two levels at most: a subfolder holds cards only.
    FolderIntoSubfolder,
}

impl std::fmt::Display for MoveDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveDenied::TargetNotFolder => write!(f, "Cards cannot contain other items"),
            MoveDenied::SelfTarget => write!(f, "Cannot move an item into itself"),
            MoveDenied::IntoOwnSubtree => write!(f, "Cannot move a folder into its own contents"),
            MoveDenied::FolderIntoSubfolder => write!(f, "Subfolders can only contain cards"),
        }
    }
}

/// Check a proposed move of `dragged` into `target`'s children.
pub fn validate_move(dragged: &TreeItem, target: &TreeItem) -> Result<(), MoveDenied> {
    if !target.is_folder {
        return Err(MoveDenied::TargetNotFolder);
    }
    if dragged.id == target.id {
        return Err(MoveDenied::SelfTarget);
    }
    if contains(dragged, target.id) {
        return Err(MoveDenied::IntoOwnSubtree);
    }
    if dragged.is_folder && target.is_subfolder() {
        return Err(MoveDenied::FolderIntoSubfolder);
    }
    Ok(())
}

pub fn can_move(dragged: &TreeItem, target: &TreeItem) -> bool {
    validate_move(dragged, target).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::index::find;
    use crate::tree::testutil::{item, sample_tree};

    #[test]
    fn test_no_self_move() {
        let tree = sample_tree();
        let animals = find(&tree, 1).unwrap();
        assert!(!can_move(animals, animals));
        assert_eq!(validate_move(animals, animals), Err(MoveDenied::SelfTarget));
    }

    #[test]
    fn test_no_move_into_own_descendant() {
        let tree = sample_tree();
        let animals = find(&tree, 1).unwrap();
        let pets = find(&tree, 4).unwrap();
        assert_eq!(validate_move(animals, pets), Err(MoveDenied::IntoOwnSubtree));
    }

    #[test]
    fn test_nesting_cap() {
        let tree = sample_tree();
        let animals = find(&tree, 1).unwrap();
        let pets = find(&tree, 4).unwrap();
        // An unrelated top-level folder.
        let grammar = item(7, "Grammar", true, None, vec![]);
        assert_eq!(validate_move(&grammar, pets), Err(MoveDenied::FolderIntoSubfolder));
        assert!(can_move(&grammar, animals));
    }

    #[test]
    fn test_card_target_rejected() {
        let tree = sample_tree();
        let cat = find(&tree, 2).unwrap();
        let dog = find(&tree, 3).unwrap();
        assert_eq!(validate_move(cat, dog), Err(MoveDenied::TargetNotFolder));
    }

    #[test]
    fn test_card_into_subfolder_accepted() {
        let tree = sample_tree();
        let cat = find(&tree, 2).unwrap();
        let pets = find(&tree, 4).unwrap();
        assert!(can_move(cat, pets));
    }
}
