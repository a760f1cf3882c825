//! Category Forest
//!
//! Routing layer over the list of category forests: finds which
//! category currently owns an id and applies the tree mutators there,
//! including moves that cross category boundaries. Pure functions,
//! same structure-sharing discipline as the tree mutators.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{CategoryItem, TreeItem};
use crate::tree::index::{contains, find};
use crate::tree::mutate::{self, NodePatch};
use crate::tree::rules;

/// Where a move lands: a category plus an optional folder inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDestination {
    pub category_id: u32,
    /// None drops the item directly under the category.
    pub parent_id: Option<u32>,
}

/// Id of the category whose forest currently holds `id`.
pub fn owning_category(categories: &[CategoryItem], id: u32) -> Option<u32> {
    categories
        .iter()
        .find(|category| category.children.iter().any(|root| contains(root, id)))
        .map(|category| category.id)
}

/// Find an item anywhere in the multi-category forest.
pub fn find_item<'a>(categories: &'a [CategoryItem], id: u32) -> Option<&'a Arc<TreeItem>> {
    categories.iter().find_map(|category| find(&category.children, id))
}

/// Apply a field patch to `id` in whichever forest holds it.
pub fn update_item(categories: &[CategoryItem], id: u32, patch: &NodePatch) -> Vec<CategoryItem> {
    map_owning(categories, id, |children| mutate::update(children, id, patch))
}

/// Flip the expansion flag on `id`.
pub fn toggle_expanded(categories: &[CategoryItem], id: u32) -> Vec<CategoryItem> {
    let Some(node) = find_item(categories, id) else {
        return categories.to_vec();
    };
    update_item(categories, id, &NodePatch::expanded(!node.is_expanded))
}

/// Remove `id` (and its subtree) from whichever forest holds it.
pub fn remove_item(categories: &[CategoryItem], id: u32) -> Vec<CategoryItem> {
    map_owning(categories, id, |children| mutate::remove(children, id))
}

/// Local echo of a remote create: insert a fresh node into its
/// category, under `parent_id` or at the category root.
pub fn insert_item(
    categories: &[CategoryItem],
    parent_id: Option<u32>,
    node: TreeItem,
) -> Vec<CategoryItem> {
    let category_id = node.category_id;
    categories
        .iter()
        .map(|category| {
            if category.id != category_id {
                return category.clone();
            }
            match mutate::insert(&category.children, parent_id, Arc::new(node.clone())) {
                Some(children) => CategoryItem { children, ..category.clone() },
                None => {
                    log::warn!("insert: parent {parent_id:?} missing in category {category_id}");
                    category.clone()
                }
            }
        })
        .collect()
}

/// Category-level rename: metadata only, never routed into a forest.
pub fn rename_category(categories: &[CategoryItem], category_id: u32, name: &str) -> Vec<CategoryItem> {
    categories
        .iter()
        .map(|category| {
            if category.id == category_id {
                CategoryItem { name: name.to_string(), ..category.clone() }
            } else {
                category.clone()
            }
        })
        .collect()
}

pub fn remove_category(categories: &[CategoryItem], category_id: u32) -> Vec<CategoryItem> {
    categories
        .iter()
        .filter(|category| category.id != category_id)
        .cloned()
        .collect()
}

/// Swap in a freshly fetched forest for one category, leaving sibling
/// categories' in-memory state untouched.
pub fn replace_children(
    categories: &[CategoryItem],
    category_id: u32,
    children: Vec<Arc<TreeItem>>,
) -> Vec<CategoryItem> {
    categories
        .iter()
        .map(|category| {
            if category.id == category_id {
                CategoryItem { children: children.clone(), ..category.clone() }
            } else {
                category.clone()
            }
        })
        .collect()
}

/// Reparent `id` to `dest`, within one category or across two. A
/// cross-category move retags `category_id` on the whole moved subtree.
/// Structurally impossible destinations are logged no-ops.
pub fn move_item(categories: &[CategoryItem], id: u32, dest: MoveDestination) -> Vec<CategoryItem> {
    let Some(source_id) = owning_category(categories, id) else {
        log::warn!("move: item {id} not found in any category, forest unchanged");
        return categories.to_vec();
    };

    if source_id == dest.category_id {
        return map_owning(categories, id, |children| {
            mutate::move_node(children, id, dest.parent_id)
        });
    }

    let Some(target_category) = categories.iter().find(|c| c.id == dest.category_id) else {
        log::warn!("move: destination category {} missing, forest unchanged", dest.category_id);
        return categories.to_vec();
    };
    if let Some(pid) = dest.parent_id {
        match find(&target_category.children, pid) {
            Some(target) if target.is_folder => {}
            _ => {
                log::warn!("move: destination {pid} missing or not a folder, forest unchanged");
                return categories.to_vec();
            }
        }
    }

    let Some(source_category) = categories.iter().find(|c| c.id == source_id) else {
        return categories.to_vec();
    };
    let (source_children, detached) = mutate::detach(&source_category.children, id);
    let Some(moved) = detached else {
        return categories.to_vec();
    };
    let moved = retag(&moved, dest.category_id);
    let Some(target_children) = mutate::insert(&target_category.children, dest.parent_id, moved)
    else {
        return categories.to_vec();
    };

    categories
        .iter()
        .map(|category| {
            if category.id == source_id {
                CategoryItem { children: source_children.clone(), ..category.clone() }
            } else if category.id == dest.category_id {
                CategoryItem { children: target_children.clone(), ..category.clone() }
            } else {
                category.clone()
            }
        })
        .collect()
}

/// Legal "move to…" destinations for `id`: every category root plus
/// every folder the rules accept, minus the spot it already occupies.
/// Backs the non-drag fallback path (the only path on touch devices).
pub fn move_targets(categories: &[CategoryItem], id: u32) -> Vec<MoveDestination> {
    let Some(dragged) = find_item(categories, id) else {
        return Vec::new();
    };
    let current_category = owning_category(categories, id);
    let mut targets = Vec::new();
    for category in categories {
        if !(dragged.parent_id.is_none() && current_category == Some(category.id)) {
            targets.push(MoveDestination { category_id: category.id, parent_id: None });
        }
        for node in crate::tree::index::flatten(&category.children) {
            if dragged.parent_id != Some(node.id) && rules::can_move(dragged, &node) {
                targets.push(MoveDestination {
                    category_id: category.id,
                    parent_id: Some(node.id),
                });
            }
        }
    }
    targets
}

/// Ids currently expanded anywhere, collected before a full reload.
pub fn expanded_ids(categories: &[CategoryItem]) -> HashSet<u32> {
    let mut ids = HashSet::new();
    fn walk(tree: &[Arc<TreeItem>], ids: &mut HashSet<u32>) {
        for node in tree {
            if node.is_expanded {
                ids.insert(node.id);
            }
            walk(&node.children, ids);
        }
    }
    for category in categories {
        walk(&category.children, &mut ids);
    }
    ids
}

fn map_owning(
    categories: &[CategoryItem],
    id: u32,
    edit: impl Fn(&[Arc<TreeItem>]) -> Vec<Arc<TreeItem>>,
) -> Vec<CategoryItem> {
    categories
        .iter()
        .map(|category| {
            if category.children.iter().any(|root| contains(root, id)) {
                CategoryItem { children: edit(&category.children), ..category.clone() }
            } else {
                category.clone()
            }
        })
        .collect()
}

fn retag(node: &Arc<TreeItem>, category_id: u32) -> Arc<TreeItem> {
    let mut retagged = (**node).clone();
    retagged.category_id = category_id;
    retagged.children = retagged
        .children
        .iter()
        .map(|child| retag(child, category_id))
        .collect();
    Arc::new(retagged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::index::flatten;
    use crate::tree::testutil::{item, sample_tree};

    /// Vocabulary(10) with the sample tree, Phrases(20) with one folder.
    fn sample_forest() -> Vec<CategoryItem> {
        let idioms = item(6, "Idioms", true, None, vec![]);
        let idioms = Arc::new(TreeItem { category_id: 20, ..(*idioms).clone() });
        vec![
            CategoryItem { id: 10, name: "Vocabulary".into(), children: sample_tree() },
            CategoryItem { id: 20, name: "Phrases".into(), children: vec![idioms] },
        ]
    }

    #[test]
    fn test_update_routes_to_owning_category() {
        let forest = sample_forest();
        let renamed = update_item(&forest, 6, &NodePatch::rename("Sayings"));
        assert_eq!(find_item(&renamed, 6).unwrap().name, "Sayings");
        // Sibling category untouched, structurally shared.
        assert_eq!(renamed[0], forest[0]);
    }

    #[test]
    fn test_owning_category_lookup() {
        let forest = sample_forest();
        assert_eq!(owning_category(&forest, 5), Some(10));
        assert_eq!(owning_category(&forest, 6), Some(20));
        assert_eq!(owning_category(&forest, 99), None);
    }

    #[test]
    fn test_toggle_expanded_flips_flag() {
        let forest = sample_forest();
        let toggled = toggle_expanded(&forest, 1);
        assert!(find_item(&toggled, 1).unwrap().is_expanded);
        let toggled = toggle_expanded(&toggled, 1);
        assert!(!find_item(&toggled, 1).unwrap().is_expanded);
    }

    #[test]
    fn test_move_within_category() {
        let forest = sample_forest();
        let moved = move_item(&forest, 2, MoveDestination { category_id: 10, parent_id: Some(4) });
        let pets = find_item(&moved, 4).unwrap();
        let names: Vec<&str> = pets.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Cat", "Fish"]);
    }

    #[test]
    fn test_cross_category_move_retags_subtree() {
        let forest = sample_forest();
        let moved = move_item(&forest, 4, MoveDestination { category_id: 20, parent_id: Some(6) });
        assert_eq!(owning_category(&moved, 4), Some(20));
        let pets = find_item(&moved, 4).unwrap();
        assert_eq!(pets.category_id, 20);
        assert_eq!(pets.parent_id, Some(6));
        // The card inside the moved folder is retagged too.
        assert_eq!(find_item(&moved, 5).unwrap().category_id, 20);
        // Total node count is preserved across both forests.
        let count = |f: &[CategoryItem]| f.iter().map(|c| flatten(&c.children).len()).sum::<usize>();
        assert_eq!(count(&moved), count(&forest));
    }

    #[test]
    fn test_cross_category_move_to_root() {
        let forest = sample_forest();
        let moved = move_item(&forest, 2, MoveDestination { category_id: 20, parent_id: None });
        let cat = find_item(&moved, 2).unwrap();
        assert_eq!(cat.parent_id, None);
        assert_eq!(cat.category_id, 20);
        assert!(find(&moved[0].children, 2).is_none());
    }

    #[test]
    fn test_move_to_missing_destination_is_noop() {
        let forest = sample_forest();
        let unchanged = move_item(&forest, 2, MoveDestination { category_id: 99, parent_id: None });
        assert_eq!(unchanged, forest);
        let unchanged = move_item(&forest, 2, MoveDestination { category_id: 20, parent_id: Some(99) });
        assert_eq!(unchanged, forest);
    }

    #[test]
    fn test_replace_children_leaves_siblings_alone() {
        let forest = sample_forest();
        let refreshed = replace_children(&forest, 20, vec![]);
        assert!(refreshed[1].children.is_empty());
        assert_eq!(refreshed[0], forest[0]);
    }

    #[test]
    fn test_category_rename_is_metadata_only() {
        let forest = sample_forest();
        let renamed = rename_category(&forest, 20, "Expressions");
        assert_eq!(renamed[1].name, "Expressions");
        assert_eq!(renamed[1].children, forest[1].children);
    }

    #[test]
    fn test_move_targets_respect_rules() {
        let forest = sample_forest();
        // Card 2 (in folder 1, category 10) may go to either category
        // root, subfolder 4, or folder 6, but not back to its current
        // parent 1.
        let targets = move_targets(&forest, 2);
        assert!(targets.contains(&MoveDestination { category_id: 10, parent_id: None }));
        assert!(targets.contains(&MoveDestination { category_id: 20, parent_id: None }));
        assert!(targets.contains(&MoveDestination { category_id: 10, parent_id: Some(4) }));
        assert!(targets.contains(&MoveDestination { category_id: 20, parent_id: Some(6) }));
        assert!(!targets.contains(&MoveDestination { category_id: 10, parent_id: Some(1) }));

        // Folder 1 cannot enter subfolder 4 (nesting cap) or itself,
        // and it already sits at category 10's root.
        let targets = move_targets(&forest, 1);
        assert!(!targets.contains(&MoveDestination { category_id: 10, parent_id: None }));
        assert!(!targets.contains(&MoveDestination { category_id: 10, parent_id: Some(1) }));
        assert!(!targets.contains(&MoveDestination { category_id: 10, parent_id: Some(4) }));
        assert!(targets.contains(&MoveDestination { category_id: 20, parent_id: None }));
        assert!(targets.contains(&MoveDestination { category_id: 20, parent_id: Some(6) }));
    }

    #[test]
    fn test_expanded_ids_survive_collection() {
        let forest = sample_forest();
        let toggled = toggle_expanded(&forest, 1);
        let toggled = toggle_expanded(&toggled, 4);
        assert_eq!(expanded_ids(&toggled), [1, 4].into_iter().collect());
    }
}
