//! Global Application State Store
//!
//! Holds the multi-category forest in a reactive store. All access
//! goes through the helper functions here: tracked reads for rendering,
//! untracked reads plus try-writes for the mutation paths, so an
//! in-flight continuation resolving after unmount is a silent no-op.

use std::collections::HashSet;
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands::{self, ApiError};
use crate::context::AppContext;
use crate::forest;
use crate::models::{CategoryItem, TreeItem};
use crate::tree::build;
use crate::tree::index::flatten_visible;
use crate::tree::mutate::NodePatch;

/// Global application state.
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// One forest per category, canonical order maintained throughout.
    pub categories: Vec<CategoryItem>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Untracked clone of the forest. Cheap: subtrees are `Arc`-shared.
pub fn store_snapshot(store: &AppStore) -> Option<Vec<CategoryItem>> {
    store.categories().try_read_untracked().map(|guard| guard.clone())
}

/// Untracked borrow of the forest, for allocation-light checks.
pub fn store_with<R>(store: &AppStore, f: impl FnOnce(&[CategoryItem]) -> R) -> Option<R> {
    store.categories().try_read_untracked().map(|guard| f(&guard))
}

/// Install a new forest. Returns false when the store is disposed.
pub fn store_set(store: &AppStore, categories: Vec<CategoryItem>) -> bool {
    match store.categories().try_write() {
        Some(mut guard) => {
            *guard = categories;
            true
        }
        None => false,
    }
}

/// Read-modify-write through a pure forest edit.
pub fn store_apply(store: &AppStore, edit: impl FnOnce(&[CategoryItem]) -> Vec<CategoryItem>) -> bool {
    let Some(current) = store_snapshot(store) else {
        return false;
    };
    store_set(store, edit(&current))
}

/// Tracked list of category ids, in display order.
pub fn store_category_ids(store: &AppStore) -> Vec<u32> {
    store.categories().read().iter().map(|c| c.id).collect()
}

/// Tracked name of one category.
pub fn store_category_name(store: &AppStore, category_id: u32) -> String {
    store
        .categories()
        .read()
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

/// Tracked visible rows of one category, with depth for indentation.
pub fn store_category_rows(store: &AppStore, category_id: u32) -> Vec<(Arc<TreeItem>, usize)> {
    store
        .categories()
        .read()
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| flatten_visible(&c.children))
        .unwrap_or_default()
}

pub fn store_update_item(store: &AppStore, id: u32, patch: &NodePatch) {
    store_apply(store, |categories| forest::update_item(categories, id, patch));
}

pub fn store_remove_item(store: &AppStore, id: u32) {
    store_apply(store, |categories| forest::remove_item(categories, id));
}

pub fn store_insert_item(store: &AppStore, parent_id: Option<u32>, node: TreeItem) {
    store_apply(store, |categories| forest::insert_item(categories, parent_id, node));
}

pub fn store_toggle_expanded(store: &AppStore, id: u32) {
    store_apply(store, |categories| forest::toggle_expanded(categories, id));
}

pub fn store_add_category(store: &AppStore, category: CategoryItem) {
    if let Some(mut guard) = store.categories().try_write() {
        guard.push(category);
    }
}

pub fn store_rename_category(store: &AppStore, category_id: u32, name: String) {
    store_apply(store, |categories| forest::rename_category(categories, category_id, &name));
}

pub fn store_remove_category(store: &AppStore, category_id: u32) {
    store_apply(store, |categories| forest::remove_category(categories, category_id));
}

/// Ids expanded right now, fed back into the builder on reload so the
/// user's expansion survives a rebuild.
pub fn store_expanded_ids(store: &AppStore) -> HashSet<u32> {
    store_with(store, forest::expanded_ids).unwrap_or_default()
}

/// Re-fetch a single category's hierarchy and swap it in, leaving the
/// sibling categories' in-memory state alone. Used after localized
/// operations (bulk add, generation jobs) instead of a full reload.
pub fn refresh_category(store: AppStore, ctx: AppContext, category_id: u32) {
    spawn_local(async move {
        let expanded = store_expanded_ids(&store);
        match commands::fetch_category(category_id).await {
            Ok(raw) => {
                let children = build::build_tree(&raw.children, &expanded);
                store_apply(&store, |categories| {
                    forest::replace_children(categories, category_id, children)
                });
            }
            Err(ApiError::Gone) => {
                // Deleted elsewhere; reflect the removal.
                store_remove_category(&store, category_id);
            }
            Err(err) => {
                log::error!("refresh of category {category_id} failed: {err}");
                ctx.error(format!("Failed to refresh category: {err}"));
            }
        }
    });
}
