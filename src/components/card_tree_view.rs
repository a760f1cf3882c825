//! Card Tree View Component
//!
//! Renders one category's forest as indented rows. The nested tree is
//! flattened to visible rows (collapsed subtrees skipped); each row is
//! keyed on every field that affects its rendering.

use leptos::prelude::*;

use leptos_dragdrop::DndSignals;

use crate::components::TreeNode;
use crate::store::{self, use_app_store};

#[component]
pub fn CardTreeView(category_id: u32, dnd: DndSignals) -> impl IntoView {
    let store = use_app_store();

    let rows = move || store::store_category_rows(&store, category_id);

    view! {
        <div class="tree-view">
            <For
                each=rows
                key=|(node, depth)| {
                    (
                        node.id,
                        *depth,
                        node.name.clone(),
                        node.is_expanded,
                        node.parent_id,
                        node.children.len(),
                    )
                }
                children=move |(node, depth)| {
                    view! { <TreeNode node=node depth=depth dnd=dnd /> }
                }
            />
        </div>
    }
}
