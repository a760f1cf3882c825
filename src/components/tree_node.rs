//! Tree Node Component
//!
//! A single folder/card row: expansion toggle, inline rename, add
//! child, delete, the move menu, and the drag-and-drop wiring. Drops
//! are re-validated by the coordinator against current state, since the
//! identity recorded at dragstart may be stale by drop time.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use leptos_dragdrop::{
    make_on_dragend, make_on_dragleave, make_on_dragover, make_on_dragstart, make_on_drop,
    DndSignals, DragSource, DropTarget,
};

use crate::commands::{self, ApiError};
use crate::components::{DeleteConfirmButton, MoveMenu};
use crate::context::{AddTarget, AppContext};
use crate::coordinator::{submit_move, MoveRequest};
use crate::forest::{self, MoveDestination};
use crate::models::TreeItem;
use crate::store::{self, use_app_store};
use crate::tree::mutate::NodePatch;
use crate::tree::rules;

#[component]
pub fn TreeNode(node: Arc<TreeItem>, depth: usize, dnd: DndSignals) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let id = node.id;
    let is_folder = node.is_folder;
    let is_expanded = node.is_expanded;
    let has_children = !node.children.is_empty();
    let is_subfolder = node.is_subfolder();
    let category_id = node.category_id;
    let parent_id = node.parent_id;
    let indent = depth * 24;

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let (menu_open, set_menu_open) = signal(false);

    // ========================
    // Inline rename
    // ========================

    let current_name =
        move || store::store_with(&store, |c| forest::find_item(c, id).map(|n| n.name.clone())).flatten();

    let start_editing = move |_| {
        if let Some(current) = current_name() {
            set_draft.set(current);
            set_editing.set(true);
        }
    };

    // Local echo only after the remote rename succeeded.
    let submit_rename = move || {
        set_editing.set(false);
        let new_name = draft.get_untracked();
        if new_name.is_empty() || current_name().as_deref() == Some(new_name.as_str()) {
            return;
        }
        spawn_local(async move {
            match commands::rename_card(id, &new_name).await {
                Ok(updated) => store::store_update_item(&store, id, &NodePatch::rename(updated.name)),
                Err(ApiError::Gone) => store::store_remove_item(&store, id),
                Err(err) => ctx.error(format!("Rename failed: {err}")),
            }
        });
    };

    // ========================
    // Drag and drop
    // ========================

    let source = DragSource { id, is_folder, parent_id, category_id };
    let start_drag = make_on_dragstart(dnd, source);
    let on_dragstart = move |ev: web_sys::DragEvent| {
        // Serialized per item: no new drag while a move is in flight.
        if ctx.moves.with_untracked(|moves| moves.is_in_flight(id)) {
            ev.prevent_default();
            return;
        }
        start_drag(ev);
    };
    let on_dragend = make_on_dragend(dnd);

    let accepts = move |src: &DragSource| {
        store::store_with(&store, |categories| {
            let Some(dragged) = forest::find_item(categories, src.id) else {
                return false;
            };
            let Some(target) = forest::find_item(categories, id) else {
                return false;
            };
            rules::can_move(dragged, target)
        })
        .unwrap_or(false)
    };
    let on_dragover = make_on_dragover(dnd, DropTarget::Folder(id), accepts);
    let on_dragleave = make_on_dragleave(dnd, DropTarget::Folder(id));
    let on_drop = make_on_drop(dnd, DropTarget::Folder(id), move |src, _target| {
        let dest = MoveDestination { category_id, parent_id: Some(id) };
        submit_move(store, ctx, MoveRequest { item_id: src.id, dest });
    });

    let is_dragging = move || dnd.dragging.get().map(|s| s.id) == Some(id);
    let is_drop_target = move || dnd.hover.get() == Some(DropTarget::Folder(id));
    let row_class = move || {
        let mut c = String::from("tree-node");
        if is_dragging() {
            c.push_str(" dragging");
        }
        if is_drop_target() {
            c.push_str(" drop-target");
        }
        c
    };

    view! {
        <div
            class=row_class
            style=format!("margin-left: {}px;", indent)
            draggable="true"
            on:dragstart=on_dragstart
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
            on:dragend=on_dragend
        >
            // Expansion toggle (UI state only, never sent to the backend)
            {if is_folder {
                view! {
                    <button class="expand-btn" on:click=move |_| store::store_toggle_expanded(&store, id)>
                        {if is_expanded { "▼" } else { "▶" }}
                    </button>
                }.into_any()
            } else {
                view! { <span class="expand-placeholder">"·"</span> }.into_any()
            }}

            <span class="node-icon">{if is_folder { "📁" } else { "📄" }}</span>

            <Show when=move || !editing.get()>
                <span class="node-name" on:dblclick=start_editing>{move || current_name().unwrap_or_default()}</span>
            </Show>
            <Show when=move || editing.get()>
                <input
                    class="rename-input"
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_draft.set(input.value());
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        match ev.key().as_str() {
                            "Enter" => submit_rename(),
                            "Escape" => set_editing.set(false),
                            _ => {}
                        }
                    }
                    on:blur=move |_| set_editing.set(false)
                />
            </Show>

            // Add child (folders only; subfolders take cards only)
            {is_folder.then(|| view! {
                <button
                    class="add-child-btn"
                    on:click=move |_| {
                        ctx.set_adding_under(Some(AddTarget {
                            category_id,
                            parent_id: Some(id),
                            cards_only: is_subfolder,
                        }))
                    }
                >
                    "+"
                </button>
            })}

            // Non-drag move path
            <button class="move-btn" on:click=move |_| set_menu_open.update(|open| *open = !*open)>
                "⇢"
            </button>
            <Show when=move || menu_open.get()>
                <MoveMenu item_id=id on_close=Callback::new(move |_| set_menu_open.set(false)) />
            </Show>

            <DeleteConfirmButton
                button_class="delete-btn"
                on_confirm=Callback::new(move |_| {
                    spawn_local(async move {
                        let result = if has_children {
                            commands::delete_card_bulk(id).await
                        } else {
                            commands::delete_card(id).await
                        };
                        match result {
                            // Gone means already deleted server-side.
                            Ok(()) | Err(ApiError::Gone) => store::store_remove_item(&store, id),
                            Err(err) => ctx.error(format!("Delete failed: {err}")),
                        }
                    });
                })
            />
        </div>
    }
}
