//! Category Panel Component
//!
//! One category: header with rename/add/refresh/delete plus the card
//! tree. The header doubles as the drop target for moves to the
//! category root.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use leptos_dragdrop::{
    make_on_dragleave, make_on_dragover, make_on_drop, DndSignals, DragSource, DropTarget,
};

use crate::commands::{self, ApiError};
use crate::components::{CardTreeView, DeleteConfirmButton};
use crate::context::{AddTarget, AppContext};
use crate::coordinator::{submit_move, MoveRequest};
use crate::forest::{self, MoveDestination};
use crate::store::{self, use_app_store};

#[component]
pub fn CategoryPanel(category_id: u32, dnd: DndSignals) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let name = move || store::store_category_name(&store, category_id);

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());

    let submit_rename = move || {
        set_editing.set(false);
        let new_name = draft.get_untracked();
        if new_name.is_empty() || new_name == name() {
            return;
        }
        spawn_local(async move {
            match commands::rename_category(category_id, &new_name).await {
                Ok(updated) => store::store_rename_category(&store, category_id, updated.name),
                Err(ApiError::Gone) => store::store_remove_category(&store, category_id),
                Err(err) => ctx.error(format!("Rename failed: {err}")),
            }
        });
    };

    // Dropping on the header reparents to the category root. Legal for
    // anything not already sitting at this category's root.
    let accepts = move |src: &DragSource| {
        store::store_with(&store, |categories| match forest::find_item(categories, src.id) {
            Some(node) => !(node.parent_id.is_none() && node.category_id == category_id),
            None => false,
        })
        .unwrap_or(false)
    };
    let on_dragover = make_on_dragover(dnd, DropTarget::CategoryRoot(category_id), accepts);
    let on_dragleave = make_on_dragleave(dnd, DropTarget::CategoryRoot(category_id));
    let on_drop = make_on_drop(dnd, DropTarget::CategoryRoot(category_id), move |src, _target| {
        let dest = MoveDestination { category_id, parent_id: None };
        submit_move(store, ctx, MoveRequest { item_id: src.id, dest });
    });

    let is_drop_target = move || dnd.hover.get() == Some(DropTarget::CategoryRoot(category_id));
    let header_class = move || {
        if is_drop_target() {
            "category-header drop-target"
        } else {
            "category-header"
        }
    };

    view! {
        <section class="category-panel">
            <div
                class=header_class
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
            >
                <Show when=move || !editing.get()>
                    <h2
                        class="category-name"
                        on:dblclick=move |_| {
                            set_draft.set(name());
                            set_editing.set(true);
                        }
                    >
                        {name}
                    </h2>
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

                <button
                    class="add-root-btn"
                    on:click=move |_| {
                        ctx.set_adding_under(Some(AddTarget {
                            category_id,
                            parent_id: None,
                            cards_only: false,
                        }))
                    }
                >
                    "+"
                </button>

                // Re-fetch just this category (after generation jobs etc.)
                <button
                    class="refresh-btn"
                    on:click=move |_| store::refresh_category(store, ctx, category_id)
                >
                    "⟳"
                </button>

                <DeleteConfirmButton
                    button_class="delete-btn"
                    on_confirm=Callback::new(move |_| {
                        spawn_local(async move {
                            match commands::delete_category_bulk(category_id).await {
                                Ok(()) | Err(ApiError::Gone) => {
                                    store::store_remove_category(&store, category_id)
                                }
                                Err(err) => ctx.error(format!("Delete failed: {err}")),
                            }
                        });
                    })
                />
            </div>

            <CardTreeView category_id=category_id dnd=dnd />
        </section>
    }
}
