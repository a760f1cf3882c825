//! Move Menu Component
//!
//! Explicit "move to…" destination picker. Shares the validator and
//! the optimistic coordinator with drag-and-drop, but needs no pointer
//! drag, so it also serves touch devices.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::coordinator::{submit_move, MoveRequest};
use crate::forest::{self, MoveDestination};
use crate::models::CategoryItem;
use crate::store::{self, use_app_store};

#[component]
pub fn MoveMenu(item_id: u32, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let targets = move || {
        store::store_with(&store, |categories| {
            forest::move_targets(categories, item_id)
                .into_iter()
                .map(|dest| (destination_label(categories, dest), dest))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
    };

    view! {
        <div class="move-menu">
            <div class="move-menu-title">"Move to…"</div>
            <For
                each=targets
                key=|(label, dest)| (dest.category_id, dest.parent_id, label.clone())
                children=move |(label, dest)| {
                    view! {
                        <button
                            class="move-menu-entry"
                            on:click=move |_| {
                                submit_move(store, ctx, MoveRequest { item_id, dest });
                                on_close.run(());
                            }
                        >
                            {label}
                        </button>
                    }
                }
            />
            <button class="move-menu-cancel" on:click=move |_| on_close.run(())>"Cancel"</button>
        </div>
    }
}

fn destination_label(categories: &[CategoryItem], dest: MoveDestination) -> String {
    let category = categories
        .iter()
        .find(|c| c.id == dest.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("?");
    match dest.parent_id.and_then(|pid| forest::find_item(categories, pid)) {
        Some(folder) => format!("{category} / {}", folder.name),
        None => category.to_string(),
    }
}
