//! LexiBox Frontend App
//!
//! Top-level layout: notice bar, new-item form, and one panel per
//! category. Owns the store, the app context, and the full-reload
//! effect.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use wasm_bindgen::JsCast;

use leptos_dragdrop::create_dnd_signals;

use crate::commands::{self, CreateCategoryArgs};
use crate::components::{CategoryPanel, NewCardForm, NoticeBar};
use crate::context::{AddTarget, AppContext};
use crate::models::CategoryItem;
use crate::store::{self, AppState};
use crate::tree::build;

#[component]
pub fn App() -> impl IntoView {
    // State
    let store = Store::new(AppState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (adding_under, set_adding_under) = signal::<Option<AddTarget>>(None);
    let (current_collection, _set_current_collection) = signal(1u32); // Default collection ID = 1
    let (new_category, set_new_category) = signal(String::new());

    let ctx = AppContext::new(
        (reload_trigger, set_reload_trigger),
        (adding_under, set_adding_under),
        current_collection,
    );

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    let dnd = create_dnd_signals();

    // Full reload when the collection or the trigger changes. Expansion
    // state is collected first so it survives the rebuild.
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let collection = current_collection.get();
        log::info!("loading hierarchy for collection {collection}, trigger={trigger}");
        spawn_local(async move {
            let expanded = store::store_expanded_ids(&store);
            match commands::fetch_hierarchy(collection).await {
                Ok(raw) => {
                    log::info!("loaded {} categories", raw.len());
                    store::store_set(&store, build::build_forest(&raw, &expanded));
                }
                Err(err) => {
                    log::error!("hierarchy load failed: {err}");
                    ctx.error(format!("Failed to load collection: {err}"));
                }
            }
        });
    });

    let create_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let category_name = new_category.get();
        if category_name.is_empty() {
            return;
        }
        let collection_id = current_collection.get();
        spawn_local(async move {
            let args = CreateCategoryArgs { name: &category_name, collection_id };
            match commands::create_category(&args).await {
                Ok(created) => {
                    store::store_add_category(
                        &store,
                        CategoryItem { id: created.id, name: created.name, children: Vec::new() },
                    );
                    set_new_category.set(String::new());
                }
                Err(err) => ctx.error(format!("Create failed: {err}")),
            }
        });
    };

    let category_ids = move || store::store_category_ids(&store);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"LexiBox"</h1>
                <form class="new-category-form" on:submit=create_category>
                    <input
                        type="text"
                        placeholder="New category..."
                        prop:value=move || new_category.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_new_category.set(input.value());
                        }
                    />
                    <button type="submit">"Add"</button>
                </form>
                <button class="reload-btn" on:click=move |_| ctx.reload()>"⟳"</button>
            </header>

            <NoticeBar />
            <NewCardForm />

            <main class="category-columns">
                <For
                    each=category_ids
                    key=|id| *id
                    children=move |category_id| {
                        view! { <CategoryPanel category_id=category_id dnd=dnd /> }
                    }
                />
            </main>
        </div>
    }
}
