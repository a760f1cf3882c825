//! New Card Form Component
//!
//! Form for creating cards and folders under the current add target.
//! Hidden until a "+" affordance picks a destination; subfolder
//! destinations offer cards only.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands::{self, CreateCardArgs};
use crate::context::AppContext;
use crate::store::{self, use_app_store};
use crate::tree::build;

#[component]
pub fn NewCardForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (new_name, set_new_name) = signal(String::new());
    let (as_folder, set_as_folder) = signal(false);

    let create_card = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if name.is_empty() {
            return;
        }
        let Some(target) = ctx.adding_under.get() else {
            return;
        };
        let is_folder = as_folder.get() && !target.cards_only;

        spawn_local(async move {
            let args = CreateCardArgs {
                name: &name,
                parent_id: target.parent_id,
                is_folder,
                category_id: target.category_id,
            };
            match commands::create_card(&args).await {
                Ok(created) => {
                    // Local echo of the remote create.
                    store::store_insert_item(&store, created.parent_id, build::from_raw(&created));
                    set_new_name.set(String::new());
                    set_as_folder.set(false);
                    ctx.set_adding_under(None);
                }
                Err(err) => ctx.error(format!("Create failed: {err}")),
            }
        });
    };

    view! {
        <Show when=move || ctx.adding_under.get().is_some()>
            <form class="new-card-form" on:submit=create_card>
                <div class="new-card-row">
                    <input
                        type="text"
                        placeholder=move || {
                            match ctx.adding_under.get().and_then(|t| t.parent_id) {
                                Some(pid) => format!("Add inside folder #{}...", pid),
                                None => "Add at category root...".to_string(),
                            }
                        }
                        prop:value=move || new_name.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_new_name.set(input.value());
                        }
                    />
                    <button type="submit">"Add"</button>
                </div>

                <div class="kind-selector-row">
                    <button
                        type="button"
                        class=move || if !as_folder.get() { "kind-btn active" } else { "kind-btn" }
                        on:click=move |_| set_as_folder.set(false)
                    >
                        "Card"
                    </button>
                    <button
                        type="button"
                        class=move || if as_folder.get() { "kind-btn active" } else { "kind-btn" }
                        disabled=move || ctx.adding_under.get().map(|t| t.cards_only).unwrap_or(false)
                        on:click=move |_| set_as_folder.set(true)
                    >
                        "Folder"
                    </button>
                </div>

                <button type="button" class="cancel-btn" on:click=move |_| ctx.set_adding_under(None)>
                    "Cancel"
                </button>
            </form>
        </Show>
    }
}
