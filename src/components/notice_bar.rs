//! Notice Bar Component
//!
//! Dismissible banner for move failures and transient confirmations.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::NoticeKind;

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        {move || {
            ctx.notice.get().map(|notice| {
                let class = match notice.kind {
                    NoticeKind::Error => "notice notice-error",
                    NoticeKind::Success => "notice notice-success",
                };
                view! {
                    <div class=class>
                        <span class="notice-text">{notice.text}</span>
                        <button class="notice-dismiss" on:click=move |_| ctx.dismiss_notice()>"×"</button>
                    </div>
                }
            })
        }}
    }
}
