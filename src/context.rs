//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::coordinator::MoveCoordinator;
use crate::models::Notice;

/// Where a new card or folder will be created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AddTarget {
    pub category_id: u32,
    /// None creates directly under the category.
    pub parent_id: Option<u32>,
    /// Set when the parent is a subfolder, which may hold cards only.
    pub cards_only: bool,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the whole forest from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    /// Where to create the next new item (None = form hidden) - read
    pub adding_under: ReadSignal<Option<AddTarget>>,
    set_adding_under: WriteSignal<Option<AddTarget>>,
    /// Current collection ID
    pub current_collection: ReadSignal<u32>,
    /// Dismissible user-facing message
    pub notice: RwSignal<Option<Notice>>,
    /// Per-item serialization of in-flight moves
    pub moves: RwSignal<MoveCoordinator>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        adding_under: (ReadSignal<Option<AddTarget>>, WriteSignal<Option<AddTarget>>),
        current_collection: ReadSignal<u32>,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            adding_under: adding_under.0,
            set_adding_under: adding_under.1,
            current_collection,
            notice: RwSignal::new(None),
            moves: RwSignal::new(MoveCoordinator::new()),
        }
    }

    /// Trigger a full reload of the forest
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Set creation target for the new-item form
    pub fn set_adding_under(&self, target: Option<AddTarget>) {
        self.set_adding_under.set(target);
    }

    /// Surface an error until the user dismisses it
    pub fn error(&self, text: impl Into<String>) {
        self.notice.set(Some(Notice::error(text)));
    }

    /// Surface a transient success message, auto-dismissed unless a
    /// newer notice replaced it first
    pub fn success(&self, text: impl Into<String>) {
        let notice = Notice::success(text);
        self.notice.set(Some(notice.clone()));
        let signal = self.notice;
        spawn_local(async move {
            TimeoutFuture::new(2_500).await;
            if let Some(current) = signal.try_get_untracked() {
                if current.as_ref() == Some(&notice) {
                    let _ = signal.try_set(None);
                }
            }
        });
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }
}
