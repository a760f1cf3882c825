//! Leptos DragDrop Utilities
//!
//! Maps native HTML5 drag events onto an explicit drag state machine
//! for Leptos: one signal for the currently dragged source, one for the
//! currently hovered valid target. Validation policy is injected by the
//! caller; this crate only handles event plumbing and visual state.
//!
//! Per gesture: `dragstart -> dragover* -> drop | dragend`. `dragend`
//! always fires and always clears, covering the no-drop cancellation
//! path. The dragover handler fires per pixel, so it stays untracked
//! and only writes the hover signal on an actual change.

use leptos::prelude::*;

/// Identity of the node being dragged, recorded at dragstart. May be
/// stale by drop time; callers re-validate against current state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSource {
    pub id: u32,
    pub is_folder: bool,
    pub parent_id: Option<u32>,
    pub category_id: u32,
}

/// Where a drop would land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget {
    /// Into a folder's children.
    Folder(u32),
    /// Directly under a category.
    CategoryRoot(u32),
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging: RwSignal<Option<DragSource>>,
    pub hover: RwSignal<Option<DropTarget>>,
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        dragging: RwSignal::new(None),
        hover: RwSignal::new(None),
    }
}

fn clear(dnd: &DndSignals) {
    dnd.dragging.set(None);
    dnd.hover.set(None);
}

/// Dragstart handler for a draggable row.
pub fn make_on_dragstart(dnd: DndSignals, source: DragSource) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        if let Some(transfer) = ev.data_transfer() {
            transfer.set_effect_allowed("move");
            let _ = transfer.set_data("text/plain", &source.id.to_string());
        }
        dnd.dragging.set(Some(source));
    }
}

/// Dragover handler for a drop candidate. `accepts` decides whether the
/// current source may land on `target`; rejection signals "no drop" via
/// the drop effect without touching any state.
pub fn make_on_dragover<F>(dnd: DndSignals, target: DropTarget, accepts: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(&DragSource) -> bool + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        let Some(source) = dnd.dragging.get_untracked() else {
            return;
        };
        if accepts(&source) {
            ev.prevent_default();
            if let Some(transfer) = ev.data_transfer() {
                transfer.set_drop_effect("move");
            }
            if dnd.hover.get_untracked() != Some(target) {
                dnd.hover.set(Some(target));
            }
        } else {
            if let Some(transfer) = ev.data_transfer() {
                transfer.set_drop_effect("none");
            }
            if dnd.hover.get_untracked() == Some(target) {
                dnd.hover.set(None);
            }
        }
    }
}

/// Dragleave handler: drop the highlight when the pointer leaves a
/// candidate it had marked.
pub fn make_on_dragleave(dnd: DndSignals, target: DropTarget) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        if dnd.hover.get_untracked() == Some(target) {
            dnd.hover.set(None);
        }
    }
}

/// Drop handler. Clears drag state and forwards the recorded source;
/// the callback is expected to re-validate before mutating anything.
pub fn make_on_drop<F>(dnd: DndSignals, target: DropTarget, on_drop: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(DragSource, DropTarget) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let source = dnd.dragging.get_untracked();
        clear(&dnd);
        if let Some(source) = source {
            on_drop(source, target);
        }
    }
}

/// Dragend handler: unconditional cleanup, runs whether or not a drop
/// happened.
pub fn make_on_dragend(dnd: DndSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        clear(&dnd);
    }
}
