//! Optimistic Move Coordinator
//!
//! One ticket per move request: snapshot the whole multi-category
//! forest, apply the move locally so the UI updates at once, then let
//! the remote call decide between commit (drop the snapshot) and
//! rollback (restore it verbatim). Moves are serialized per item; moves
//! on different items fly concurrently with independent snapshots.

use std::collections::HashSet;

use crate::forest::{self, MoveDestination};
use crate::models::CategoryItem;
use crate::tree::rules::{self, MoveDenied};

/// A requested reparenting, possibly across categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub item_id: u32,
    pub dest: MoveDestination,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovePhase {
    Applying,
    Committed,
    RolledBack,
}

/// State of one in-flight move. Holds the pre-move snapshot; thanks to
/// `Arc`-shared subtrees, taking it is a cheap reference bump per node
/// at the top levels, not a deep copy.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTicket {
    pub request: MoveRequest,
    pub phase: MovePhase,
    snapshot: Vec<CategoryItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveError {
    Denied(MoveDenied),
    /// A move for this item is already in flight; the caller must wait
    /// for it to resolve.
    InFlight(u32),
    UnknownItem(u32),
    UnknownCategory(u32),
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::Denied(denied) => write!(f, "{denied}"),
            MoveError::InFlight(id) => write!(f, "Item {id} is still being moved"),
            MoveError::UnknownItem(id) => write!(f, "Item {id} no longer exists"),
            MoveError::UnknownCategory(id) => write!(f, "Category {id} no longer exists"),
        }
    }
}

/// Tracks which items have a move in flight and hands out tickets.
#[derive(Debug, Default)]
pub struct MoveCoordinator {
    in_flight: HashSet<u32>,
}

impl MoveCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self, item_id: u32) -> bool {
        self.in_flight.contains(&item_id)
    }

    /// Validate and optimistically apply a move. Returns the ticket and
    /// the new forest to install; the input state is untouched and
    /// lives on inside the ticket as the rollback snapshot.
    pub fn begin(
        &mut self,
        state: &[CategoryItem],
        request: MoveRequest,
    ) -> Result<(MoveTicket, Vec<CategoryItem>), MoveError> {
        if self.in_flight.contains(&request.item_id) {
            return Err(MoveError::InFlight(request.item_id));
        }
        let dragged =
            forest::find_item(state, request.item_id).ok_or(MoveError::UnknownItem(request.item_id))?;
        match request.dest.parent_id {
            Some(pid) => {
                let target = forest::find_item(state, pid).ok_or(MoveError::UnknownItem(pid))?;
                rules::validate_move(dragged, target).map_err(MoveError::Denied)?;
            }
            None => {
                if !state.iter().any(|c| c.id == request.dest.category_id) {
                    return Err(MoveError::UnknownCategory(request.dest.category_id));
                }
            }
        }

        let applied = forest::move_item(state, request.item_id, request.dest);
        self.in_flight.insert(request.item_id);
        let ticket = MoveTicket {
            request,
            phase: MovePhase::Applying,
            snapshot: state.to_vec(),
        };
        Ok((ticket, applied))
    }

    /// Remote call succeeded: the optimistic state stands, the snapshot
    /// is dropped.
    pub fn commit(&mut self, mut ticket: MoveTicket) -> MoveTicket {
        self.in_flight.remove(&ticket.request.item_id);
        ticket.snapshot = Vec::new();
        ticket.phase = MovePhase::Committed;
        ticket
    }

    /// Remote call failed: hand back the snapshot for verbatim
    /// reinstallation.
    pub fn rollback(&mut self, mut ticket: MoveTicket) -> (Vec<CategoryItem>, MoveTicket) {
        self.in_flight.remove(&ticket.request.item_id);
        let snapshot = std::mem::take(&mut ticket.snapshot);
        ticket.phase = MovePhase::RolledBack;
        (snapshot, ticket)
    }
}

/// Run a full optimistic move against the live store: validate and
/// apply locally, issue the remote call, then commit or roll back.
/// Every resolution step is a no-op if the store or context has been
/// disposed by an unmount while the call was in flight.
pub fn submit_move(store: crate::store::AppStore, ctx: crate::context::AppContext, request: MoveRequest) {
    use leptos::prelude::*;
    use leptos::task::spawn_local;

    use crate::commands::{self, ApiError};
    use crate::store::{store_apply, store_set, store_snapshot};

    let Some(state) = store_snapshot(&store) else {
        return;
    };
    let (ticket, applied) = match ctx.moves.try_update(|moves| moves.begin(&state, request)) {
        None => return,
        Some(Err(err)) => {
            ctx.error(err.to_string());
            return;
        }
        Some(Ok(begun)) => begun,
    };
    store_set(&store, applied);

    spawn_local(async move {
        let result =
            commands::move_card(request.item_id, request.dest.parent_id, request.dest.category_id).await;
        match result {
            Ok(()) => {
                if ctx.moves.try_update(|moves| moves.commit(ticket)).is_some() {
                    ctx.success("Moved");
                }
            }
            Err(ApiError::Gone) => {
                // Stale reference: gone server-side, so reflect removal
                // locally instead of rolling back.
                if ctx.moves.try_update(|moves| moves.commit(ticket)).is_none() {
                    return;
                }
                store_apply(&store, |categories| forest::remove_item(categories, request.item_id));
            }
            Err(err) => {
                let Some((snapshot, _)) = ctx.moves.try_update(|moves| moves.rollback(ticket)) else {
                    return;
                };
                store_set(&store, snapshot);
                ctx.error(format!("Move failed: {err}"));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::find_item;
    use crate::models::TreeItem;
    use crate::tree::testutil::{item, sample_tree};
    use std::sync::Arc;

    fn sample_forest() -> Vec<CategoryItem> {
        let idioms = item(6, "Idioms", true, None, vec![]);
        let idioms = Arc::new(TreeItem { category_id: 20, ..(*idioms).clone() });
        vec![
            CategoryItem { id: 10, name: "Vocabulary".into(), children: sample_tree() },
            CategoryItem { id: 20, name: "Phrases".into(), children: vec![idioms] },
        ]
    }

    fn move_req(item_id: u32, category_id: u32, parent_id: Option<u32>) -> MoveRequest {
        MoveRequest { item_id, dest: MoveDestination { category_id, parent_id } }
    }

    #[test]
    fn test_begin_applies_optimistically() {
        let state = sample_forest();
        let mut coordinator = MoveCoordinator::new();
        let (ticket, applied) = coordinator.begin(&state, move_req(2, 10, Some(4))).unwrap();
        assert_eq!(ticket.phase, MovePhase::Applying);
        assert_eq!(find_item(&applied, 2).unwrap().parent_id, Some(4));
        // Input state is left as the caller had it.
        assert_eq!(find_item(&state, 2).unwrap().parent_id, Some(1));
    }

    #[test]
    fn test_rollback_restores_snapshot_exactly() {
        let state = sample_forest();
        let mut coordinator = MoveCoordinator::new();
        // Move card 2 from folder 1 into folder 4, then simulate a
        // remote rejection.
        let (ticket, applied) = coordinator.begin(&state, move_req(2, 10, Some(4))).unwrap();
        assert_ne!(applied, state);
        let (restored, ticket) = coordinator.rollback(ticket);
        assert_eq!(ticket.phase, MovePhase::RolledBack);
        assert_eq!(restored, state);
        assert_eq!(find_item(&restored, 2).unwrap().parent_id, Some(1));
        assert!(!coordinator.is_in_flight(2));
    }

    #[test]
    fn test_cross_category_rollback_restores_both_forests() {
        let state = sample_forest();
        let mut coordinator = MoveCoordinator::new();
        let (ticket, applied) = coordinator.begin(&state, move_req(4, 20, Some(6))).unwrap();
        assert_eq!(find_item(&applied, 4).unwrap().category_id, 20);
        let (restored, _) = coordinator.rollback(ticket);
        assert_eq!(restored, state);
    }

    #[test]
    fn test_same_item_moves_are_serialized() {
        let state = sample_forest();
        let mut coordinator = MoveCoordinator::new();
        let (ticket, applied) = coordinator.begin(&state, move_req(2, 10, Some(4))).unwrap();
        assert_eq!(
            coordinator.begin(&applied, move_req(2, 10, None)).unwrap_err(),
            MoveError::InFlight(2)
        );
        // A different item may fly concurrently.
        assert!(coordinator.begin(&applied, move_req(3, 10, Some(4))).is_ok());
        // After commit the item can move again.
        let ticket = coordinator.commit(ticket);
        assert_eq!(ticket.phase, MovePhase::Committed);
        assert!(coordinator.begin(&applied, move_req(2, 10, None)).is_ok());
    }

    #[test]
    fn test_begin_rejects_illegal_moves_without_state_change() {
        let state = sample_forest();
        let mut coordinator = MoveCoordinator::new();
        // Folder into its own subfolder.
        let err = coordinator.begin(&state, move_req(1, 10, Some(4))).unwrap_err();
        assert_eq!(err, MoveError::Denied(MoveDenied::IntoOwnSubtree));
        // Unrelated folder into a subfolder: nesting cap.
        let err = coordinator.begin(&state, move_req(6, 10, Some(4))).unwrap_err();
        assert_eq!(err, MoveError::Denied(MoveDenied::FolderIntoSubfolder));
        // Nothing went in flight.
        assert!(!coordinator.is_in_flight(1));
        assert!(!coordinator.is_in_flight(6));
    }

    #[test]
    fn test_begin_unknown_ids() {
        let state = sample_forest();
        let mut coordinator = MoveCoordinator::new();
        assert_eq!(
            coordinator.begin(&state, move_req(99, 10, None)).unwrap_err(),
            MoveError::UnknownItem(99)
        );
        assert_eq!(
            coordinator.begin(&state, move_req(2, 99, None)).unwrap_err(),
            MoveError::UnknownCategory(99)
        );
    }
}
