//! # Slice State
//!
//! The uniform per-entity state shape every screen reads. All slices follow
//! the same request lifecycle, so the transitions live here once.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Slice Lifecycle                                   │
//! │                                                                         │
//! │            begin()                                                      │
//! │   idle ──────────────► pending (loading=true,                          │
//! │    ▲                    │       error/success cleared)                 │
//! │    │                    │                                               │
//! │    │     ┌──────────────┴──────────────┐                               │
//! │    │     ▼                             ▼                               │
//! │    │  fulfill_* (items/selected     reject (error=message,             │
//! │    │   updated, success message)     items UNCHANGED)                  │
//! │    │     │                             │                               │
//! │    └─────┴─────────────────────────────┘                               │
//! │                                                                         │
//! │  Stale guard: list fulfillments carry the sequence number issued by    │
//! │  begin(); only the latest issued sequence may write `items`.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cargodesk_core::{HasId, Pagination};

/// State for one entity's screen.
///
/// `items` is the current page in server order, except that locally created
/// records are prepended until the next list fetch.
#[derive(Debug, Clone)]
pub struct SliceState<E> {
    pub items: Vec<E>,
    /// The record open in a detail view, if any.
    pub selected: Option<E>,
    pub loading: bool,
    /// User-facing failure message from the last settled request.
    pub error: Option<String>,
    /// Server confirmation from the last successful mutation.
    pub success_message: Option<String>,
    pub pagination: Option<Pagination>,
    /// Sequence of the most recently issued request.
    issued: u64,
}

impl<E> Default for SliceState<E> {
    fn default() -> Self {
        SliceState {
            items: Vec::new(),
            selected: None,
            loading: false,
            error: None,
            success_message: None,
            pagination: None,
            issued: 0,
        }
    }
}

impl<E: HasId> SliceState<E> {
    pub fn new() -> Self {
        SliceState::default()
    }

    /// Moves to pending and issues a sequence number for the new request.
    ///
    /// Starting a request always clears the previous error and success
    /// message, so stale banners never outlive a retry.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        self.success_message = None;
        self.issued
    }

    /// Applies a list response, unless a newer request has been issued since.
    ///
    /// Returns false when the response was stale and discarded; the slice
    /// stays pending until the latest request settles.
    pub fn fulfill_list(&mut self, seq: u64, items: Vec<E>, pagination: Option<Pagination>) -> bool {
        if seq != self.issued {
            return false;
        }
        self.loading = false;
        self.items = items;
        self.pagination = pagination;
        true
    }

    /// Applies a single-record read into `selected`.
    pub fn fulfill_selected(&mut self, entity: E) {
        self.loading = false;
        self.selected = Some(entity);
    }

    /// Applies a successful create: the new record is prepended so it is
    /// immediately visible without a refetch.
    pub fn fulfill_create(&mut self, entity: E, message: String) {
        self.loading = false;
        self.items.insert(0, entity);
        self.success_message = non_empty(message);
    }

    /// Applies a successful update: the record is replaced in place by id,
    /// and `selected` refreshed when it is the same record.
    pub fn fulfill_update(&mut self, entity: E, message: String)
    where
        E: Clone,
    {
        self.loading = false;
        if let Some(existing) = self.items.iter_mut().find(|e| e.id() == entity.id()) {
            *existing = entity.clone();
        }
        if self.selected.as_ref().is_some_and(|s| s.id() == entity.id()) {
            self.selected = Some(entity);
        }
        self.success_message = non_empty(message);
    }

    /// Applies a successful delete: the record leaves `items` (and
    /// `selected`, when it was the open record).
    pub fn fulfill_delete(&mut self, id: i64, message: String) {
        self.loading = false;
        self.items.retain(|e| e.id() != id);
        if self.selected.as_ref().is_some_and(|s| s.id() == id) {
            self.selected = None;
        }
        self.success_message = non_empty(message);
    }

    /// Records a mutation that succeeded without changing this slice's rows
    /// (e.g. a nested-record operation).
    pub fn fulfill_message(&mut self, message: String) {
        self.loading = false;
        self.success_message = non_empty(message);
    }

    /// Settles the request as failed. Items are left untouched: a failed
    /// refresh never blanks a screen the user is looking at.
    pub fn reject(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

fn non_empty(message: String) -> Option<String> {
    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    impl HasId for Row {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn row(id: i64, name: &'static str) -> Row {
        Row { id, name }
    }

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut state = SliceState::<Row>::new();
        state.reject("boom".to_string());
        state.fulfill_message("ok".to_string());

        state.begin();

        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.success_message.is_none());
    }

    #[test]
    fn test_create_prepends() {
        let mut state = SliceState::new();
        let seq = state.begin();
        state.fulfill_list(seq, vec![row(1, "a"), row(2, "b")], None);

        state.begin();
        state.fulfill_create(row(3, "c"), "Created".to_string());

        assert_eq!(state.items[0].id, 3);
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.success_message.as_deref(), Some("Created"));
        assert!(!state.loading);
    }

    #[test]
    fn test_update_replaces_in_place_and_refreshes_selected() {
        let mut state = SliceState::new();
        let seq = state.begin();
        state.fulfill_list(seq, vec![row(1, "a"), row(2, "b")], None);
        state.selected = Some(row(2, "b"));

        state.begin();
        state.fulfill_update(row(2, "b2"), String::new());

        assert_eq!(state.items, vec![row(1, "a"), row(2, "b2")]);
        assert_eq!(state.selected, Some(row(2, "b2")));
        // Empty server message never becomes a banner.
        assert!(state.success_message.is_none());
    }

    #[test]
    fn test_delete_removes_and_clears_selected() {
        let mut state = SliceState::new();
        let seq = state.begin();
        state.fulfill_list(seq, vec![row(1, "a"), row(2, "b")], None);
        state.selected = Some(row(1, "a"));

        state.begin();
        state.fulfill_delete(1, "Deleted".to_string());

        assert_eq!(state.items, vec![row(2, "b")]);
        assert!(state.selected.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_reject_keeps_items() {
        let mut state = SliceState::new();
        let seq = state.begin();
        state.fulfill_list(seq, vec![row(1, "a")], None);

        state.begin();
        state.reject("Could not load order data. Please try again.".to_string());

        assert_eq!(state.items.len(), 1);
        assert!(!state.loading);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_stale_list_response_is_discarded() {
        let mut state = SliceState::new();

        let first = state.begin();
        let second = state.begin();

        // The second (newer) request settles first.
        assert!(state.fulfill_list(second, vec![row(2, "new")], None));
        // The first request's late response must not overwrite it.
        assert!(!state.fulfill_list(first, vec![row(1, "old")], None));

        assert_eq!(state.items, vec![row(2, "new")]);
    }
}
