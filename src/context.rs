//! Application Context
//!
//! Navigation state shared via the Leptos Context API. The confirmation
//! handoff is the only value crossing the list/detail boundary: the detail
//! flow writes the just-updated code, the next list mount takes it once.

use leptos::prelude::*;

/// The two views of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
}

/// Single-slot, read-once carrier for the just-confirmed item code.
///
/// `take` clears the slot, so a list entered by any other path sees
/// nothing. Reads are untracked; the slot is navigation state, not a
/// reactive source.
#[derive(Clone, Copy)]
pub struct ConfirmationHandoff(RwSignal<Option<String>>);

impl ConfirmationHandoff {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn put(&self, code: String) {
        self.0.set(Some(code));
    }

    pub fn take(&self) -> Option<String> {
        let taken = self.0.get_untracked();
        if taken.is_some() {
            self.0.update_untracked(|slot| *slot = None);
        }
        taken
    }
}

/// App-wide navigation state provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current view - read
    pub route: ReadSignal<Route>,
    /// Current view - write
    set_route: WriteSignal<Route>,
    /// Cross-navigation confirmation slot
    pub handoff: ConfirmationHandoff,
}

impl AppContext {
    pub fn new(route: (ReadSignal<Route>, WriteSignal<Route>), handoff: ConfirmationHandoff) -> Self {
        Self {
            route: route.0,
            set_route: route.1,
            handoff,
        }
    }

    /// Open the detail view for one item
    pub fn open_detail(&self, code: String) {
        self.set_route.set(Route::Detail(code));
    }

    /// Return to the list view
    pub fn back_to_list(&self) {
        self.set_route.set(Route::List);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handoff_is_read_once() {
        let handoff = ConfirmationHandoff::new();
        handoff.put("X1".to_string());
        assert_eq!(handoff.take(), Some("X1".to_string()));
        assert_eq!(handoff.take(), None);
    }

    #[test]
    fn fresh_handoff_is_empty() {
        let handoff = ConfirmationHandoff::new();
        assert_eq!(handoff.take(), None);
    }

    #[test]
    fn slot_clears_and_accepts_a_new_code() {
        let handoff = ConfirmationHandoff::new();
        handoff.put("X1".to_string());
        assert_eq!(handoff.take(), Some("X1".to_string()));
        handoff.put("X2".to_string());
        assert_eq!(handoff.take(), Some("X2".to_string()));
        assert_eq!(handoff.take(), None);
    }

    #[test]
    fn later_put_overwrites_earlier() {
        let handoff = ConfirmationHandoff::new();
        handoff.put("X1".to_string());
        handoff.put("X2".to_string());
        assert_eq!(handoff.take(), Some("X2".to_string()));
        assert_eq!(handoff.take(), None);
    }
}
