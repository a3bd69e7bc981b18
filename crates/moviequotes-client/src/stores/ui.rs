//! Modal and banner flags toggled by controllers.
//!
//! Views read these flags to decide which dialog is open. They carry no
//! entity data.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

/// Dialogs the controllers open and close.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modal {
    /// "Add movie" form.
    AddMovie,
    /// "Movie added" confirmation.
    MovieAdded,
    /// "Edit movie" form.
    EditMovie,
    /// "Add quote" form.
    AddQuote,
    /// "Quote added" confirmation.
    QuoteAdded,
    /// "Comment added" toast.
    CommentAdded,
}

/// Snapshot of UI flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiFlags {
    /// Open dialogs.
    pub open: BTreeSet<Modal>,
    /// Server message shown above the movie form.
    pub movie_error: Option<String>,
    /// Whether the last quote edit succeeded.
    pub quote_edit_succeeded: bool,
}

impl UiFlags {
    /// Whether `modal` is open.
    #[must_use]
    pub fn is_open(&self, modal: Modal) -> bool {
        self.open.contains(&modal)
    }
}

/// Shared UI flag store.
#[derive(Default)]
pub struct UiStore {
    flags: Mutex<UiFlags>,
}

impl UiStore {
    /// All dialogs closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a dialog.
    pub fn open(&self, modal: Modal) {
        self.lock().open.insert(modal);
    }

    /// Close a dialog.
    pub fn close(&self, modal: Modal) {
        self.lock().open.remove(&modal);
    }

    /// Flip a dialog and return whether it is now open.
    pub fn toggle(&self, modal: Modal) -> bool {
        let mut flags = self.lock();
        if flags.open.remove(&modal) {
            false
        } else {
            flags.open.insert(modal);
            true
        }
    }

    /// Whether a dialog is open.
    #[must_use]
    pub fn is_open(&self, modal: Modal) -> bool {
        self.lock().is_open(modal)
    }

    /// Set or clear the movie form banner.
    pub fn set_movie_error(&self, message: Option<String>) {
        self.lock().movie_error = message;
    }

    /// Record the outcome of a quote edit.
    pub fn set_quote_edit_succeeded(&self, succeeded: bool) {
        self.lock().quote_edit_succeeded = succeeded;
    }

    /// Copy of all flags.
    #[must_use]
    pub fn snapshot(&self) -> UiFlags {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, UiFlags> {
        self.flags
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_modal() {
        let ui = UiStore::new();
        assert!(ui.toggle(Modal::AddMovie));
        assert!(ui.is_open(Modal::AddMovie));
        assert!(!ui.toggle(Modal::AddMovie));
        assert!(!ui.is_open(Modal::AddMovie));
    }

    #[test]
    fn snapshot_reflects_banners() {
        let ui = UiStore::new();
        ui.open(Modal::CommentAdded);
        ui.set_movie_error(Some("The name en field is required.".into()));
        ui.set_quote_edit_succeeded(true);
        let flags = ui.snapshot();
        assert!(flags.is_open(Modal::CommentAdded));
        assert_eq!(
            flags.movie_error.as_deref(),
            Some("The name en field is required.")
        );
        assert!(flags.quote_edit_succeeded);
        ui.close(Modal::CommentAdded);
        assert!(!ui.is_open(Modal::CommentAdded));
    }
}
