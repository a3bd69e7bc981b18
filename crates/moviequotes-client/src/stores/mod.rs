//! Entity stores shared across views.

pub mod list;
pub mod movies;
pub mod quotes;
pub mod ui;
pub mod user;

pub use list::{ListStore, Resource};
pub use movies::MoviesStore;
pub use quotes::QuotesStore;
pub use ui::{Modal, UiFlags, UiStore};
pub use user::{USER_PATH, UserStore};
