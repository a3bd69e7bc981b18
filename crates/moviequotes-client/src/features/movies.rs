//! Movie create and edit forms.

use std::sync::Arc;

use moviequotes_api_models::{Locale, Movie, MovieDraft, MovieId};
use moviequotes_events::{EventBus, UiEvent};
use tracing::info;

use super::surface;
use crate::error::ActionResult;
use crate::navigation::Navigator;
use crate::stores::{Modal, MoviesStore, UiStore};

/// Submits movie forms and keeps the movie list and dialogs in sync.
pub struct MovieForms {
    movies: Arc<MoviesStore>,
    ui: Arc<UiStore>,
    navigator: Arc<dyn Navigator>,
    events: EventBus,
    locale: Locale,
}

impl MovieForms {
    /// Forms writing into `movies`.
    #[must_use]
    pub fn new(
        movies: Arc<MoviesStore>,
        ui: Arc<UiStore>,
        navigator: Arc<dyn Navigator>,
        events: EventBus,
        locale: Locale,
    ) -> Self {
        Self {
            movies,
            ui,
            navigator,
            events,
            locale,
        }
    }

    /// Create a movie; on success it heads the list and the form closes.
    ///
    /// # Errors
    ///
    /// Returns the rejection; its summary message is also shown above the
    /// form and the list is left untouched.
    pub async fn create(&self, draft: &MovieDraft) -> ActionResult<Movie> {
        self.ui.set_movie_error(None);
        match self.movies.create(draft).await {
            Ok(movie) => {
                self.ui.close(Modal::AddMovie);
                self.ui.open(Modal::MovieAdded);
                self.events.publish(UiEvent::MovieAdded { movie_id: movie.id });
                info!(movie_id = %movie.id, "movie added");
                Ok(movie)
            }
            Err(err) => {
                let err = surface(err, self.locale, self.navigator.as_ref(), "create movie").await;
                self.ui.set_movie_error(err.message().map(str::to_string));
                Err(err)
            }
        }
    }

    /// Replace a movie; on success the edit dialog closes.
    ///
    /// # Errors
    ///
    /// Returns the rejection; the cached movie is left untouched and the
    /// dialog stays open.
    pub async fn edit(&self, id: MovieId, draft: &MovieDraft) -> ActionResult<Movie> {
        self.ui.set_movie_error(None);
        match self.movies.edit(id, draft).await {
            Ok(movie) => {
                self.ui.close(Modal::EditMovie);
                self.events.publish(UiEvent::MovieUpdated { movie_id: id });
                info!(movie_id = %id, "movie updated");
                Ok(movie)
            }
            Err(err) => {
                let err = surface(err, self.locale, self.navigator.as_ref(), "edit movie").await;
                self.ui.set_movie_error(err.message().map(str::to_string));
                Err(err)
            }
        }
    }
}
