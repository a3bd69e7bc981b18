//! Movie list store.

use moviequotes_api_models::{Movie, MovieDraft, MovieId, Quote};

use super::list::{ListStore, Resource};
use crate::remote::RequestBody;
use crate::remote::forms::movie_body;

impl Resource for Movie {
    type Id = MovieId;
    type Draft = MovieDraft;
    type Patch = MovieDraft;

    const KIND: &'static str = "movie";
    const COLLECTION: &'static str = "/api/movies";

    fn id(&self) -> MovieId {
        self.id
    }

    fn draft_body(draft: &MovieDraft) -> RequestBody {
        movie_body(draft)
    }

    fn patch_body(patch: &MovieDraft) -> RequestBody {
        movie_body(patch)
    }
}

/// Paginated list of the user's movies.
pub type MoviesStore = ListStore<Movie>;

impl ListStore<Movie> {
    /// Quotes of a movie fetched on its own.
    ///
    /// Empty until [`ListStore::get_one`] or [`ListStore::refresh`] ran for
    /// the movie.
    #[must_use]
    pub fn quotes_of(&self, movie_id: MovieId) -> Vec<Quote> {
        self.get(movie_id)
            .map(|movie| movie.quotes)
            .unwrap_or_default()
    }
}
