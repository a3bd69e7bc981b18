//! Quote feed store.

use moviequotes_api_models::{MovieId, Quote, QuoteDraft, QuoteEdit, QuoteId};

use super::list::{ListStore, Resource};
use crate::remote::RequestBody;
use crate::remote::forms::{quote_body, quote_edit_body};

impl Resource for Quote {
    type Id = QuoteId;
    type Draft = QuoteDraft;
    type Patch = QuoteEdit;

    const KIND: &'static str = "quote";
    const COLLECTION: &'static str = "/api/quotes";

    fn id(&self) -> QuoteId {
        self.id
    }

    fn draft_body(draft: &QuoteDraft) -> RequestBody {
        quote_body(draft)
    }

    fn patch_body(patch: &QuoteEdit) -> RequestBody {
        quote_edit_body(patch)
    }
}

/// Paginated news feed of quotes.
pub type QuotesStore = ListStore<Quote>;

impl ListStore<Quote> {
    /// Loaded quotes that belong to a movie.
    #[must_use]
    pub fn for_movie(&self, movie_id: MovieId) -> Vec<Quote> {
        self.items()
            .into_iter()
            .filter(|quote| quote.movie_id == movie_id)
            .collect()
    }

    /// Like counter as last reported by the server.
    #[must_use]
    pub fn likes_count(&self, quote_id: QuoteId) -> Option<u32> {
        self.get(quote_id).map(|quote| quote.likes_count)
    }
}
