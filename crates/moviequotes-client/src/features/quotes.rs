//! Quote create and edit forms.

use std::sync::Arc;

use moviequotes_api_models::{Locale, Quote, QuoteDraft, QuoteEdit, QuoteId};
use moviequotes_events::{EventBus, UiEvent};
use tracing::{debug, info};

use super::surface;
use crate::error::ActionResult;
use crate::navigation::Navigator;
use crate::stores::{Modal, MoviesStore, QuotesStore, UiStore};

/// Submits quote forms and keeps the feed and movie detail in sync.
pub struct QuoteForms {
    quotes: Arc<QuotesStore>,
    movies: Arc<MoviesStore>,
    ui: Arc<UiStore>,
    navigator: Arc<dyn Navigator>,
    events: EventBus,
    locale: Locale,
}

impl QuoteForms {
    /// Forms writing into `quotes` and invalidating `movies`.
    #[must_use]
    pub fn new(
        quotes: Arc<QuotesStore>,
        movies: Arc<MoviesStore>,
        ui: Arc<UiStore>,
        navigator: Arc<dyn Navigator>,
        events: EventBus,
        locale: Locale,
    ) -> Self {
        Self {
            quotes,
            movies,
            ui,
            navigator,
            events,
            locale,
        }
    }

    /// Create a quote; it heads the feed, then loaded pages are re-fetched.
    ///
    /// # Errors
    ///
    /// Returns the rejection; the feed is left untouched.
    pub async fn create(&self, draft: &QuoteDraft) -> ActionResult<Quote> {
        let quote = match self.quotes.create(draft).await {
            Ok(quote) => quote,
            Err(err) => {
                return Err(surface(err, self.locale, self.navigator.as_ref(), "create quote").await);
            }
        };
        self.ui.close(Modal::AddQuote);
        self.ui.open(Modal::QuoteAdded);
        self.events.publish(UiEvent::QuoteAdded { quote_id: quote.id });
        info!(quote_id = %quote.id, movie_id = %quote.movie_id, "quote added");
        self.invalidate_movie(&quote).await;
        if let Err(err) = self.quotes.refresh_visible().await {
            debug!(error = %err, "feed refresh after quote creation failed");
        }
        Ok(quote)
    }

    /// Replace a quote's content.
    ///
    /// # Errors
    ///
    /// Returns the rejection; cached quotes are left untouched.
    pub async fn edit(&self, id: QuoteId, edit: &QuoteEdit) -> ActionResult<Quote> {
        self.ui.set_quote_edit_succeeded(false);
        let quote = match self.quotes.edit(id, edit).await {
            Ok(quote) => quote,
            Err(err) => {
                return Err(surface(err, self.locale, self.navigator.as_ref(), "edit quote").await);
            }
        };
        self.ui.set_quote_edit_succeeded(true);
        self.events.publish(UiEvent::QuoteUpdated { quote_id: id });
        info!(quote_id = %id, "quote updated");
        self.invalidate_movie(&quote).await;
        Ok(quote)
    }

    async fn invalidate_movie(&self, quote: &Quote) {
        if !self.movies.is_cached(quote.movie_id) {
            return;
        }
        if let Err(err) = self.movies.refresh(quote.movie_id).await {
            debug!(movie_id = %quote.movie_id, error = %err, "movie refresh after quote change failed");
        }
    }
}
