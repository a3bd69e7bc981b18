//! Comment submission.
//!
//! Comments are never inserted locally. A confirmed submission clears the
//! input, raises the toast, publishes one notification and then re-fetches
//! the commented quote and the visible feed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use moviequotes_api_models::{CommentDraft, Locale, QuoteId};
use moviequotes_events::{EventBus, UiEvent};
use tracing::{debug, info, warn};

use super::surface;
use crate::core::PageLoad;
use crate::error::{ActionError, ActionResult};
use crate::navigation::Navigator;
use crate::remote::{RemoteClient, RequestBody};
use crate::stores::{Modal, QuotesStore, UiStore};

const COMMENTS_PATH: &str = "/api/comments";

/// Per-quote comment inputs and submission.
pub struct CommentController {
    remote: Arc<dyn RemoteClient>,
    quotes: Arc<QuotesStore>,
    ui: Arc<UiStore>,
    navigator: Arc<dyn Navigator>,
    events: EventBus,
    locale: Locale,
    inputs: Mutex<HashMap<QuoteId, String>>,
}

impl CommentController {
    /// Controller refreshing `quotes` after confirmed comments.
    #[must_use]
    pub fn new(
        remote: Arc<dyn RemoteClient>,
        quotes: Arc<QuotesStore>,
        ui: Arc<UiStore>,
        navigator: Arc<dyn Navigator>,
        events: EventBus,
        locale: Locale,
    ) -> Self {
        Self {
            remote,
            quotes,
            ui,
            navigator,
            events,
            locale,
            inputs: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the draft text for a quote.
    pub fn set_input(&self, quote_id: QuoteId, text: impl Into<String>) {
        self.lock().insert(quote_id, text.into());
    }

    /// Draft text for a quote.
    #[must_use]
    pub fn input(&self, quote_id: QuoteId) -> String {
        self.lock().get(&quote_id).cloned().unwrap_or_default()
    }

    /// Submit the draft for a quote.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Unconfirmed`] when the server answers with a
    /// success status other than 200/201, or the remote failure. The input
    /// is kept in both cases.
    pub async fn submit(&self, quote_id: QuoteId) -> ActionResult<()> {
        let draft = CommentDraft {
            quote_id,
            body: self.input(quote_id),
        };
        let response = match self
            .remote
            .post(COMMENTS_PATH, RequestBody::json(&draft)?)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return Err(surface(err, self.locale, self.navigator.as_ref(), "comment").await);
            }
        };
        if !response.is_confirmed() {
            warn!(%quote_id, status = response.status, "comment not confirmed");
            return Err(ActionError::Unconfirmed {
                status: response.status,
            });
        }

        self.lock().remove(&quote_id);
        self.ui.open(Modal::CommentAdded);
        self.events.publish(UiEvent::CommentAdded { quote_id });
        info!(%quote_id, "comment added");

        if let Err(err) = self.quotes.refresh(quote_id).await {
            debug!(%quote_id, error = %err, "quote refresh after comment failed");
        }
        match self.quotes.refresh_visible().await {
            Ok(PageLoad::Skipped(reason)) => {
                debug!(%quote_id, ?reason, "feed refresh after comment skipped");
            }
            Ok(_) => {}
            Err(err) => debug!(error = %err, "feed refresh after comment failed"),
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QuoteId, String>> {
        self.inputs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
