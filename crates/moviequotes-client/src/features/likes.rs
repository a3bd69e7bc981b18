//! Optimistic like toggling.
//!
//! # Design
//! - The liked flag flips before the request and rolls back on failure.
//! - Toggles are serialized per quote: while one is pending or rolling back
//!   another toggle is refused with [`ActionError::Busy`] and sends nothing.
//! - The server's like count is the only count; after every toggle the quote
//!   is re-fetched exactly once, whatever the outcome.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use moviequotes_api_models::{LikeId, LikeRecord, Likeable, Locale, QuoteId};
use moviequotes_events::{EventBus, UiEvent};
use serde_json::json;
use tracing::{debug, warn};

use super::surface;
use crate::core::{Optimistic, Phase};
use crate::error::{ActionError, ActionResult};
use crate::navigation::Navigator;
use crate::remote::{RemoteClient, RequestBody};
use crate::stores::QuotesStore;

const LIKES_PATH: &str = "/api/likes";

/// Like status of one quote for the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LikeState {
    liked: Optimistic<bool>,
    like_id: Option<LikeId>,
}

impl LikeState {
    /// Liked flag views should display.
    #[must_use]
    pub const fn liked(&self) -> bool {
        *self.liked.value()
    }

    /// Server id of the like, when one exists.
    #[must_use]
    pub const fn like_id(&self) -> Option<LikeId> {
        self.like_id
    }

    /// Toggle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.liked.phase()
    }
}

/// Per-quote optimistic like controller.
pub struct LikeController {
    remote: Arc<dyn RemoteClient>,
    quotes: Arc<QuotesStore>,
    navigator: Arc<dyn Navigator>,
    events: EventBus,
    locale: Locale,
    states: Mutex<HashMap<QuoteId, LikeState>>,
}

impl LikeController {
    /// Controller writing refreshed quotes into `quotes`.
    #[must_use]
    pub fn new(
        remote: Arc<dyn RemoteClient>,
        quotes: Arc<QuotesStore>,
        navigator: Arc<dyn Navigator>,
        events: EventBus,
        locale: Locale,
    ) -> Self {
        Self {
            remote,
            quotes,
            navigator,
            events,
            locale,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Current like status of a quote.
    #[must_use]
    pub fn state(&self, quote_id: QuoteId) -> LikeState {
        self.lock().get(&quote_id).cloned().unwrap_or_default()
    }

    /// Ask the server whether the user already likes a quote.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Busy`] while a toggle is outstanding, or the
    /// remote failure.
    pub async fn load_likeable(&self, quote_id: QuoteId) -> ActionResult<LikeState> {
        if self.state(quote_id).liked.is_busy() {
            return Err(ActionError::Busy {
                action: "like toggle",
            });
        }
        let path = format!("{LIKES_PATH}/{quote_id}/likeable");
        let status: Likeable = match self.remote.post(&path, RequestBody::Empty).await {
            Ok(response) => response
                .decode(&path)
                .map_err(ActionError::Remote)?,
            Err(err) => {
                return Err(surface(err, self.locale, self.navigator.as_ref(), "likeable").await);
            }
        };

        let mut states = self.lock();
        let state = states.entry(quote_id).or_default();
        if state.liked.is_busy() {
            return Err(ActionError::Busy {
                action: "like toggle",
            });
        }
        state.liked.reset(!status.likeable);
        state.like_id = status.like_id;
        Ok(state.clone())
    }

    /// Flip the liked flag and sync it with the server.
    ///
    /// Returns the liked flag after settling.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Busy`] when a toggle for the same quote is
    /// outstanding, [`ActionError::MissingLike`] when unliking without a
    /// known like id, or the remote failure. The flag is rolled back in
    /// every error case except `Busy`.
    pub async fn toggle(&self, quote_id: QuoteId) -> ActionResult<bool> {
        let (liking, like_id) = {
            let mut states = self.lock();
            let state = states.entry(quote_id).or_default();
            let liking = !*state.liked.value();
            if state.liked.propose(liking).is_err() {
                debug!(%quote_id, "like toggle refused while another is outstanding");
                return Err(ActionError::Busy {
                    action: "like toggle",
                });
            }
            (liking, state.like_id)
        };

        let outcome = if liking {
            self.create_like(quote_id).await.map(Some)
        } else {
            match like_id {
                Some(like_id) => self.delete_like(like_id).await.map(|()| None),
                None => Err(ActionError::MissingLike { quote_id }),
            }
        };

        {
            let mut states = self.lock();
            let state = states.entry(quote_id).or_default();
            match &outcome {
                Ok(like_id) => {
                    state.like_id = *like_id;
                    state.liked.commit();
                }
                Err(err) => {
                    warn!(%quote_id, liking, error = %err, "like toggle rolled back");
                    state.liked.rollback();
                    if liking {
                        state.like_id = None;
                    }
                }
            }
        }

        if let Err(err) = self.quotes.refresh(quote_id).await {
            debug!(%quote_id, error = %err, "quote refresh after like toggle failed");
        }

        let liked = {
            let mut states = self.lock();
            let state = states.entry(quote_id).or_default();
            state.liked.settle();
            *state.liked.value()
        };
        self.events.publish(UiEvent::LikeSettled { quote_id, liked });
        outcome.map(|_| liked)
    }

    async fn create_like(&self, quote_id: QuoteId) -> ActionResult<LikeId> {
        let body = RequestBody::json(&json!({ "quote_id": quote_id }))?;
        match self.remote.post(LIKES_PATH, body).await {
            Ok(response) => response
                .decode::<LikeRecord>(LIKES_PATH)
                .map(|record| record.id)
                .map_err(ActionError::Remote),
            Err(err) => Err(surface(err, self.locale, self.navigator.as_ref(), "like").await),
        }
    }

    async fn delete_like(&self, like_id: LikeId) -> ActionResult<()> {
        let path = format!("{LIKES_PATH}/{like_id}");
        match self.remote.delete(&path).await {
            Ok(_) => Ok(()),
            Err(err) => Err(surface(err, self.locale, self.navigator.as_ref(), "unlike").await),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QuoteId, LikeState>> {
        self.states
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
