//! Event payloads published by mutation controllers.

use chrono::{DateTime, Utc};
use moviequotes_api_models::{MovieId, ProfileField, QuoteId};
use serde::{Deserialize, Serialize};

/// Identifier assigned to each published event.
pub type EventId = u64;

/// Default buffer size for the in-memory replay ring.
pub const DEFAULT_REPLAY_CAPACITY: usize = 256;

/// Notifications surfaced to the view layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// The session flag was resolved on first navigation.
    SessionResolved {
        /// Whether the backend recognised the session.
        authenticated: bool,
    },
    /// A movie was created.
    MovieAdded {
        /// New movie id.
        movie_id: MovieId,
    },
    /// A movie was edited.
    MovieUpdated {
        /// Edited movie id.
        movie_id: MovieId,
    },
    /// A quote was created.
    QuoteAdded {
        /// New quote id.
        quote_id: QuoteId,
    },
    /// A quote was edited.
    QuoteUpdated {
        /// Edited quote id.
        quote_id: QuoteId,
    },
    /// A comment was accepted by the server.
    CommentAdded {
        /// Commented quote id.
        quote_id: QuoteId,
    },
    /// A like toggle finished (after rollback, if any).
    LikeSettled {
        /// Toggled quote id.
        quote_id: QuoteId,
        /// Liked flag after settling.
        liked: bool,
    },
    /// Profile sub-mutations finished.
    ProfileUpdated {
        /// Fields the server accepted.
        updated: Vec<ProfileField>,
        /// Fields the server rejected.
        failed: Vec<ProfileField>,
    },
}

impl UiEvent {
    /// Machine-friendly discriminator for subscribers and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SessionResolved { .. } => "session_resolved",
            Self::MovieAdded { .. } => "movie_added",
            Self::MovieUpdated { .. } => "movie_updated",
            Self::QuoteAdded { .. } => "quote_added",
            Self::QuoteUpdated { .. } => "quote_updated",
            Self::CommentAdded { .. } => "comment_added",
            Self::LikeSettled { .. } => "like_settled",
            Self::ProfileUpdated { .. } => "profile_updated",
        }
    }
}

/// Metadata wrapper tracking the event id and publish time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    /// Sequential id.
    pub id: EventId,
    /// Publish timestamp.
    pub timestamp: DateTime<Utc>,
    /// Payload.
    pub event: UiEvent,
}
