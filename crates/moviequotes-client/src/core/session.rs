//! Session cache: resolves "am I logged in?" at most once per process.
//!
//! # Design
//! - The flag starts `Unknown` and is written exactly once, by the first
//!   resolution; it never changes afterwards.
//! - Concurrent resolvers share a single `GET /api/user`.
//! - Any failure (401, network, decode) resolves to `Anonymous`.

use std::sync::Arc;

use moviequotes_events::{EventBus, UiEvent};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::stores::UserStore;

/// Tri-state authentication flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionFlag {
    /// Not resolved yet.
    #[default]
    Unknown,
    /// The backend returned the current user.
    Authenticated,
    /// The backend refused or could not be reached.
    Anonymous,
}

impl SessionFlag {
    /// Whether the session is known to be authenticated.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Process-wide authentication cache.
pub struct SessionCache {
    users: Arc<UserStore>,
    events: EventBus,
    flag: OnceCell<SessionFlag>,
}

impl SessionCache {
    /// Cache backed by the user store.
    #[must_use]
    pub fn new(users: Arc<UserStore>, events: EventBus) -> Self {
        Self {
            users,
            events,
            flag: OnceCell::new(),
        }
    }

    /// Current flag without triggering resolution.
    #[must_use]
    pub fn flag(&self) -> SessionFlag {
        self.flag.get().copied().unwrap_or_default()
    }

    /// Resolve the flag, fetching the current user on first call only.
    pub async fn resolve(&self) -> SessionFlag {
        *self
            .flag
            .get_or_init(|| async {
                let flag = match self.users.fetch().await {
                    Ok(user) => {
                        info!(user_id = %user.id, "session resolved as authenticated");
                        SessionFlag::Authenticated
                    }
                    Err(err) => {
                        debug!(error = %err, "session resolved as anonymous");
                        SessionFlag::Anonymous
                    }
                };
                self.events.publish(UiEvent::SessionResolved {
                    authenticated: flag.is_authenticated(),
                });
                flag
            })
            .await
    }
}
