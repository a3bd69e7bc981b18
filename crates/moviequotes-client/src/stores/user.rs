//! Current user store.

use std::sync::{Arc, Mutex, MutexGuard};

use moviequotes_api_models::User;
use tracing::debug;

use crate::error::RemoteResult;
use crate::remote::{RemoteClient, fetch_json};

/// Endpoint returning the signed-in user.
pub const USER_PATH: &str = "/api/user";

/// Holds the signed-in user, if any.
pub struct UserStore {
    remote: Arc<dyn RemoteClient>,
    current: Mutex<Option<User>>,
}

impl UserStore {
    /// Empty store.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteClient>) -> Self {
        Self {
            remote,
            current: Mutex::new(None),
        }
    }

    /// Fetch the signed-in user and remember it.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures; the stored user is
    /// left untouched on failure.
    pub async fn fetch(&self) -> RemoteResult<User> {
        let user: User = fetch_json(self.remote.as_ref(), USER_PATH).await?;
        debug!(user_id = %user.id, "current user fetched");
        self.set(user.clone());
        Ok(user)
    }

    /// Signed-in user, if fetched.
    #[must_use]
    pub fn current(&self) -> Option<User> {
        self.lock().clone()
    }

    /// Replace the stored user.
    pub fn set(&self, user: User) {
        *self.lock() = Some(user);
    }

    fn lock(&self) -> MutexGuard<'_, Option<User>> {
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
