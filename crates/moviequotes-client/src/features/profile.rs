//! Profile editing.
//!
//! # Design
//! - Username, avatar, password and email are independent submissions
//!   dispatched concurrently; only dirty fields are sent.
//! - One field failing never blocks or undoes another.
//! - The user is re-fetched once when at least one field was accepted.

use std::sync::Arc;

use moviequotes_api_models::{Locale, PasswordChange, ProfileChanges, ProfileField, Upload};
use moviequotes_events::{EventBus, UiEvent};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{ActionError, ActionResult, FieldErrors, RemoteResult};
use crate::navigation::{Navigator, Route};
use crate::remote::forms::avatar_body;
use crate::remote::{RemoteClient, RequestBody};
use crate::stores::UserStore;

const UPDATE_NAME_PATH: &str = "/api/user/update-name";
const AVATAR_PATH: &str = "/api/user/profile-avatar";
const UPDATE_PASSWORD_PATH: &str = "/api/user/update-password";
const ADD_EMAIL_PATH: &str = "/api/user/add-email";

/// Result of one profile sub-mutation.
#[derive(Debug)]
pub enum FieldOutcome {
    /// The field was not dirty.
    Skipped,
    /// The server accepted the field.
    Updated,
    /// The server rejected the field.
    Failed(ActionError),
}

impl FieldOutcome {
    /// Whether the field failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Per-field outcome of a profile submission.
#[derive(Debug)]
pub struct ProfileReport {
    outcomes: Vec<(ProfileField, FieldOutcome)>,
}

impl ProfileReport {
    /// Outcome for one field.
    #[must_use]
    pub fn outcome(&self, field: ProfileField) -> &FieldOutcome {
        self.outcomes
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map_or(&FieldOutcome::Skipped, |(_, outcome)| outcome)
    }

    /// Fields the server accepted.
    #[must_use]
    pub fn updated(&self) -> Vec<ProfileField> {
        self.fields_where(|outcome| matches!(outcome, FieldOutcome::Updated))
    }

    /// Fields the server rejected.
    #[must_use]
    pub fn failed(&self) -> Vec<ProfileField> {
        self.fields_where(FieldOutcome::is_failed)
    }

    /// Whether every dirty field was accepted.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        !self
            .outcomes
            .iter()
            .any(|(_, outcome)| outcome.is_failed())
    }

    /// Validation messages merged across failed fields.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                FieldOutcome::Failed(err) => Some(err.fields()),
                FieldOutcome::Skipped | FieldOutcome::Updated => None,
            })
            .flatten()
            .collect()
    }

    /// `Ok` when every dirty field was accepted, otherwise the merged errors.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Rejected`] carrying every field message.
    pub fn into_result(self) -> ActionResult<Vec<ProfileField>> {
        if self.all_succeeded() {
            return Ok(self.updated());
        }
        Err(ActionError::Rejected {
            message: None,
            fields: self.field_errors(),
        })
    }

    fn fields_where(&self, predicate: impl Fn(&FieldOutcome) -> bool) -> Vec<ProfileField> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| predicate(outcome))
            .map(|(field, _)| *field)
            .collect()
    }
}

/// Submits profile edits.
pub struct ProfileController {
    remote: Arc<dyn RemoteClient>,
    users: Arc<UserStore>,
    navigator: Arc<dyn Navigator>,
    events: EventBus,
    locale: Locale,
}

impl ProfileController {
    /// Controller refreshing `users` after accepted edits.
    #[must_use]
    pub fn new(
        remote: Arc<dyn RemoteClient>,
        users: Arc<UserStore>,
        navigator: Arc<dyn Navigator>,
        events: EventBus,
        locale: Locale,
    ) -> Self {
        Self {
            remote,
            users,
            navigator,
            events,
            locale,
        }
    }

    /// Submit every dirty field concurrently and report each outcome.
    pub async fn submit(&self, changes: &ProfileChanges) -> ProfileReport {
        if changes.is_empty() {
            return ProfileReport {
                outcomes: Vec::new(),
            };
        }

        let (username, avatar, password, email) = tokio::join!(
            self.update_username(changes.username.as_deref()),
            self.update_avatar(changes.avatar.as_ref()),
            self.update_password(changes.password.as_ref()),
            self.add_email(changes.email.as_deref()),
        );
        let report = ProfileReport {
            outcomes: vec![
                (ProfileField::Username, username),
                (ProfileField::Avatar, avatar),
                (ProfileField::Password, password),
                (ProfileField::Email, email),
            ],
        };

        let unauthorized = report.outcomes.iter().any(|(_, outcome)| {
            matches!(outcome, FieldOutcome::Failed(ActionError::Unauthorized))
        });
        if unauthorized {
            warn!("session rejected during profile update; returning to landing");
            self.navigator.push(Route::Landing).await;
        }

        let updated = report.updated();
        let failed = report.failed();
        if !updated.is_empty() {
            if let Err(err) = self.users.fetch().await {
                debug!(error = %err, "user refresh after profile update failed");
            }
        }
        info!(?updated, ?failed, "profile update finished");
        self.events.publish(UiEvent::ProfileUpdated { updated, failed });
        report
    }

    async fn update_username(&self, username: Option<&str>) -> FieldOutcome {
        let Some(username) = username else {
            return FieldOutcome::Skipped;
        };
        let body = RequestBody::Json(json!({ "username": username }));
        self.finish(
            ProfileField::Username,
            self.remote.patch(UPDATE_NAME_PATH, body).await.map(drop),
        )
    }

    async fn update_avatar(&self, avatar: Option<&Upload>) -> FieldOutcome {
        let Some(avatar) = avatar else {
            return FieldOutcome::Skipped;
        };
        self.finish(
            ProfileField::Avatar,
            self.remote.post(AVATAR_PATH, avatar_body(avatar)).await.map(drop),
        )
    }

    async fn update_password(&self, password: Option<&PasswordChange>) -> FieldOutcome {
        let Some(password) = password else {
            return FieldOutcome::Skipped;
        };
        let body = match RequestBody::json(password) {
            Ok(body) => body,
            Err(err) => return FieldOutcome::Failed(err.into()),
        };
        self.finish(
            ProfileField::Password,
            self.remote.post(UPDATE_PASSWORD_PATH, body).await.map(drop),
        )
    }

    async fn add_email(&self, email: Option<&str>) -> FieldOutcome {
        let Some(email) = email else {
            return FieldOutcome::Skipped;
        };
        let body = RequestBody::Json(json!({ "email": email }));
        self.finish(
            ProfileField::Email,
            self.remote.post(ADD_EMAIL_PATH, body).await.map(drop),
        )
    }

    fn finish(&self, field: ProfileField, result: RemoteResult<()>) -> FieldOutcome {
        match result {
            Ok(()) => FieldOutcome::Updated,
            Err(err) => {
                warn!(field = field.key(), error = %err, "profile field rejected");
                FieldOutcome::Failed(ActionError::from_remote(err, self.locale))
            }
        }
    }
}
