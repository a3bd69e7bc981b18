//! Sign-up and password recovery flows.

use std::sync::Arc;

use moviequotes_api_models::{Locale, PasswordReset, Registration};
use serde_json::json;
use tracing::info;

use super::surface;
use crate::error::{ActionError, ActionResult};
use crate::navigation::{Navigator, Route};
use crate::remote::{RemoteClient, RequestBody};

const REGISTER_PATH: &str = "/api/register";
const FORGOT_PASSWORD_PATH: &str = "/api/forgot-password";
const RESET_PASSWORD_PATH: &str = "/api/reset-password";

/// Account flows that end in a confirmation view.
pub struct AccountController {
    remote: Arc<dyn RemoteClient>,
    navigator: Arc<dyn Navigator>,
    locale: Locale,
}

impl AccountController {
    /// Controller navigating through `navigator`.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteClient>, navigator: Arc<dyn Navigator>, locale: Locale) -> Self {
        Self {
            remote,
            navigator,
            locale,
        }
    }

    /// Register an account and show the "check your email" view.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Rejected`] with per-field messages.
    pub async fn register(&self, registration: &Registration) -> ActionResult<()> {
        let body = RequestBody::json(registration)?;
        self.submit(REGISTER_PATH, body, "register").await?;
        info!(email = %registration.email, "registration submitted");
        self.navigator.push(Route::SentEmail).await;
        Ok(())
    }

    /// Request a reset link and show the instructions view.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Rejected`]; the email message is under `email`.
    pub async fn forgot_password(&self, email: &str) -> ActionResult<()> {
        let body = RequestBody::Json(json!({ "email": email }));
        self.submit(FORGOT_PASSWORD_PATH, body, "forgot password")
            .await?;
        self.navigator.push(Route::RecoverInstructions).await;
        Ok(())
    }

    /// Set a new password using the email and token carried by `route`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingRouteParameter`] when `route` is not the
    /// create-password view, otherwise the rejection.
    pub async fn reset_password(
        &self,
        route: &Route,
        password: &str,
        password_confirmation: &str,
    ) -> ActionResult<()> {
        let reset = reset_request(route, password, password_confirmation)?;
        let body = RequestBody::json(&reset)?;
        self.submit(RESET_PASSWORD_PATH, body, "reset password")
            .await?;
        info!(email = %reset.email, "password reset");
        self.navigator.push(Route::ChangedPassword).await;
        Ok(())
    }

    async fn submit(&self, path: &str, body: RequestBody, action: &'static str) -> ActionResult<()> {
        match self.remote.post(path, body).await {
            Ok(_) => Ok(()),
            Err(err) => Err(surface(err, self.locale, self.navigator.as_ref(), action).await),
        }
    }
}

/// Build a reset request from the emailed link's route parameters.
///
/// # Errors
///
/// Returns [`ActionError::MissingRouteParameter`] for any other route or
/// blank parameters.
pub fn reset_request(
    route: &Route,
    password: &str,
    password_confirmation: &str,
) -> ActionResult<PasswordReset> {
    let Route::CreatePassword { email, token } = route else {
        return Err(ActionError::MissingRouteParameter { missing: "email" });
    };
    if email.trim().is_empty() {
        return Err(ActionError::MissingRouteParameter { missing: "email" });
    }
    if token.trim().is_empty() {
        return Err(ActionError::MissingRouteParameter { missing: "token" });
    }
    Ok(PasswordReset {
        email: email.clone(),
        token: token.clone(),
        password: password.to_string(),
        password_confirmation: password_confirmation.to_string(),
    })
}
