//! Routes, the navigation seam, and the guarded history router.
//!
//! # Design
//! - `Route` is the closed set of views; each carries its access rule.
//! - Controllers depend on `dyn Navigator` so tests can record navigations.
//! - `Router` is the in-process navigator: it runs the guard before every
//!   push and again on the entry `back` returns to.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use moviequotes_api_models::MovieId;
use tracing::debug;
use url::form_urlencoded;

use crate::core::{NavigationDecision, NavigationGuard};

/// Who may enter a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone.
    Public,
    /// Only signed-in users.
    AuthenticatedOnly,
    /// Only visitors without a session.
    GuestOnly,
}

/// Views reachable in the client.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Marketing landing page.
    Landing,
    /// Sign-in form.
    Login,
    /// Sign-up form.
    Signup,
    /// Email verified confirmation.
    Success,
    /// Verification email sent.
    SentEmail,
    /// Forgot-password form.
    ForgotPassword,
    /// Reset link sent.
    RecoverInstructions,
    /// New-password form opened from an emailed link.
    CreatePassword {
        /// Account email from the link.
        email: String,
        /// Reset token from the link.
        token: String,
    },
    /// Password changed confirmation.
    ChangedPassword,
    /// Quote feed.
    NewsFeed,
    /// Movie list.
    Movies,
    /// Single movie with its quotes.
    MovieDetail {
        /// Displayed movie.
        id: MovieId,
    },
    /// Profile editor.
    Profile,
    /// Fallback view.
    NotFound,
}

impl Route {
    /// Stable route name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Success => "success",
            Self::SentEmail => "sent-email",
            Self::ForgotPassword => "forgot-password",
            Self::RecoverInstructions => "recover-instructions",
            Self::CreatePassword { .. } => "create-password",
            Self::ChangedPassword => "changed-password",
            Self::NewsFeed => "news-feed",
            Self::Movies => "movies",
            Self::MovieDetail { .. } => "movie",
            Self::Profile => "profile",
            Self::NotFound => "not-found",
        }
    }

    /// Access rule enforced by the guard.
    #[must_use]
    pub const fn access(&self) -> RouteAccess {
        match self {
            Self::Login | Self::Signup | Self::ForgotPassword | Self::CreatePassword { .. } => {
                RouteAccess::GuestOnly
            }
            Self::NewsFeed | Self::Movies | Self::MovieDetail { .. } | Self::Profile => {
                RouteAccess::AuthenticatedOnly
            }
            Self::Landing
            | Self::Success
            | Self::SentEmail
            | Self::RecoverInstructions
            | Self::ChangedPassword
            | Self::NotFound => RouteAccess::Public,
        }
    }

    /// Path including query parameters.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::MovieDetail { id } => format!("/movies/{id}"),
            Self::CreatePassword { email, token } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("email", email)
                    .append_pair("token", token)
                    .finish();
                format!("/create-password?{query}")
            }
            other => format!("/{}", other.name()),
        }
    }
}

/// Navigation seam used by stores and controllers.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigate to `route`.
    async fn push(&self, route: Route);
    /// Return to the previous view.
    async fn back(&self);
}

/// Guarded history stack.
pub struct Router {
    guard: NavigationGuard,
    history: Mutex<Vec<Route>>,
}

impl Router {
    /// Router with an empty history.
    #[must_use]
    pub fn new(guard: NavigationGuard) -> Self {
        Self {
            guard,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Run the guard and enter the resulting route. Returns where we landed.
    pub async fn navigate(&self, route: Route) -> Route {
        let target = match self.guard.check(&route).await {
            NavigationDecision::Allow => route,
            NavigationDecision::Redirect(target) => target,
        };
        debug!(route = target.name(), path = %target.path(), "entered route");
        self.lock_history().push(target.clone());
        target
    }

    /// Route currently displayed.
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.lock_history().last().cloned()
    }

    /// Visited routes, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.lock_history().clone()
    }

    fn lock_history(&self) -> MutexGuard<'_, Vec<Route>> {
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl Navigator for Router {
    async fn push(&self, route: Route) {
        let _ = self.navigate(route).await;
    }

    async fn back(&self) {
        let previous = {
            let mut history = self.lock_history();
            if history.len() > 1 {
                let _ = history.pop();
            }
            history.last().cloned()
        };
        let Some(previous) = previous else {
            return;
        };
        // The session may have changed since the entry was recorded.
        if let NavigationDecision::Redirect(target) = self.guard.check(&previous).await {
            debug!(
                from = previous.name(),
                to = target.name(),
                "back navigation redirected"
            );
            let mut history = self.lock_history();
            let _ = history.pop();
            history.push(target);
            return;
        }
        debug!(route = previous.name(), "navigated back");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_include_parameters() {
        assert_eq!(Route::Landing.path(), "/");
        assert_eq!(Route::MovieDetail { id: MovieId(7) }.path(), "/movies/7");
        assert_eq!(
            Route::CreatePassword {
                email: "a@b.test".into(),
                token: "t 1".into(),
            }
            .path(),
            "/create-password?email=a%40b.test&token=t+1"
        );
        assert_eq!(Route::NewsFeed.path(), "/news-feed");
    }

    #[test]
    fn access_rules_cover_protected_and_guest_routes() {
        assert_eq!(Route::Profile.access(), RouteAccess::AuthenticatedOnly);
        assert_eq!(
            Route::MovieDetail { id: MovieId(1) }.access(),
            RouteAccess::AuthenticatedOnly
        );
        assert_eq!(Route::Login.access(), RouteAccess::GuestOnly);
        assert_eq!(Route::Landing.access(), RouteAccess::Public);
        assert_eq!(Route::NotFound.access(), RouteAccess::Public);
    }
}
