//! Application context: builds every store and controller once.
//!
//! # Design
//! - Stores are explicit objects shared through `Arc`, not globals.
//! - The router doubles as the navigator handed to stores, so every
//!   navigation a controller triggers goes through the guard.

use std::sync::Arc;

use moviequotes_events::EventBus;

use crate::config::{ClientConfig, ConfigError};
use crate::core::{NavigationGuard, SessionCache};
use crate::features::{
    AccountController, CommentController, LikeController, MovieForms, ProfileController,
    QuoteForms,
};
use crate::navigation::{Navigator, Router};
use crate::remote::RemoteClient;
use crate::remote::http::HttpRemoteClient;
use crate::stores::{MoviesStore, QuotesStore, UiStore, UserStore};

/// Everything a view needs, wired together.
pub struct AppContext {
    /// Resolved configuration.
    pub config: ClientConfig,
    /// Transport shared by all stores.
    pub remote: Arc<dyn RemoteClient>,
    /// Notification bus.
    pub events: EventBus,
    /// Signed-in user.
    pub users: Arc<UserStore>,
    /// Authentication cache.
    pub session: Arc<SessionCache>,
    /// Guarded router.
    pub router: Arc<Router>,
    /// Quote feed.
    pub quotes: Arc<QuotesStore>,
    /// Movie list.
    pub movies: Arc<MoviesStore>,
    /// Dialog flags.
    pub ui: Arc<UiStore>,
    /// Like toggling.
    pub likes: LikeController,
    /// Comment submission.
    pub comments: CommentController,
    /// Movie forms.
    pub movie_forms: MovieForms,
    /// Quote forms.
    pub quote_forms: QuoteForms,
    /// Profile editing.
    pub profile: ProfileController,
    /// Sign-up and recovery flows.
    pub account: AccountController,
}

impl AppContext {
    /// Build a context talking HTTP to the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn connect(config: ClientConfig) -> Result<Self, ConfigError> {
        let remote = Arc::new(HttpRemoteClient::new(&config)?);
        Ok(Self::with_remote(config, remote))
    }

    /// Build a context over an arbitrary transport.
    #[must_use]
    pub fn with_remote(config: ClientConfig, remote: Arc<dyn RemoteClient>) -> Self {
        let events = EventBus::new();
        let locale = config.locale;
        let users = Arc::new(UserStore::new(Arc::clone(&remote)));
        let session = Arc::new(SessionCache::new(Arc::clone(&users), events.clone()));
        let router = Arc::new(Router::new(NavigationGuard::new(Arc::clone(&session))));
        let navigator: Arc<dyn Navigator> = router.clone();
        let quotes = Arc::new(QuotesStore::new(Arc::clone(&remote), Arc::clone(&navigator)));
        let movies = Arc::new(MoviesStore::new(Arc::clone(&remote), Arc::clone(&navigator)));
        let ui = Arc::new(UiStore::new());

        let likes = LikeController::new(
            Arc::clone(&remote),
            Arc::clone(&quotes),
            Arc::clone(&navigator),
            events.clone(),
            locale,
        );
        let comments = CommentController::new(
            Arc::clone(&remote),
            Arc::clone(&quotes),
            Arc::clone(&ui),
            Arc::clone(&navigator),
            events.clone(),
            locale,
        );
        let movie_forms = MovieForms::new(
            Arc::clone(&movies),
            Arc::clone(&ui),
            Arc::clone(&navigator),
            events.clone(),
            locale,
        );
        let quote_forms = QuoteForms::new(
            Arc::clone(&quotes),
            Arc::clone(&movies),
            Arc::clone(&ui),
            Arc::clone(&navigator),
            events.clone(),
            locale,
        );
        let profile = ProfileController::new(
            Arc::clone(&remote),
            Arc::clone(&users),
            Arc::clone(&navigator),
            events.clone(),
            locale,
        );
        let account = AccountController::new(Arc::clone(&remote), navigator, locale);

        Self {
            config,
            remote,
            events,
            users,
            session,
            router,
            quotes,
            movies,
            ui,
            likes,
            comments,
            movie_forms,
            quote_forms,
            profile,
            account,
        }
    }
}
