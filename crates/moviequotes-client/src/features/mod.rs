//! Mutation controllers invoked by views.
//!
//! Every controller follows the same contract: send the request, apply the
//! server's response to the stores, then publish a notification. Nothing
//! except the like toggle is shown before the server answers.

pub mod account;
pub mod comments;
pub mod likes;
pub mod movies;
pub mod profile;
pub mod quotes;

pub use account::AccountController;
pub use comments::CommentController;
pub use likes::{LikeController, LikeState};
pub use movies::MovieForms;
pub use profile::{FieldOutcome, ProfileController, ProfileReport};
pub use quotes::QuoteForms;

use moviequotes_api_models::Locale;
use tracing::warn;

use crate::error::{ActionError, RemoteError};
use crate::navigation::{Navigator, Route};

/// Convert a remote failure for the view, routing lost sessions to the
/// landing page instead of reporting them inline.
pub(crate) async fn surface(
    err: RemoteError,
    locale: Locale,
    navigator: &dyn Navigator,
    action: &'static str,
) -> ActionError {
    let err = ActionError::from_remote(err, locale);
    match &err {
        ActionError::Unauthorized => {
            warn!(action, "session rejected; returning to landing");
            navigator.push(Route::Landing).await;
        }
        other => warn!(action, error = %other, "action failed"),
    }
    err
}
