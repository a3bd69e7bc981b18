//! Command handlers grouped by concern.

pub(crate) mod account;
pub(crate) mod feed;
pub(crate) mod quotes;
pub(crate) mod session;

use moviequotes_client::{AppContext, Route};

use crate::client::{CliError, CliResult};

/// Resolve the session, then enter `route` through the guard.
///
/// Fails when the guard redirects elsewhere, which for the protected routes
/// means nobody is signed in.
pub(crate) async fn enter(context: &AppContext, route: Route) -> CliResult<()> {
    context.session.resolve().await;
    let landed = context.router.navigate(route.clone()).await;
    if landed == route {
        Ok(())
    } else {
        tracing::debug!(requested = route.name(), landed = landed.name(), "route redirected");
        Err(CliError::validation(format!(
            "{} requires a signed-in session",
            route.path()
        )))
    }
}
