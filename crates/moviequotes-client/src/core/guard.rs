//! Pre-navigation guard.
//!
//! The first navigation resolves the session and proceeds regardless of the
//! outcome. Later navigations are checked against the route's access rule:
//! protected routes bounce anonymous visitors to the landing page, guest
//! routes bounce signed-in users to the news feed.

use std::sync::Arc;

use tracing::debug;

use super::session::{SessionCache, SessionFlag};
use crate::navigation::{Route, RouteAccess};

/// Result of running the guard for a navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Navigate to the requested route.
    Allow,
    /// Navigate to this route instead.
    Redirect(Route),
}

/// Access check for a resolved flag.
///
/// An `Unknown` flag never redirects.
#[must_use]
pub fn decide(access: RouteAccess, flag: SessionFlag) -> NavigationDecision {
    match (access, flag) {
        (RouteAccess::AuthenticatedOnly, SessionFlag::Anonymous) => {
            NavigationDecision::Redirect(Route::Landing)
        }
        (RouteAccess::GuestOnly, SessionFlag::Authenticated) => {
            NavigationDecision::Redirect(Route::NewsFeed)
        }
        _ => NavigationDecision::Allow,
    }
}

/// Guard run before every navigation.
pub struct NavigationGuard {
    session: Arc<SessionCache>,
}

impl NavigationGuard {
    /// Guard reading the shared session cache.
    #[must_use]
    pub const fn new(session: Arc<SessionCache>) -> Self {
        Self { session }
    }

    /// Decide whether navigation to `to` may proceed.
    pub async fn check(&self, to: &Route) -> NavigationDecision {
        if self.session.flag() == SessionFlag::Unknown {
            let flag = self.session.resolve().await;
            debug!(route = to.name(), ?flag, "first navigation resolved session");
            return NavigationDecision::Allow;
        }
        let decision = decide(to.access(), self.session.flag());
        if let NavigationDecision::Redirect(target) = &decision {
            debug!(
                route = to.name(),
                redirect = target.name(),
                "navigation redirected"
            );
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_routes_require_authentication() {
        assert_eq!(
            decide(RouteAccess::AuthenticatedOnly, SessionFlag::Anonymous),
            NavigationDecision::Redirect(Route::Landing)
        );
        assert_eq!(
            decide(RouteAccess::AuthenticatedOnly, SessionFlag::Authenticated),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn guest_routes_bounce_signed_in_users() {
        assert_eq!(
            decide(RouteAccess::GuestOnly, SessionFlag::Authenticated),
            NavigationDecision::Redirect(Route::NewsFeed)
        );
        assert_eq!(
            decide(RouteAccess::GuestOnly, SessionFlag::Anonymous),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn public_and_unknown_always_allow() {
        for flag in [
            SessionFlag::Unknown,
            SessionFlag::Authenticated,
            SessionFlag::Anonymous,
        ] {
            assert_eq!(decide(RouteAccess::Public, flag), NavigationDecision::Allow);
        }
        assert_eq!(
            decide(RouteAccess::AuthenticatedOnly, SessionFlag::Unknown),
            NavigationDecision::Allow
        );
    }
}
