use crate::{auth::SessionStore, router::RouteName};
use tracing::{debug, instrument};

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(RouteName),
}

/// Runs before every navigation. Protected routes cost one `/me` round trip so
/// stale tokens are rejected at the next navigation.
#[derive(Clone, Copy)]
pub struct RouteGuard<'a> {
    session: &'a SessionStore,
}

impl<'a> RouteGuard<'a> {
    #[must_use]
    pub fn new(session: &'a SessionStore) -> Self {
        Self { session }
    }

    #[instrument(skip(self))]
    pub async fn before_each(&self, to: RouteName) -> Navigation {
        if !self.session.is_authenticated() {
            self.session.initialize_auth();
        }

        if to == RouteName::Login {
            return Navigation::Allow;
        }

        if !self.session.is_logged_in() {
            debug!("no session, redirecting to login");
            return Navigation::Redirect(RouteName::Login);
        }

        if self.session.check_auth().await {
            Navigation::Allow
        } else {
            debug!("session rejected, redirecting to login");
            Navigation::Redirect(RouteName::Login)
        }
    }
}
