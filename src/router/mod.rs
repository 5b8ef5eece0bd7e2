//! Route table and navigation. Every navigation passes through
//! [`RouteGuard::before_each`]; a redirect is followed by guarding the new
//! target, so the login route must stay unconditionally reachable.

mod guard;

pub use guard::{Navigation, RouteGuard};

use crate::auth::SessionStore;
use std::{fmt, str::FromStr};
use tracing::info;

/// Redirect hops allowed in a single navigation.
const MAX_REDIRECTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Landing,
}

impl RouteName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RouteName::Login => "login",
            RouteName::Landing => "landing",
        }
    }

    #[must_use]
    pub const fn route(self) -> &'static Route {
        match self {
            RouteName::Login => &LOGIN,
            RouteName::Landing => &LANDING,
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RouteName {
    type Err = RouterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        ROUTES
            .iter()
            .find(|route| route.name.as_str() == value || route.path == value)
            .map(|route| route.name)
            .ok_or_else(|| RouterError::NotFound(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub path: &'static str,
}

const LOGIN: Route = Route {
    name: RouteName::Login,
    path: "/",
};

const LANDING: Route = Route {
    name: RouteName::Landing,
    path: "/landing",
};

pub const ROUTES: &[Route] = &[LOGIN, LANDING];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouterError {
    NotFound(String),
    RedirectLoop(RouteName),
}

impl fmt::Display for RouterError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::NotFound(target) => write!(formatter, "No route matches {target}"),
            RouterError::RedirectLoop(route) => {
                write!(formatter, "Too many redirects while navigating to {route}")
            }
        }
    }
}

impl std::error::Error for RouterError {}

pub struct Router<'a> {
    guard: RouteGuard<'a>,
    current: Option<RouteName>,
}

impl<'a> Router<'a> {
    #[must_use]
    pub fn new(session: &'a SessionStore) -> Self {
        Self {
            guard: RouteGuard::new(session),
            current: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&'static Route> {
        self.current.map(RouteName::route)
    }

    /// Navigates to `to`, following guard redirects, and returns where navigation landed.
    ///
    /// # Errors
    /// Returns `RouterError::RedirectLoop` if redirects do not settle.
    pub async fn push(&mut self, to: RouteName) -> Result<&'static Route, RouterError> {
        let mut target = to;

        for _ in 0..=MAX_REDIRECTS {
            match self.guard.before_each(target).await {
                Navigation::Allow => {
                    info!(route = %target, "navigated");
                    self.current = Some(target);
                    return Ok(target.route());
                }
                Navigation::Redirect(next) => {
                    info!(from = %target, to = %next, "redirected");
                    target = next;
                }
            }
        }

        Err(RouterError::RedirectLoop(to))
    }

    /// Resolves a route by name or path and navigates to it.
    ///
    /// # Errors
    /// Returns `RouterError::NotFound` for unknown targets, otherwise see [`Router::push`].
    pub async fn push_str(&mut self, target: &str) -> Result<&'static Route, RouterError> {
        let name = target.parse::<RouteName>()?;
        self.push(name).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiConfig};
    use crate::auth::{MemoryStorage, TokenStorage, TOKEN_KEY};
    use std::sync::Arc;

    #[test]
    fn route_names_resolve_by_name_and_path() {
        assert_eq!("login".parse::<RouteName>().unwrap(), RouteName::Login);
        assert_eq!("/".parse::<RouteName>().unwrap(), RouteName::Login);
        assert_eq!(" landing ".parse::<RouteName>().unwrap(), RouteName::Landing);
        assert_eq!("/landing".parse::<RouteName>().unwrap(), RouteName::Landing);
        assert_eq!(
            "/trips".parse::<RouteName>(),
            Err(RouterError::NotFound("/trips".to_string()))
        );
    }

    #[test]
    fn every_route_name_has_a_path() {
        assert_eq!(RouteName::Login.route().path, "/");
        assert_eq!(RouteName::Landing.route().path, "/landing");

        for route in ROUTES {
            assert_eq!(route.name.route(), route);
        }
    }

    #[tokio::test]
    async fn login_is_reachable_without_network() {
        // Unroutable base URL: a network call here would fail the guard.
        let api = ApiClient::new(&ApiConfig::default().with_base_url("http://127.0.0.1:1")).unwrap();
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "T1").unwrap();
        let session = SessionStore::new(api, storage);

        let mut router = Router::new(&session);
        let route = router.push(RouteName::Login).await.unwrap();

        assert_eq!(route.name, RouteName::Login);
        assert_eq!(router.current().unwrap().name, RouteName::Login);
        assert!(session.is_logged_in());
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let api = ApiClient::new(&ApiConfig::default()).unwrap();
        let session = SessionStore::new(api, Arc::new(MemoryStorage::new()));
        let mut router = Router::new(&session);

        assert!(matches!(
            router.push_str("/nowhere").await,
            Err(RouterError::NotFound(_))
        ));
        assert!(router.current().is_none());
    }
}
