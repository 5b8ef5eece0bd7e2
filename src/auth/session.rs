//! Auth session state and the operations that move it between anonymous and
//! authenticated. The store is built once at startup and shared by reference;
//! state lives in a `watch` channel so callers can observe changes without
//! polling. The token is kept as a secret and never logged.

use crate::{
    api::{ApiClient, ApiError, RequestOptions},
    auth::{
        storage::{TokenStorage, TOKEN_KEY},
        types::{
            LoginRequest, LoginResponse, LogoutRequest, MeResponse, User, VerifyCodeRequest,
            VerifyCodeResponse,
        },
    },
};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";

/// Snapshot of the authenticated identity and credential.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<SecretString>,
    pub is_authenticated: bool,
}

impl Session {
    /// The one predicate navigation trusts: authenticated and holding a token.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.is_authenticated && self.token.is_some()
    }
}

pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn TokenStorage>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Creates an empty session. Call [`SessionStore::initialize_auth`] to hydrate it.
    #[must_use]
    pub fn new(api: ApiClient, storage: Arc<dyn TokenStorage>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            api,
            storage,
            state,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Registers an observer that sees every subsequent state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.state.borrow().token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.api.is_loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.api.last_error()
    }

    /// Submits a phone number so the server can send a code. Never changes auth state.
    ///
    /// # Errors
    /// Returns the request layer's error when the call fails.
    #[instrument(skip_all)]
    pub async fn login(&self, phone: &str) -> Result<String, ApiError> {
        let response: LoginResponse = self.api.post("/login", &LoginRequest { phone }, &[]).await?;
        debug!("verification code requested");
        Ok(response.message)
    }

    /// Exchanges phone and code for a token, then persists it.
    ///
    /// # Errors
    /// Returns the request layer's error, or `ApiError::Unknown` when the
    /// server answers without a token. State is unchanged on failure.
    #[instrument(skip_all)]
    pub async fn verify_code(&self, phone: &str, code: &str) -> Result<String, ApiError> {
        let response: VerifyCodeResponse = self
            .api
            .post("/login/verify", &VerifyCodeRequest { phone, code }, &[])
            .await?;

        if response.token.trim().is_empty() {
            warn!("verify response did not include a token");
            return Err(ApiError::Unknown);
        }

        if let Err(err) = self.storage.set(TOKEN_KEY, &response.token) {
            warn!("Failed to persist token: {err}");
        }

        self.state.send_modify(|session| {
            session.token = Some(SecretString::from(response.token));
            session.is_authenticated = true;
        });
        info!("session authenticated");

        Ok(LOGIN_SUCCESS_MESSAGE.to_string())
    }

    /// Tells the server the session is over, then clears local state no matter
    /// how that call went.
    #[instrument(skip_all)]
    pub async fn logout(&self) {
        if let Err(err) = self
            .api
            .post::<_, Value>("/logout", &LogoutRequest {}, &[])
            .await
        {
            warn!("Logout error: {err}");
        }

        self.state.send_replace(Session::default());

        if let Err(err) = self.storage.remove(TOKEN_KEY) {
            warn!("Failed to remove persisted token: {err}");
        }
        info!("session cleared");
    }

    /// Re-validates the held token against `GET /me`. Any failure, including
    /// holding no token at all, tears the session down.
    #[instrument(skip_all)]
    pub async fn check_auth(&self) -> bool {
        let Some(token) = self.token() else {
            debug!("no token to validate");
            self.logout().await;
            return false;
        };

        let options = RequestOptions::new(Method::GET)
            .header("Authorization", format!("Bearer {}", token.expose_secret()));

        match self.api.request::<MeResponse>("/me", options).await {
            Ok(response) => {
                // A logout may have landed while `/me` was in flight.
                self.state.send_if_modified(|session| {
                    if session.token.is_none() {
                        return false;
                    }
                    session.user = Some(response.data);
                    session.is_authenticated = true;
                    true
                })
            }
            Err(err) => {
                warn!("Error checking auth: {err}");
                self.logout().await;
                false
            }
        }
    }

    /// Optimistically hydrates the session from storage without a network call.
    pub fn initialize_auth(&self) {
        if let Some(token) = self
            .storage
            .get(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
        {
            self.state.send_modify(|session| {
                session.token = Some(SecretString::from(token));
                session.is_authenticated = true;
            });
            debug!("session hydrated from storage");
        }
    }
}
