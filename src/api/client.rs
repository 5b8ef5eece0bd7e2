//! JSON request layer with a shared base URL, default headers, a cookie store
//! and a fixed per-request timeout. Every outcome is normalized into
//! `ApiResult`; nothing here panics on network or payload failures. The
//! client never stores tokens; callers attach them as headers per call.

use super::{config::ApiConfig, errors::ApiError};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settled outcome of a request: data on success, a message-bearing error otherwise.
pub type ApiResult<T> = Result<T, ApiError>;

/// Per-call options; `method` defaults to GET.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend_from_slice(headers);
        self
    }

    /// Attaches a JSON body. Ignored at send time for GET.
    ///
    /// # Errors
    /// Returns `ApiError::Serialization` if the body cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }
}

#[derive(Debug)]
struct Shared {
    base_url: watch::Sender<String>,
    loading: watch::Sender<bool>,
    last_error: watch::Sender<Option<String>>,
}

/// Cheap to clone; clones share the base URL and the observable request state.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    shared: Arc<Shared>,
}

/// Holds `loading` high until dropped, so every exit path resets it.
struct InFlight<'a>(&'a watch::Sender<bool>);

impl<'a> InFlight<'a> {
    fn start(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl ApiClient {
    /// Builds a client from the provided configuration.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        let (base_url, _) = watch::channel(config.base_url.clone());
        let (loading, _) = watch::channel(false);
        let (last_error, _) = watch::channel(None);

        Ok(Self {
            http,
            shared: Arc::new(Shared {
                base_url,
                loading,
                last_error,
            }),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        self.shared.base_url.borrow().clone()
    }

    /// Changes the base URL for subsequent calls, including those made through clones.
    pub fn set_base_url(&self, base_url: impl Into<String>) {
        self.shared.base_url.send_replace(base_url.into());
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.shared.loading.borrow()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.shared.last_error.borrow().clone()
    }

    #[must_use]
    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.shared.loading.subscribe()
    }

    #[must_use]
    pub fn watch_error(&self) -> watch::Receiver<Option<String>> {
        self.shared.last_error.subscribe()
    }

    pub fn clear_error(&self) {
        self.shared.last_error.send_replace(None);
    }

    /// Issues a request relative to the base URL and decodes the JSON response.
    ///
    /// # Errors
    /// Returns `ApiError::Timeout` when the timeout elapses, `ApiError::Http` on
    /// non-2xx status, `ApiError::Network` on transport failure and
    /// `ApiError::Parse` when the payload does not decode into `T`.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let _in_flight = InFlight::start(&self.shared.loading);
        self.shared.last_error.send_replace(None);

        self.send(endpoint, options)
            .await
            .map_err(|err| self.record_failure(err))
    }

    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
    ) -> ApiResult<T> {
        self.request(endpoint, RequestOptions::new(Method::GET).headers(headers))
            .await
    }

    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        headers: &[(String, String)],
    ) -> ApiResult<T> {
        self.with_body(Method::POST, endpoint, body, headers).await
    }

    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        headers: &[(String, String)],
    ) -> ApiResult<T> {
        self.with_body(Method::PUT, endpoint, body, headers).await
    }

    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
    ) -> ApiResult<T> {
        self.request(endpoint, RequestOptions::new(Method::DELETE).headers(headers))
            .await
    }

    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        headers: &[(String, String)],
    ) -> ApiResult<T> {
        self.with_body(Method::PATCH, endpoint, body, headers).await
    }

    async fn with_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
        headers: &[(String, String)],
    ) -> ApiResult<T> {
        match RequestOptions::new(method).headers(headers).json(body) {
            Ok(options) => self.request(endpoint, options).await,
            Err(err) => Err(self.record_failure(err)),
        }
    }

    fn record_failure(&self, err: ApiError) -> ApiError {
        debug!("request failed: {err}");
        self.shared.last_error.send_replace(Some(err.to_string()));
        err
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let url = build_url(&self.base_url(), endpoint);
        let headers = merge_headers(&options.headers)?;

        let mut builder = self.http.request(options.method.clone(), &url).headers(headers);
        if options.method != Method::GET {
            if let Some(body) = &options.body {
                let payload = serde_json::to_vec(body).map_err(|err| {
                    ApiError::Serialization(format!("Failed to encode request: {err}"))
                })?;
                builder = builder.body(payload);
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::from_transport(&err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::from_transport(&err))?;

        decode(&bytes)
    }
}

/// Joins the base URL and endpoint with exactly one slash between them.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Default JSON headers with caller headers layered on top.
fn merge_headers(extra: &[(String, String)]) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|err| ApiError::Config(format!("Invalid header name {name}: {err}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::Config(format!("Invalid value for header {name}")))?;
        if name == AUTHORIZATION {
            value.set_sensitive(true);
        }
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Decodes a JSON payload. A successful call must carry data, so an empty
/// body is a parse failure.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> ApiResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::Parse("Failed to decode response: empty body".to_string()));
    }

    serde_json::from_slice(bytes)
        .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
}
