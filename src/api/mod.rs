//! Request layer for the waypoint JSON API.
//!
//! All network calls made by the session store go through [`ApiClient`]. It
//! joins endpoints onto a configurable base URL, sends JSON defaults
//! (`Content-Type` and `Accept`), keeps a cookie store so credentials ride
//! along, and enforces a per-request timeout. Failures are never raised past
//! the client: every call settles into an [`ApiResult`], and the last failure
//! plus an in-flight flag are observable for UI hinting.

pub mod client;
pub mod config;
pub mod errors;

pub use client::{ApiClient, ApiResult, RequestOptions};
pub use config::ApiConfig;
pub use errors::ApiError;
