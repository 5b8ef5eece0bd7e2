//! Client for the waypoint phone-login API.
//!
//! The crate is organized leaf-first: [`api`] issues JSON requests and
//! normalizes their outcomes, [`auth`] owns the session lifecycle on top of it,
//! and [`router`] guards navigation with that session. [`location`] holds the
//! trip destination and current position. [`cli`] wires everything into the
//! `waypoint` binary.
//!
//! ## Session lifecycle
//!
//! 1. **Login:** `POST /login` with a phone number; the server sends a code.
//! 2. **Verify:** `POST /login/verify` with phone and code returns a bearer
//!    token, which is persisted.
//! 3. **Guarded navigation:** each protected navigation confirms the token
//!    with `GET /me`; a rejected or unreachable check logs the session out.
//! 4. **Logout:** `POST /logout` is best effort; local state is always cleared.

pub mod api;
pub mod auth;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod cli;
pub mod location;
pub mod router;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
