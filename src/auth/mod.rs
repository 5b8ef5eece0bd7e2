//! Phone + code authentication and session persistence.
//!
//! Flow overview: `login` asks the server to send a code to a phone number and
//! leaves the session anonymous. `verify_code` exchanges phone and code for a
//! bearer token, marks the session authenticated and persists the token.
//! `initialize_auth` hydrates a persisted token at startup without a network
//! call; `check_auth` confirms it against `GET /me` and tears the session down
//! on any failure. `logout` always clears local state, even when the server
//! cannot be reached.

pub mod session;
pub mod storage;
pub mod types;

pub use session::{Session, SessionStore};
pub use storage::{FileStorage, MemoryStorage, StorageError, TokenStorage, TOKEN_KEY};
pub use types::User;
