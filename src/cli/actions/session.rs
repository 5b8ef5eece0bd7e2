use super::session_store;
use crate::cli::globals::GlobalArgs;
use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};

/// Requests a verification code.
///
/// # Errors
/// Returns an error with the server or transport message when the request fails.
pub async fn login(globals: &GlobalArgs, phone: &str) -> Result<String> {
    let session = session_store(globals)?;
    let message = session.login(phone).await.context("Login failed")?;
    Ok(message)
}

/// Exchanges the code for a token and persists it.
///
/// # Errors
/// Returns an error with the server or transport message when verification fails.
pub async fn verify(globals: &GlobalArgs, phone: &str, code: &SecretString) -> Result<String> {
    let session = session_store(globals)?;
    let message = session
        .verify_code(phone, code.expose_secret())
        .await
        .context("Verification failed")?;
    Ok(message)
}

/// Clears the stored session; the server is notified on a best-effort basis.
///
/// # Errors
/// Returns an error only if the session store cannot be built.
pub async fn logout(globals: &GlobalArgs) -> Result<String> {
    let session = session_store(globals)?;
    session.initialize_auth();
    session.logout().await;
    Ok("Logged out".to_string())
}

/// Validates the stored session and describes the current user.
///
/// # Errors
/// Returns an error when no session is stored or the server rejects it.
pub async fn whoami(globals: &GlobalArgs) -> Result<String> {
    let session = session_store(globals)?;
    session.initialize_auth();

    if !session.is_logged_in() {
        bail!("Not logged in");
    }

    if !session.check_auth().await {
        bail!("Session is no longer valid, log in again");
    }

    let user = session.user().context("Server did not return a user")?;
    Ok(match user.name {
        Some(name) => format!("{name} ({})", user.phone),
        None => user.phone,
    })
}
