use super::session_store;
use crate::{cli::globals::GlobalArgs, router::Router};
use anyhow::Result;

/// Navigates through the session guard and reports where navigation landed.
///
/// # Errors
/// Returns an error for unknown routes or redirect loops.
pub async fn handle(globals: &GlobalArgs, target: &str) -> Result<String> {
    let session = session_store(globals)?;
    let mut router = Router::new(&session);
    let route = router.push_str(target).await?;
    Ok(format!("{} {}", route.name, route.path))
}
