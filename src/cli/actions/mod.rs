pub mod navigate;
pub mod session;

use crate::{
    api::ApiClient,
    auth::{FileStorage, SessionStore},
    cli::globals::GlobalArgs,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;

#[derive(Debug)]
pub enum Action {
    Login {
        globals: GlobalArgs,
        phone: String,
    },
    Verify {
        globals: GlobalArgs,
        phone: String,
        code: SecretString,
    },
    Logout {
        globals: GlobalArgs,
    },
    WhoAmI {
        globals: GlobalArgs,
    },
    Navigate {
        globals: GlobalArgs,
        route: String,
    },
}

impl Action {
    /// Runs the action and returns the text to show the user.
    ///
    /// # Errors
    /// Returns an error when the underlying operation fails.
    pub async fn run(self) -> Result<String> {
        match self {
            Action::Login { globals, phone } => session::login(&globals, &phone).await,
            Action::Verify {
                globals,
                phone,
                code,
            } => session::verify(&globals, &phone, &code).await,
            Action::Logout { globals } => session::logout(&globals).await,
            Action::WhoAmI { globals } => session::whoami(&globals).await,
            Action::Navigate { globals, route } => navigate::handle(&globals, &route).await,
        }
    }

    /// Runs the action and prints its output.
    ///
    /// # Errors
    /// Returns an error when the underlying operation fails.
    pub async fn execute(self) -> Result<()> {
        let output = self.run().await?;
        println!("{output}");
        Ok(())
    }
}

/// Builds the session store backed by the configured storage file.
fn session_store(globals: &GlobalArgs) -> Result<SessionStore> {
    let api = ApiClient::new(&globals.api).context("Failed to build HTTP client")?;
    let storage = Arc::new(FileStorage::new(&globals.storage_path));
    Ok(SessionStore::new(api, storage))
}
