use crate::api::ApiConfig;
use std::path::PathBuf;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api: ApiConfig,
    pub storage_path: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api: ApiConfig, storage_path: PathBuf) -> Self {
        Self { api, storage_path }
    }
}
