use crate::api::config::{validate_base_url, ApiConfig, ENV_BASE_URL};
use anyhow::anyhow;
use clap::{Arg, ArgMatches, Command};
use std::{env::var, path::PathBuf, time::Duration};

pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_STORAGE: &str = "storage";

/// Storage file used when `--storage` is not given.
#[must_use]
pub fn default_storage_path() -> PathBuf {
    var("HOME")
        .ok()
        .filter(|home| !home.trim().is_empty())
        .map_or_else(
            || PathBuf::from(".waypoint"),
            |home| PathBuf::from(home).join(".config").join("waypoint"),
        )
        .join("session.json")
}

#[derive(Debug, Clone)]
pub struct Options {
    pub api: ApiConfig,
    pub storage_path: PathBuf,
}

impl Options {
    /// Parse request layer and storage arguments from matches. Flags win over
    /// the `WAYPOINT_API_*` environment, which wins over the defaults.
    ///
    /// # Errors
    /// Returns an error if the base URL taken from the environment is unusable.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let mut api = ApiConfig::load();
        if let Some(base_url) = matches.get_one::<String>(ARG_BASE_URL) {
            api = api.with_base_url(base_url.clone());
        }
        if let Some(secs) = matches.get_one::<u64>(ARG_TIMEOUT) {
            api = api.with_timeout(Duration::from_secs(*secs));
        }
        validate_base_url(&api.base_url).map_err(|err| anyhow!("{ENV_BASE_URL}: {err}"))?;

        let storage_path = matches
            .get_one::<String>(ARG_STORAGE)
            .filter(|path| !path.trim().is_empty())
            .map_or_else(default_storage_path, PathBuf::from);

        Ok(Self { api, storage_path })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_BASE_URL)
                .long(ARG_BASE_URL)
                .help("Base URL of the waypoint API [env: WAYPOINT_API_BASE_URL]")
                .global(true)
                .value_parser(validate_base_url),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds [env: WAYPOINT_API_TIMEOUT]")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_STORAGE)
                .long(ARG_STORAGE)
                .help("Path to the session file (default: ~/.config/waypoint/session.json)")
                .env("WAYPOINT_STORAGE")
                .global(true),
        )
}
