//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action for the selected subcommand,
//! attaching the shared request layer and storage settings.

use crate::cli::{
    actions::Action,
    commands::{
        api, ARG_CODE, ARG_PHONE, ARG_ROUTE, CMD_LOGIN, CMD_LOGOUT, CMD_NAVIGATE, CMD_VERIFY,
        CMD_WHOAMI,
    },
    globals::GlobalArgs,
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

fn read_required(matches: &clap::ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow!("missing required argument: --{id}"))
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or empty.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let options = api::Options::parse(matches)?;
    let globals = GlobalArgs::new(options.api, options.storage_path);

    match matches.subcommand() {
        Some((CMD_LOGIN, sub)) => Ok(Action::Login {
            globals,
            phone: read_required(sub, ARG_PHONE)?,
        }),
        Some((CMD_VERIFY, sub)) => Ok(Action::Verify {
            globals,
            phone: read_required(sub, ARG_PHONE)?,
            code: SecretString::from(read_required(sub, ARG_CODE)?),
        }),
        Some((CMD_LOGOUT, _)) => Ok(Action::Logout { globals }),
        Some((CMD_WHOAMI, _)) => Ok(Action::WhoAmI { globals }),
        Some((CMD_NAVIGATE, sub)) => Ok(Action::Navigate {
            globals,
            route: read_required(sub, ARG_ROUTE)?,
        }),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}
