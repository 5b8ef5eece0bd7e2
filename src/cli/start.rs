use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;

/// Parses arguments, sets up logging and returns the action to run.
///
/// # Errors
///
/// Returns an error if logging initialization or action dispatch fails
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity = matches
        .get_one::<u8>(commands::logging::ARG_VERBOSITY)
        .copied()
        .unwrap_or(0);
    telemetry::init(telemetry::verbosity_level(verbosity))?;

    dispatch::handler(&matches)
}
