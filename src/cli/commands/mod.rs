pub mod api;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const CMD_LOGIN: &str = "login";
pub const CMD_VERIFY: &str = "verify";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_NAVIGATE: &str = "navigate";

pub const ARG_PHONE: &str = "phone";
pub const ARG_CODE: &str = "code";
pub const ARG_ROUTE: &str = "route";

fn phone_arg() -> Arg {
    Arg::new(ARG_PHONE)
        .long(ARG_PHONE)
        .help("Phone number to log in with")
        .env("WAYPOINT_PHONE")
        .required(true)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("waypoint")
        .about("Phone login and trip session client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Request a verification code for a phone number")
                .arg(phone_arg()),
        )
        .subcommand(
            Command::new(CMD_VERIFY)
                .about("Submit the verification code and store the session token")
                .arg(phone_arg())
                .arg(
                    Arg::new(ARG_CODE)
                        .long(ARG_CODE)
                        .help("Verification code received by SMS")
                        .required(true),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("End the session and forget the stored token"))
        .subcommand(
            Command::new(CMD_WHOAMI).about("Validate the stored session and show the current user"),
        )
        .subcommand(
            Command::new(CMD_NAVIGATE)
                .about("Navigate to a route through the session guard")
                .arg(
                    Arg::new(ARG_ROUTE)
                        .help("Route name or path, e.g. landing or /landing")
                        .required(true),
                ),
        );

    let command = api::with_args(command);
    logging::with_args(command)
}
