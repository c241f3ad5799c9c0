use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::bypass::{UsernameSource, DEFAULT_FLOW_ID};

pub const CMD_VALIDATE: &str = "validate";
pub const ARG_SUBJECT_NAME: &str = "subject-name";
pub const ARG_SESSION_NAME: &str = "session-name";
pub const ARG_NO_REQUEST: &str = "no-request";
pub const ARG_USERNAME_SOURCE: &str = "username-source";
pub const ARG_FLOW_ID: &str = "flow-id";

#[derive(Debug, Clone)]
pub struct Options {
    pub subject_name: Option<String>,
    pub session_name: Option<String>,
    pub with_request: bool,
    pub username_source: UsernameSource,
    pub flow_id: String,
}

impl Options {
    /// Parse validate arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the username source is not recognized.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
        };

        let username_source = match get_non_empty(ARG_USERNAME_SOURCE) {
            Some(value) => value
                .parse::<UsernameSource>()
                .map_err(|e| anyhow::anyhow!(e))?,
            None => UsernameSource::default(),
        };

        Ok(Self {
            subject_name: get_non_empty(ARG_SUBJECT_NAME),
            session_name: get_non_empty(ARG_SESSION_NAME),
            with_request: !matches.get_flag(ARG_NO_REQUEST),
            username_source,
            flow_id: get_non_empty(ARG_FLOW_ID).unwrap_or_else(|| DEFAULT_FLOW_ID.to_string()),
        })
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_VALIDATE)
        .about("Dry-run the DuoBypass check against a synthetic login context")
        .arg(
            Arg::new(ARG_SUBJECT_NAME)
                .long(ARG_SUBJECT_NAME)
                .help("Username established earlier in this login"),
        )
        .arg(
            Arg::new(ARG_SESSION_NAME)
                .long(ARG_SESSION_NAME)
                .help("Username bound to an existing IdP session"),
        )
        .arg(
            Arg::new(ARG_NO_REQUEST)
                .long(ARG_NO_REQUEST)
                .help("Simulate a login context without an HTTP request")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_USERNAME_SOURCE)
                .long(ARG_USERNAME_SOURCE)
                .help("Where to read the established username: canonical, subject, session")
                .env("DUO_BYPASS_USERNAME_SOURCE")
                .default_value("canonical"),
        )
        .arg(
            Arg::new(ARG_FLOW_ID)
                .long(ARG_FLOW_ID)
                .help("Authentication flow identifier recorded in the result")
                .env("DUO_BYPASS_FLOW_ID")
                .default_value(DEFAULT_FLOW_ID),
        )
}
