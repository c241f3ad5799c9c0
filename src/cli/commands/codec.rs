use clap::{Arg, ArgMatches, Command};

pub const CMD_ENCODE: &str = "encode";
pub const CMD_DECODE: &str = "decode";
pub const ARG_USERNAME: &str = "username";
pub const ARG_VALUE: &str = "value";

/// Parse the `--username` of `encode`.
///
/// # Errors
/// Returns an error if the username is missing or blank.
pub fn parse_username(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.get_one::<String>(ARG_USERNAME).cloned() {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => anyhow::bail!("missing required argument: --{ARG_USERNAME}"),
    }
}

/// Parse the `--value` of `decode`.
///
/// # Errors
/// Returns an error if the value is missing.
pub fn parse_value(matches: &ArgMatches) -> anyhow::Result<String> {
    matches
        .get_one::<String>(ARG_VALUE)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_VALUE}"))
}

#[must_use]
pub fn encode() -> Command {
    Command::new(CMD_ENCODE)
        .about("Print the stored form of a DuoBypass principal")
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long(ARG_USERNAME)
                .help("Username the principal is issued for")
                .required(true),
        )
}

#[must_use]
pub fn decode() -> Command {
    Command::new(CMD_DECODE)
        .about("Decode a stored principal value")
        .arg(
            Arg::new(ARG_VALUE)
                .long(ARG_VALUE)
                .help(r#"Stored value, for example {"Entrust":"alice"}"#)
                .required(true),
        )
}
