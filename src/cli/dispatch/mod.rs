//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{validate::Args, Action};
use crate::cli::commands::{codec, validate};
use anyhow::{Context, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the subcommand is missing or its arguments are invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub_m) = matches.subcommand().context("missing subcommand")?;

    match name {
        codec::CMD_ENCODE => Ok(Action::Encode {
            username: codec::parse_username(sub_m)?,
        }),
        codec::CMD_DECODE => Ok(Action::Decode {
            value: codec::parse_value(sub_m)?,
        }),
        validate::CMD_VALIDATE => {
            let options = validate::Options::parse(sub_m)?;
            Ok(Action::Validate(Args {
                subject_name: options.subject_name,
                session_name: options.session_name,
                with_request: options.with_request,
                username_source: options.username_source,
                flow_id: options.flow_id,
            }))
        }
        other => anyhow::bail!("unknown subcommand: {other}"),
    }
}
