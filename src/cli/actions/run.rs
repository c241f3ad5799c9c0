use crate::cli::actions::{codec, validate, Action};
use anyhow::Result;
use std::io::{self, Write};

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
// To add a new action, add a new `Action::*` variant and a corresponding `*::execute` call here.
/// # Errors
/// Returns an error if the action fails.
pub fn execute(action: Action) -> Result<()> {
    let output = match action {
        Action::Encode { username } => codec::encode(&username)?,
        Action::Decode { value } => codec::decode(&value)?,
        Action::Validate(args) => validate::execute(args)?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
