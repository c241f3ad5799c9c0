use crate::principal::{serializer::PrincipalSerializerRegistry, BypassPrincipal};
use anyhow::{Context, Result};
use tracing::debug;

/// Encode a DuoBypass principal for `username`.
///
/// # Errors
/// Returns an error if the username is blank or encoding fails.
pub fn encode(username: &str) -> Result<String> {
    let principal = BypassPrincipal::new(username).context("invalid username")?;
    debug!("Encoding {principal}");
    PrincipalSerializerRegistry::default()
        .serialize(&principal)
        .context("failed to encode principal")
}

/// Decode a stored principal and describe it.
///
/// # Errors
/// Returns an error if the value is malformed.
pub fn decode(value: &str) -> Result<String> {
    let decoded = PrincipalSerializerRegistry::default()
        .deserialize(value)
        .context("failed to decode principal")?;

    Ok(decoded.map_or_else(|| "no principal".to_string(), |principal| principal.to_string()))
}
