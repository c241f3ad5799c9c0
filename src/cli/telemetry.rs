use anyhow::Result;
use std::env::var;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

const ENV_LOG_FORMAT: &str = "DUO_BYPASS_LOG_FORMAT";

/// Whether log lines should be emitted as JSON (`DUO_BYPASS_LOG_FORMAT=json`).
fn json_requested(value: Option<&str>) -> bool {
    value.is_some_and(|format| format.trim().eq_ignore_ascii_case("json"))
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` directives override the verbosity level.
///
/// # Errors
///
/// Returns an error if a filter directive is invalid or a global subscriber is
/// already installed.
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let verbosity_level = verbosity_level.unwrap_or(Level::ERROR);

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    if json_requested(var(ENV_LOG_FORMAT).ok().as_deref()) {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false);
        let subscriber = Registry::default().with(fmt_layer).with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(false);
        let subscriber = Registry::default().with(fmt_layer).with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}
