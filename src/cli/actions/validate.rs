use crate::bypass::{BypassValidator, UsernameSource, ValidatorConfig};
use crate::flow::{
    AuthenticationContext, AuthenticationResult, HttpRequest, ProfileRequestContext,
    SubjectCanonicalizationContext,
};
use crate::principal::serializer::PrincipalSerializerRegistry;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub subject_name: Option<String>,
    pub session_name: Option<String>,
    pub with_request: bool,
    pub username_source: UsernameSource,
    pub flow_id: String,
}

/// Report printed after a dry run.
#[derive(Debug, Serialize)]
struct Report {
    request_id: String,
    event: String,
    canonical_name: Option<String>,
    principals: Vec<String>,
}

/// Run the validator once against a context built from `args`.
///
/// # Errors
/// Returns an error if the validator is misconfigured or the report cannot be encoded.
pub fn execute(args: Args) -> Result<String> {
    let config = ValidatorConfig::new()
        .with_flow_id(args.flow_id)
        .with_username_source(args.username_source);
    let validator = BypassValidator::from_config(&config);

    let mut ctx = ProfileRequestContext::new()
        .with_authentication(AuthenticationContext::new(validator.flow_id()));
    if let Some(name) = args.subject_name {
        ctx = ctx.with_subject_principal_name(name);
    }
    if let Some(name) = args.session_name {
        ctx = ctx.with_session_principal_name(name);
    }
    if args.with_request {
        ctx = ctx.with_http_request(HttpRequest::default());
    }

    let outcome = validator.validate(&mut ctx)?;
    debug!("Validation outcome: {outcome:?}");

    let principals = match ctx
        .authentication()
        .and_then(AuthenticationContext::authentication_result)
        .map(AuthenticationResult::subject)
    {
        Some(subject) => PrincipalSerializerRegistry::default().serialize_subject(subject)?,
        None => Vec::new(),
    };

    let report = Report {
        request_id: ctx.request_id().to_string(),
        event: outcome.event().to_string(),
        canonical_name: ctx
            .canonicalization()
            .and_then(SubjectCanonicalizationContext::principal_name)
            .map(ToString::to_string),
        principals,
    };

    serde_json::to_string_pretty(&report).context("failed to encode report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn args(subject_name: Option<&str>, with_request: bool) -> Args {
        Args {
            subject_name: subject_name.map(ToString::to_string),
            session_name: None,
            with_request,
            username_source: UsernameSource::Canonical,
            flow_id: "authn/DuoBypass".to_string(),
        }
    }

    #[test]
    fn reports_success() -> Result<()> {
        let report: Value = serde_json::from_str(&execute(args(Some("alice"), true))?)?;
        assert_eq!(report["event"], "proceed");
        assert_eq!(report["canonical_name"], "alice");
        assert_eq!(report["principals"][0], r#"{"Entrust":"alice"}"#);
        Ok(())
    }

    #[test]
    fn reports_failures() -> Result<()> {
        let report: Value = serde_json::from_str(&execute(args(None, true))?)?;
        assert_eq!(report["event"], "NoCredentials");
        assert_eq!(report["canonical_name"], Value::Null);

        let report: Value = serde_json::from_str(&execute(args(Some("bob"), false))?)?;
        assert_eq!(report["event"], "InvalidProfileContext");
        assert_eq!(report["principals"], serde_json::json!([]));
        Ok(())
    }
}
