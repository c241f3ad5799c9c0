//! Two-phase validation actions.
//!
//! An action first checks its preconditions against the request context
//! without changing it. If they hold, it produces the subject for this login.
//! [`run`] drives both phases and is the only place that mutates the context,
//! so an abandoned attempt never leaves partial effects behind. Exactly one
//! event is signalled per run.

use tracing::error;

use super::{AuthenticationResult, EventId, ProfileRequestContext, Subject};
use crate::Error;

/// Terminal result of one validation run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Succeeded,
    NoCredentials,
    InvalidContext,
}

impl Outcome {
    /// Event signalled for this outcome.
    #[must_use]
    pub fn event(self) -> EventId {
        match self {
            Self::Succeeded => EventId::Proceed,
            Self::NoCredentials => EventId::NoCredentials,
            Self::InvalidContext => EventId::InvalidProfileContext,
        }
    }
}

/// Why the precondition phase stopped an action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rejection {
    outcome: Outcome,
    record_failure: bool,
}

impl Rejection {
    /// Nothing to validate; the flow may try another login method.
    #[must_use]
    pub fn no_credentials() -> Self {
        Self {
            outcome: Outcome::NoCredentials,
            record_failure: false,
        }
    }

    /// The request context is unusable. Recorded as a failed attempt.
    #[must_use]
    pub fn invalid_context() -> Self {
        Self {
            outcome: Outcome::InvalidContext,
            record_failure: true,
        }
    }

    #[must_use]
    pub fn outcome(self) -> Outcome {
        self.outcome
    }
}

/// What a successful execute phase hands back to [`run`].
#[derive(Debug)]
pub struct Validated {
    /// Subject for the authentication result.
    pub subject: Subject,
    /// Name to store as the canonicalization result, skipping later canonicalization.
    pub canonical_name: Option<String>,
}

pub trait ValidationAction {
    /// Per-run state passed from the precondition phase to the execute phase.
    type Attempt;

    /// Name used in log lines.
    fn name(&self) -> &'static str;

    fn is_initialized(&self) -> bool;

    /// Check preconditions without mutating the context.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] describing the event to signal.
    fn pre_execute(&self, ctx: &ProfileRequestContext) -> Result<Self::Attempt, Rejection>;

    fn execute(&self, ctx: &ProfileRequestContext, attempt: Self::Attempt) -> Validated;
}

/// Run `action` against `ctx` and signal its outcome.
///
/// # Errors
///
/// Returns [`Error::Uninitialized`] if the action was never initialized.
/// Problems with the request itself are reported through the returned
/// [`Outcome`] and the signalled event, never as errors.
pub fn run<A: ValidationAction>(
    action: &A,
    ctx: &mut ProfileRequestContext,
) -> Result<Outcome, Error> {
    if !action.is_initialized() {
        return Err(Error::Uninitialized(action.name()));
    }

    let Some(flow_id) = ctx
        .authentication()
        .and_then(|authn| authn.attempted_flow())
        .map(ToString::to_string)
    else {
        error!(
            request_id = %ctx.request_id(),
            action = action.name(),
            "No attempted authentication flow within profile request context"
        );
        ctx.signal(EventId::InvalidProfileContext);
        return Ok(Outcome::InvalidContext);
    };

    let attempt = match action.pre_execute(ctx) {
        Ok(attempt) => attempt,
        Err(rejection) => {
            if rejection.record_failure {
                if let Some(authn) = ctx.authentication_mut() {
                    authn.record_failure();
                }
            }
            ctx.signal(rejection.outcome.event());
            return Ok(rejection.outcome);
        }
    };

    let Validated {
        subject,
        canonical_name,
    } = action.execute(ctx, attempt);
    let result = AuthenticationResult::new(flow_id, subject);

    if let Some(authn) = ctx.authentication_mut() {
        authn.record_success();
        authn.set_authentication_result(result);
    }
    if let Some(name) = canonical_name {
        ctx.canonicalization_mut().set_principal_name(name);
    }
    ctx.signal(EventId::Proceed);

    Ok(Outcome::Succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{AttemptOutcome, AuthenticationContext};
    use crate::principal::UsernamePrincipal;

    struct Fixed {
        initialized: bool,
        verdict: Result<&'static str, Rejection>,
    }

    impl ValidationAction for Fixed {
        type Attempt = &'static str;

        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn is_initialized(&self) -> bool {
            self.initialized
        }

        fn pre_execute(&self, _ctx: &ProfileRequestContext) -> Result<&'static str, Rejection> {
            self.verdict
        }

        fn execute(&self, _ctx: &ProfileRequestContext, attempt: &'static str) -> Validated {
            let mut subject = Subject::new();
            if let Ok(principal) = UsernamePrincipal::new(attempt) {
                subject.add(Box::new(principal));
            }
            Validated {
                subject,
                canonical_name: None,
            }
        }
    }

    fn ctx() -> ProfileRequestContext {
        ProfileRequestContext::new().with_authentication(AuthenticationContext::new("authn/Test"))
    }

    #[test]
    fn uninitialized_actions_do_not_run() {
        let action = Fixed {
            initialized: false,
            verdict: Ok("alice"),
        };
        let mut ctx = ctx();
        assert!(matches!(run(&action, &mut ctx), Err(Error::Uninitialized("Fixed"))));
        assert!(ctx.event().is_none());
    }

    #[test]
    fn missing_authentication_context_is_invalid() -> Result<(), Error> {
        let action = Fixed {
            initialized: true,
            verdict: Ok("alice"),
        };
        let mut ctx = ProfileRequestContext::new();
        assert_eq!(run(&action, &mut ctx)?, Outcome::InvalidContext);
        assert_eq!(ctx.event(), Some(EventId::InvalidProfileContext));
        Ok(())
    }

    #[test]
    fn rejections_only_record_failure_when_asked() -> Result<(), Error> {
        let mut ctx = ctx();
        let action = Fixed {
            initialized: true,
            verdict: Err(Rejection::no_credentials()),
        };
        assert_eq!(run(&action, &mut ctx)?, Outcome::NoCredentials);
        assert_eq!(ctx.authentication().and_then(AuthenticationContext::outcome), None);

        let action = Fixed {
            initialized: true,
            verdict: Err(Rejection::invalid_context()),
        };
        assert_eq!(run(&action, &mut ctx)?, Outcome::InvalidContext);
        assert_eq!(
            ctx.authentication().and_then(AuthenticationContext::outcome),
            Some(AttemptOutcome::Failure)
        );
        Ok(())
    }

    #[test]
    fn success_stores_result_for_attempted_flow() -> Result<(), Error> {
        let action = Fixed {
            initialized: true,
            verdict: Ok("alice"),
        };
        let mut ctx = ctx();
        assert_eq!(run(&action, &mut ctx)?, Outcome::Succeeded);
        assert_eq!(ctx.event(), Some(EventId::Proceed));

        let result = ctx
            .authentication()
            .and_then(AuthenticationContext::authentication_result);
        assert_eq!(result.map(AuthenticationResult::flow_id), Some("authn/Test"));
        assert_eq!(result.map(|r| r.subject().len()), Some(1));
        assert!(ctx.canonicalization().is_none());
        Ok(())
    }
}
