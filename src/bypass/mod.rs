//! DuoBypass validation.
//!
//! Flow Overview:
//! 1) Resolve the username an earlier step of this login already settled on.
//! 2) Require the inbound request to be available.
//! 3) Mark the factor satisfied by adding a [`BypassPrincipal`] to the subject.
//! 4) Store the same name as the canonicalization result; it is canonical
//!    already, so later canonicalization is skipped.
//!
//! Security boundaries: no challenge is performed here. The check trusts the
//! username resolver completely, so it must only read names produced by flows
//! that authenticated the user.

mod config;

use std::sync::Arc;

use tracing::{error, info, warn};

pub use config::{UsernameSource, ValidatorConfig, DEFAULT_FLOW_ID};

use crate::flow::{
    run, CanonicalUsernameLookup, Outcome, ProfileRequestContext, Rejection, Subject,
    UsernameLookup, Validated, ValidationAction,
};
use crate::principal::BypassPrincipal;
use crate::Error;

const ACTION_NAME: &str = "ValidateDuoBypass";

/// Per-run state produced by the precondition phase.
#[derive(Debug)]
pub struct BypassAttempt {
    principal: BypassPrincipal,
}

impl BypassAttempt {
    #[must_use]
    pub fn username(&self) -> &str {
        self.principal.name()
    }
}

/// Validates that a previously established username satisfies the bypass factor.
///
/// The lookup strategy may only be replaced before [`initialize`](Self::initialize).
/// Once initialized the validator is immutable and can be shared between
/// concurrent requests.
#[derive(Clone)]
pub struct BypassValidator {
    flow_id: String,
    username_lookup: Arc<dyn UsernameLookup>,
    initialized: bool,
}

impl BypassValidator {
    /// Uninitialized validator reading the canonical username.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flow_id: DEFAULT_FLOW_ID.to_string(),
            username_lookup: Arc::new(CanonicalUsernameLookup),
            initialized: false,
        }
    }

    /// Initialized validator built from `config`.
    #[must_use]
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self {
            flow_id: config.flow_id().to_string(),
            username_lookup: config.username_source().lookup(),
            initialized: true,
        }
    }

    /// Replace the username lookup strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmodifiable`] once the validator is initialized.
    pub fn set_username_lookup(
        &mut self,
        lookup: impl UsernameLookup + 'static,
    ) -> Result<(), Error> {
        if self.initialized {
            return Err(Error::Unmodifiable(ACTION_NAME));
        }
        self.username_lookup = Arc::new(lookup);
        Ok(())
    }

    /// Freeze the configuration. Calling it again has no effect.
    pub fn initialize(&mut self) {
        self.initialized = true;
    }

    #[must_use]
    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// Run the bypass check against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Uninitialized`] if [`initialize`](Self::initialize) was
    /// never called. Request problems are signalled as events instead.
    pub fn validate(&self, ctx: &mut ProfileRequestContext) -> Result<Outcome, Error> {
        run(self, ctx)
    }
}

impl Default for BypassValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BypassValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BypassValidator")
            .field("flow_id", &self.flow_id)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl ValidationAction for BypassValidator {
    type Attempt = BypassAttempt;

    fn name(&self) -> &'static str {
        ACTION_NAME
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn pre_execute(&self, ctx: &ProfileRequestContext) -> Result<BypassAttempt, Rejection> {
        let request_id = ctx.request_id();

        // A blank name counts as no name at all.
        let Some(principal) = self
            .username_lookup
            .lookup(ctx)
            .and_then(|username| BypassPrincipal::new(username).ok())
        else {
            warn!(
                %request_id,
                "{ACTION_NAME}: no principal name available to check DuoBypass result"
            );
            return Err(Rejection::no_credentials());
        };

        if ctx.http_request().is_none() {
            error!(%request_id, "{ACTION_NAME}: no HTTP request available");
            return Err(Rejection::invalid_context());
        }

        Ok(BypassAttempt { principal })
    }

    fn execute(&self, ctx: &ProfileRequestContext, attempt: BypassAttempt) -> Validated {
        info!(
            request_id = %ctx.request_id(),
            "DuoBypass authentication succeeded for '{}'",
            attempt.username()
        );

        let canonical_name = attempt.username().to_string();
        let mut subject = Subject::new();
        subject.add(Box::new(attempt.principal));

        Validated {
            subject,
            canonical_name: Some(canonical_name),
        }
    }
}
