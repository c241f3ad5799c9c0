//! Request-scoped state shared by the actions of one login attempt.

use std::net::IpAddr;

use ulid::Ulid;

use super::{AuthenticationResult, EventId};

/// Inbound HTTP request details visible to login actions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpRequest {
    pub remote_addr: Option<IpAddr>,
    pub user_agent: Option<String>,
}

/// Outcome recorded against the attempted authentication flow.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttemptOutcome {
    Success,
    Failure,
}

/// State of the authentication step currently in progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthenticationContext {
    attempted_flow: Option<String>,
    outcome: Option<AttemptOutcome>,
    result: Option<AuthenticationResult>,
}

impl AuthenticationContext {
    /// Context for an attempt of `flow_id`.
    #[must_use]
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            attempted_flow: Some(flow_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attempted_flow(&self) -> Option<&str> {
        self.attempted_flow.as_deref()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<AttemptOutcome> {
        self.outcome
    }

    pub fn record_success(&mut self) {
        self.outcome = Some(AttemptOutcome::Success);
    }

    pub fn record_failure(&mut self) {
        self.outcome = Some(AttemptOutcome::Failure);
    }

    #[must_use]
    pub fn authentication_result(&self) -> Option<&AuthenticationResult> {
        self.result.as_ref()
    }

    pub fn set_authentication_result(&mut self, result: AuthenticationResult) {
        self.result = Some(result);
    }
}

/// Outcome of subject canonicalization; later steps read the principal name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectCanonicalizationContext {
    principal_name: Option<String>,
}

impl SubjectCanonicalizationContext {
    #[must_use]
    pub fn principal_name(&self) -> Option<&str> {
        self.principal_name.as_deref()
    }

    pub fn set_principal_name(&mut self, name: impl Into<String>) {
        self.principal_name = Some(name.into());
    }
}

/// Per-request context handed to every action of a login flow.
#[derive(Debug)]
pub struct ProfileRequestContext {
    request_id: Ulid,
    http_request: Option<HttpRequest>,
    authentication: Option<AuthenticationContext>,
    subject_principal_name: Option<String>,
    session_principal_name: Option<String>,
    canonicalization: Option<SubjectCanonicalizationContext>,
    event: Option<EventId>,
}

impl ProfileRequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Ulid::new(),
            http_request: None,
            authentication: None,
            subject_principal_name: None,
            session_principal_name: None,
            canonicalization: None,
            event: None,
        }
    }

    #[must_use]
    pub fn with_http_request(mut self, request: HttpRequest) -> Self {
        self.http_request = Some(request);
        self
    }

    #[must_use]
    pub fn with_authentication(mut self, authentication: AuthenticationContext) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Name established for the subject by an earlier step of this flow.
    #[must_use]
    pub fn with_subject_principal_name(mut self, name: impl Into<String>) -> Self {
        self.subject_principal_name = Some(name.into());
        self
    }

    /// Name bound to an existing IdP session.
    #[must_use]
    pub fn with_session_principal_name(mut self, name: impl Into<String>) -> Self {
        self.session_principal_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn request_id(&self) -> Ulid {
        self.request_id
    }

    #[must_use]
    pub fn http_request(&self) -> Option<&HttpRequest> {
        self.http_request.as_ref()
    }

    #[must_use]
    pub fn authentication(&self) -> Option<&AuthenticationContext> {
        self.authentication.as_ref()
    }

    pub fn authentication_mut(&mut self) -> Option<&mut AuthenticationContext> {
        self.authentication.as_mut()
    }

    #[must_use]
    pub fn subject_principal_name(&self) -> Option<&str> {
        self.subject_principal_name.as_deref()
    }

    #[must_use]
    pub fn session_principal_name(&self) -> Option<&str> {
        self.session_principal_name.as_deref()
    }

    #[must_use]
    pub fn canonicalization(&self) -> Option<&SubjectCanonicalizationContext> {
        self.canonicalization.as_ref()
    }

    /// Canonicalization context, created on first use.
    pub fn canonicalization_mut(&mut self) -> &mut SubjectCanonicalizationContext {
        self.canonicalization.get_or_insert_with(Default::default)
    }

    /// Most recently signalled event.
    #[must_use]
    pub fn event(&self) -> Option<EventId> {
        self.event
    }

    pub fn signal(&mut self, event: EventId) {
        self.event = Some(event);
    }
}

impl Default for ProfileRequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_empty() {
        let ctx = ProfileRequestContext::new();
        assert!(ctx.http_request().is_none());
        assert!(ctx.authentication().is_none());
        assert!(ctx.canonicalization().is_none());
        assert!(ctx.event().is_none());
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(
            ProfileRequestContext::new().request_id(),
            ProfileRequestContext::new().request_id()
        );
    }

    #[test]
    fn canonicalization_is_created_on_demand() {
        let mut ctx = ProfileRequestContext::new();
        ctx.canonicalization_mut().set_principal_name("alice");
        assert_eq!(
            ctx.canonicalization()
                .and_then(SubjectCanonicalizationContext::principal_name),
            Some("alice")
        );
    }

    #[test]
    fn authentication_context_records_latest_outcome() {
        let mut authn = AuthenticationContext::new("authn/DuoBypass");
        assert_eq!(authn.attempted_flow(), Some("authn/DuoBypass"));
        assert_eq!(authn.outcome(), None);
        authn.record_failure();
        assert_eq!(authn.outcome(), Some(AttemptOutcome::Failure));
        authn.record_success();
        assert_eq!(authn.outcome(), Some(AttemptOutcome::Success));
    }
}
