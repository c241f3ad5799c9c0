//! Strategies for finding the username an earlier step already established.

use super::ProfileRequestContext;

/// Resolves a username from the current request context.
///
/// Closures of the form `Fn(&ProfileRequestContext) -> Option<String>` are
/// accepted directly.
pub trait UsernameLookup: Send + Sync {
    fn lookup(&self, ctx: &ProfileRequestContext) -> Option<String>;
}

impl<F> UsernameLookup for F
where
    F: Fn(&ProfileRequestContext) -> Option<String> + Send + Sync,
{
    fn lookup(&self, ctx: &ProfileRequestContext) -> Option<String> {
        self(ctx)
    }
}

/// Canonical name of this login: the subject's name, else the session's.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalUsernameLookup;

impl UsernameLookup for CanonicalUsernameLookup {
    fn lookup(&self, ctx: &ProfileRequestContext) -> Option<String> {
        ctx.subject_principal_name()
            .or_else(|| ctx.session_principal_name())
            .map(ToString::to_string)
    }
}

/// Only the name established for the subject in this flow.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubjectUsernameLookup;

impl UsernameLookup for SubjectUsernameLookup {
    fn lookup(&self, ctx: &ProfileRequestContext) -> Option<String> {
        ctx.subject_principal_name().map(ToString::to_string)
    }
}

/// Only the name bound to an existing IdP session.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionUsernameLookup;

impl UsernameLookup for SessionUsernameLookup {
    fn lookup(&self, ctx: &ProfileRequestContext) -> Option<String> {
        ctx.session_principal_name().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_prefers_subject_over_session() {
        let ctx = ProfileRequestContext::new()
            .with_subject_principal_name("alice")
            .with_session_principal_name("bob");
        assert_eq!(CanonicalUsernameLookup.lookup(&ctx), Some("alice".to_string()));
        assert_eq!(SubjectUsernameLookup.lookup(&ctx), Some("alice".to_string()));
        assert_eq!(SessionUsernameLookup.lookup(&ctx), Some("bob".to_string()));
    }

    #[test]
    fn canonical_falls_back_to_session() {
        let ctx = ProfileRequestContext::new().with_session_principal_name("bob");
        assert_eq!(CanonicalUsernameLookup.lookup(&ctx), Some("bob".to_string()));
        assert_eq!(SubjectUsernameLookup.lookup(&ctx), None);
    }

    #[test]
    fn closures_are_lookups() {
        let fixed = |_: &ProfileRequestContext| Some("carol".to_string());
        assert_eq!(
            fixed.lookup(&ProfileRequestContext::new()),
            Some("carol".to_string())
        );
    }
}
