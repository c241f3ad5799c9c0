use std::fmt;

use crate::principal::Principal;

/// Set of principals describing an authenticated user.
#[derive(Clone, Default)]
pub struct Subject {
    principals: Vec<Box<dyn Principal>>,
}

impl Subject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `principal` unless an equal one is already present.
    ///
    /// Returns `true` if the subject changed.
    pub fn add(&mut self, principal: Box<dyn Principal>) -> bool {
        if self.contains(&*principal) {
            return false;
        }
        self.principals.push(principal);
        true
    }

    #[must_use]
    pub fn contains(&self, principal: &dyn Principal) -> bool {
        self.principals
            .iter()
            .any(|existing| existing.eq_principal(principal))
    }

    pub fn principals(&self) -> impl Iterator<Item = &dyn Principal> {
        self.principals.iter().map(AsRef::as_ref)
    }

    /// Principals of one concrete type.
    pub fn principals_of<T: Principal>(&self) -> impl Iterator<Item = &T> {
        self.principals
            .iter()
            .filter_map(|principal| principal.downcast_ref::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.principals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.principals().all(|principal| other.contains(principal))
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.principals.iter()).finish()
    }
}

/// Result of a successful authentication flow.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticationResult {
    flow_id: String,
    subject: Subject,
}

impl AuthenticationResult {
    #[must_use]
    pub fn new(flow_id: impl Into<String>, subject: Subject) -> Self {
        Self {
            flow_id: flow_id.into(),
            subject,
        }
    }

    #[must_use]
    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }
}
