//! Principals: single facts about an authenticated subject.
//!
//! A subject collects principals of different kinds. Each kind knows how to
//! name itself, clone itself into a box, and compare itself against another
//! principal of unknown type. Persistence is handled by the serializers in
//! [`serializer`].

mod bypass;
pub mod serializer;
mod username;

use std::any::Any;
use std::fmt;

pub use bypass::BypassPrincipal;
pub use username::UsernamePrincipal;

/// A single fact about an authenticated subject.
pub trait Principal: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Name carried by this principal.
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    /// Clone into an independent boxed principal.
    fn clone_principal(&self) -> Box<dyn Principal>;

    /// Value equality against a principal of any type.
    fn eq_principal(&self, other: &dyn Principal) -> bool;
}

impl dyn Principal {
    /// Downcast to a concrete principal type.
    #[must_use]
    pub fn downcast_ref<T: Principal>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[must_use]
    pub fn is<T: Principal>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl Clone for Box<dyn Principal> {
    fn clone(&self) -> Self {
        self.clone_principal()
    }
}

impl PartialEq for dyn Principal {
    fn eq(&self, other: &Self) -> bool {
        self.eq_principal(other)
    }
}

/// Trim a candidate name, rejecting blank input.
pub(crate) fn trim_or_none(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
