use std::any::Any;
use std::fmt;

use super::{trim_or_none, Principal};
use crate::Error;

/// Principal recording that a login satisfied the DuoBypass factor for a user.
///
/// The username is trimmed on construction and never changes afterwards.
/// Equality and hashing consider only the username.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BypassPrincipal {
    username: String,
}

impl BypassPrincipal {
    /// Create a principal for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is empty or only whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, Error> {
        let username = trim_or_none(name.as_ref())
            .ok_or(Error::InvalidArgument("Username cannot be null or empty"))?;
        Ok(Self {
            username: username.to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.username
    }
}

impl TryFrom<&str> for BypassPrincipal {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for BypassPrincipal {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for BypassPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BypassPrincipal{{username={}}}", self.username)
    }
}

impl Principal for BypassPrincipal {
    fn name(&self) -> &str {
        &self.username
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_principal(&self) -> Box<dyn Principal> {
        Box::new(self.clone())
    }

    fn eq_principal(&self, other: &dyn Principal) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other == self)
    }
}
