use std::any::Any;
use std::fmt;

use super::{trim_or_none, Principal};
use crate::Error;

/// Plain username principal produced by the host's primary login flows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UsernamePrincipal {
    username: String,
}

impl UsernamePrincipal {
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

impl fmt::Display for UsernamePrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UsernamePrincipal{{username={}}}", self.username)
    }
}

impl Principal for UsernamePrincipal {
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
