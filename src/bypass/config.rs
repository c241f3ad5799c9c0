use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::flow::{
    CanonicalUsernameLookup, SessionUsernameLookup, SubjectUsernameLookup, UsernameLookup,
};

/// Flow identifier used when none is configured.
pub const DEFAULT_FLOW_ID: &str = "authn/DuoBypass";

/// Where the validator looks for the already established username.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UsernameSource {
    /// Subject name from this flow, falling back to the IdP session.
    #[default]
    Canonical,
    Subject,
    Session,
}

impl UsernameSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::Subject => "subject",
            Self::Session => "session",
        }
    }

    pub(crate) fn lookup(self) -> Arc<dyn UsernameLookup> {
        match self {
            Self::Canonical => Arc::new(CanonicalUsernameLookup),
            Self::Subject => Arc::new(SubjectUsernameLookup),
            Self::Session => Arc::new(SessionUsernameLookup),
        }
    }
}

impl FromStr for UsernameSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "subject" => Ok(Self::Subject),
            "session" => Ok(Self::Session),
            other => Err(format!("invalid username source: {other}")),
        }
    }
}

impl fmt::Display for UsernameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validator configuration loaded at startup.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    flow_id: String,
    username_source: UsernameSource,
}

impl ValidatorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            flow_id: DEFAULT_FLOW_ID.to_string(),
            username_source: UsernameSource::default(),
        }
    }

    #[must_use]
    pub fn with_flow_id(mut self, flow_id: String) -> Self {
        self.flow_id = flow_id;
        self
    }

    #[must_use]
    pub fn with_username_source(mut self, source: UsernameSource) -> Self {
        self.username_source = source;
        self
    }

    #[must_use]
    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    #[must_use]
    pub fn username_source(&self) -> UsernameSource {
        self.username_source
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
