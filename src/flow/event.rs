use std::fmt;

/// Outcome events signalled to the surrounding login flow.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EventId {
    Proceed,
    InvalidProfileContext,
    NoCredentials,
    /// Part of the shared vocabulary; not signalled by the bypass check.
    InvalidCredentials,
}

impl EventId {
    /// Event identifier as understood by the flow engine.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proceed => "proceed",
            Self::InvalidProfileContext => "InvalidProfileContext",
            Self::NoCredentials => "NoCredentials",
            Self::InvalidCredentials => "InvalidCredentials",
        }
    }

    #[must_use]
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "proceed" => Some(Self::Proceed),
            "InvalidProfileContext" => Some(Self::InvalidProfileContext),
            "NoCredentials" => Some(Self::NoCredentials),
            "InvalidCredentials" => Some(Self::InvalidCredentials),
            _ => None,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
