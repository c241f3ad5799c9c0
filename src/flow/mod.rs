//! Login-flow plumbing the bypass check plugs into: the request context,
//! outcome events, subjects and results, username lookups, and the two-phase
//! action runner.

pub mod action;
mod context;
mod event;
pub mod lookup;
mod subject;

pub use action::{run, Outcome, Rejection, Validated, ValidationAction};
pub use context::{
    AttemptOutcome, AuthenticationContext, HttpRequest, ProfileRequestContext,
    SubjectCanonicalizationContext,
};
pub use event::EventId;
pub use lookup::{
    CanonicalUsernameLookup, SessionUsernameLookup, SubjectUsernameLookup, UsernameLookup,
};
pub use subject::{AuthenticationResult, Subject};
