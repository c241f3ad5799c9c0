//! # duo-bypass (DuoBypass second-factor validation)
//!
//! Marks the DuoBypass factor of a login as satisfied when an earlier step of
//! the same login already established who the user is. No challenge is sent to
//! any MFA provider.
//!
//! ## Pieces
//!
//! - [`principal::BypassPrincipal`]: the fact "this login passed DuoBypass as
//!   user U", attached to the authenticated subject.
//! - [`principal::serializer::BypassPrincipalSerializer`]: the stored form
//!   `{"Entrust":"<username>"}`. The field name is fixed for compatibility
//!   with existing records.
//! - [`bypass::BypassValidator`]: the two-phase validation action. It resolves
//!   the username, checks the request, and on success adds the principal and
//!   stores the name as the canonicalization result.
//!
//! ## Outcomes
//!
//! Every run signals exactly one [`flow::EventId`]: `proceed`,
//! `NoCredentials`, or `InvalidProfileContext`. Request problems never surface
//! as errors; [`Error`] is reserved for setup mistakes and malformed stored
//! data.

pub mod bypass;
pub mod cli;
mod error;
pub mod flow;
pub mod principal;

pub use error::Error;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
