//! Persistence of principals as compact JSON strings.
//!
//! The host stores every principal of an authentication result as a string.
//! Serializers are tried in registration order: the first that supports a
//! principal (by type) or a stored value (by a syntactic pre-filter) handles
//! it. Stored values no serializer recognizes are skipped rather than treated
//! as errors, since results written by other deployments may carry principal
//! kinds this process does not know.

mod bypass;
mod username;

use tracing::debug;

pub use bypass::{BypassPrincipalSerializer, ENTRUST_FIELD};
pub use username::UsernamePrincipalSerializer;

use crate::flow::Subject;
use crate::principal::Principal;
use crate::Error;

/// Converts one kind of principal to and from its stored string form.
///
/// Implementations hold no per-call state and may be shared across threads.
pub trait PrincipalSerializer: Send + Sync {
    /// Whether this serializer handles the runtime type of `principal`.
    fn supports_principal(&self, principal: &dyn Principal) -> bool;

    /// # Errors
    ///
    /// Returns an error if `principal` is not supported or encoding fails.
    fn serialize(&self, principal: &dyn Principal) -> Result<String, Error>;

    /// Cheap syntactic check of a stored value, done before any parsing.
    fn supports_value(&self, value: &str) -> bool;

    /// Decode a stored value. `Ok(None)` means the value carried no principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is malformed.
    fn deserialize(&self, value: &str) -> Result<Option<Box<dyn Principal>>, Error>;
}

/// Ordered set of serializers consulted by supports-dispatch.
pub struct PrincipalSerializerRegistry {
    serializers: Vec<Box<dyn PrincipalSerializer>>,
}

impl PrincipalSerializerRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            serializers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_serializer(mut self, serializer: impl PrincipalSerializer + 'static) -> Self {
        self.serializers.push(Box::new(serializer));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.serializers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.serializers.is_empty()
    }

    /// Serialize with the first serializer supporting `principal`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPrincipal`] if no serializer matches, or the
    /// matching serializer's error.
    pub fn serialize(&self, principal: &dyn Principal) -> Result<String, Error> {
        let serializer = self
            .serializers
            .iter()
            .find(|serializer| serializer.supports_principal(principal))
            .ok_or_else(|| Error::UnsupportedPrincipal(principal.to_string()))?;
        serializer.serialize(principal)
    }

    /// Deserialize with the first serializer supporting `value`.
    ///
    /// # Errors
    ///
    /// Returns the matching serializer's error for malformed data.
    pub fn deserialize(&self, value: &str) -> Result<Option<Box<dyn Principal>>, Error> {
        let Some(serializer) = self
            .serializers
            .iter()
            .find(|serializer| serializer.supports_value(value))
        else {
            debug!("No principal serializer supports stored value, skipping");
            return Ok(None);
        };
        serializer.deserialize(value)
    }

    /// Serialize every principal of `subject`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any principal cannot be serialized.
    pub fn serialize_subject(&self, subject: &Subject) -> Result<Vec<String>, Error> {
        subject
            .principals()
            .map(|principal| self.serialize(principal))
            .collect()
    }

    /// Rebuild a subject from stored values, skipping values with no principal.
    ///
    /// # Errors
    ///
    /// Returns the first deserialization error encountered.
    pub fn deserialize_subject<S: AsRef<str>>(&self, values: &[S]) -> Result<Subject, Error> {
        let mut subject = Subject::new();
        for value in values {
            if let Some(principal) = self.deserialize(value.as_ref())? {
                subject.add(principal);
            }
        }
        Ok(subject)
    }
}

impl Default for PrincipalSerializerRegistry {
    fn default() -> Self {
        Self::new()
            .with_serializer(BypassPrincipalSerializer)
            .with_serializer(UsernamePrincipalSerializer)
    }
}
