use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::PrincipalSerializer;
use crate::principal::{BypassPrincipal, Principal};
use crate::Error;

/// Field name of the persisted form. Kept for compatibility with stored records.
pub const ENTRUST_FIELD: &str = "Entrust";

/// Cheap pre-filter applied before a full parse is attempted.
const VALUE_PATTERN: &str = r#"^\{"Entrust":.*\}$"#;

#[derive(Serialize)]
struct Wire<'a> {
    #[serde(rename = "Entrust")]
    entrust: &'a str,
}

/// Serializer for [`BypassPrincipal`] using the `{"Entrust":"<username>"}` form.
#[derive(Clone, Copy, Debug, Default)]
pub struct BypassPrincipalSerializer;

impl BypassPrincipalSerializer {
    /// Encode `principal` in its persisted form.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn encode(principal: &BypassPrincipal) -> Result<String, Error> {
        Ok(serde_json::to_string(&Wire {
            entrust: principal.name(),
        })?)
    }

    /// Decode a persisted value.
    ///
    /// A well-formed object without a usable `Entrust` entry yields `Ok(None)`,
    /// since other principal kinds share the same storage.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not JSON, is not a JSON object, carries a
    /// non-string `Entrust` entry, or names a blank user.
    pub fn decode(value: &str) -> Result<Option<BypassPrincipal>, Error> {
        let parsed: Value = serde_json::from_str(value)?;
        let Value::Object(object) = parsed else {
            return Err(Error::InvalidDataStructure("BypassPrincipal"));
        };

        match object.get(ENTRUST_FIELD) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(username)) if username.is_empty() => Ok(None),
            Some(Value::String(username)) => BypassPrincipal::new(username).map(Some),
            Some(_) => Err(Error::InvalidDataStructure("BypassPrincipal")),
        }
    }
}

impl PrincipalSerializer for BypassPrincipalSerializer {
    fn supports_principal(&self, principal: &dyn Principal) -> bool {
        principal.is::<BypassPrincipal>()
    }

    fn serialize(&self, principal: &dyn Principal) -> Result<String, Error> {
        let principal = principal
            .downcast_ref::<BypassPrincipal>()
            .ok_or_else(|| Error::UnsupportedPrincipal(principal.to_string()))?;
        Self::encode(principal)
    }

    fn supports_value(&self, value: &str) -> bool {
        Regex::new(VALUE_PATTERN).is_ok_and(|re| re.is_match(value))
    }

    fn deserialize(&self, value: &str) -> Result<Option<Box<dyn Principal>>, Error> {
        Ok(Self::decode(value)?.map(|principal| Box::new(principal) as Box<dyn Principal>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::UsernamePrincipal;

    #[test]
    fn serialize_produces_compact_entrust_object() -> Result<(), Error> {
        let principal = BypassPrincipal::new("alice")?;
        assert_eq!(
            BypassPrincipalSerializer.serialize(&principal)?,
            r#"{"Entrust":"alice"}"#
        );
        Ok(())
    }

    #[test]
    fn serialize_escapes_json_strings() -> Result<(), Error> {
        let principal = BypassPrincipal::new(r#"a"li\ce"#)?;
        let encoded = BypassPrincipalSerializer::encode(&principal)?;
        assert_eq!(encoded, r#"{"Entrust":"a\"li\\ce"}"#);
        assert_eq!(BypassPrincipalSerializer::decode(&encoded)?, Some(principal));
        Ok(())
    }

    #[test]
    fn round_trip_preserves_identity() -> Result<(), Error> {
        for name in ["alice", " bob ", "carol@example.org", "dé-jà vu", "x"] {
            let principal = BypassPrincipal::new(name)?;
            let encoded = BypassPrincipalSerializer::encode(&principal)?;
            assert!(BypassPrincipalSerializer.supports_value(&encoded));
            assert_eq!(BypassPrincipalSerializer::decode(&encoded)?, Some(principal));
        }
        Ok(())
    }

    #[test]
    fn decode_soft_fails_without_username() -> Result<(), Error> {
        assert_eq!(BypassPrincipalSerializer::decode(r#"{"Entrust":""}"#)?, None);
        assert_eq!(BypassPrincipalSerializer::decode(r#"{"Other":"x"}"#)?, None);
        assert_eq!(BypassPrincipalSerializer::decode(r#"{"Entrust":null}"#)?, None);
        assert_eq!(BypassPrincipalSerializer::decode("{}")?, None);
        Ok(())
    }

    #[test]
    fn decode_rejects_non_objects() {
        for value in ["[1,2,3]", r#""alice""#, "42", "null"] {
            assert!(
                matches!(
                    BypassPrincipalSerializer::decode(value),
                    Err(Error::InvalidDataStructure(_))
                ),
                "expected InvalidDataStructure for {value}"
            );
        }
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(
            BypassPrincipalSerializer::decode(r#"{"Entrust":"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn decode_rejects_non_string_username() {
        assert!(matches!(
            BypassPrincipalSerializer::decode(r#"{"Entrust":7}"#),
            Err(Error::InvalidDataStructure(_))
        ));
    }

    #[test]
    fn decode_never_returns_blank_principal() {
        assert!(matches!(
            BypassPrincipalSerializer::decode(r#"{"Entrust":"   "}"#),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn supports_value_is_syntactic_only() {
        let serializer = BypassPrincipalSerializer;
        assert!(serializer.supports_value(r#"{"Entrust":"alice"}"#));
        assert!(serializer.supports_value(r#"{"Entrust":not json at all}"#));
        assert!(serializer.supports_value(r#"{"Entrust":}"#));
        assert!(!serializer.supports_value(r#"{"U":"alice"}"#));
        assert!(!serializer.supports_value(r#" {"Entrust":"alice"}"#));
        assert!(!serializer.supports_value(r#"{ "Entrust":"alice"}"#));
        assert!(!serializer.supports_value(r#"{"Entrust":"alice"} "#));
        assert!(!serializer.supports_value(""));
    }

    #[test]
    fn supports_principal_is_a_type_test() -> Result<(), Error> {
        let serializer = BypassPrincipalSerializer;
        assert!(serializer.supports_principal(&BypassPrincipal::new("alice")?));
        assert!(!serializer.supports_principal(&UsernamePrincipal::new("alice")?));
        assert!(matches!(
            serializer.serialize(&UsernamePrincipal::new("alice")?),
            Err(Error::UnsupportedPrincipal(_))
        ));
        Ok(())
    }
}
