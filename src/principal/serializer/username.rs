use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::PrincipalSerializer;
use crate::principal::{Principal, UsernamePrincipal};
use crate::Error;

const USERNAME_FIELD: &str = "U";
const VALUE_PATTERN: &str = r#"^\{"U":.*\}$"#;

#[derive(Serialize)]
struct Wire<'a> {
    #[serde(rename = "U")]
    username: &'a str,
}

/// Serializer for [`UsernamePrincipal`] using the `{"U":"<username>"}` form.
#[derive(Clone, Copy, Debug, Default)]
pub struct UsernamePrincipalSerializer;

impl PrincipalSerializer for UsernamePrincipalSerializer {
    fn supports_principal(&self, principal: &dyn Principal) -> bool {
        principal.is::<UsernamePrincipal>()
    }

    fn serialize(&self, principal: &dyn Principal) -> Result<String, Error> {
        let principal = principal
            .downcast_ref::<UsernamePrincipal>()
            .ok_or_else(|| Error::UnsupportedPrincipal(principal.to_string()))?;
        Ok(serde_json::to_string(&Wire {
            username: principal.name(),
        })?)
    }

    fn supports_value(&self, value: &str) -> bool {
        Regex::new(VALUE_PATTERN).is_ok_and(|re| re.is_match(value))
    }

    fn deserialize(&self, value: &str) -> Result<Option<Box<dyn Principal>>, Error> {
        let parsed: Value = serde_json::from_str(value)?;
        let Value::Object(object) = parsed else {
            return Err(Error::InvalidDataStructure("UsernamePrincipal"));
        };

        match object.get(USERNAME_FIELD) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(username)) if username.is_empty() => Ok(None),
            Some(Value::String(username)) => {
                Ok(Some(Box::new(UsernamePrincipal::new(username)?)))
            }
            Some(_) => Err(Error::InvalidDataStructure("UsernamePrincipal")),
        }
    }
}
