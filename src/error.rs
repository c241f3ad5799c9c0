use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("found invalid data structure while parsing {0}")]
    InvalidDataStructure(&'static str),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("no serializer supports principal: {0}")]
    UnsupportedPrincipal(String),
    #[error("component is already initialized and cannot be modified: {0}")]
    Unmodifiable(&'static str),
    #[error("component has not been initialized: {0}")]
    Uninitialized(&'static str),
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_the_offending_component() {
        let err = Error::Unmodifiable("ValidateDuoBypass");
        assert!(err.to_string().contains("ValidateDuoBypass"));

        let err = Error::InvalidDataStructure("BypassPrincipal");
        assert_eq!(
            err.to_string(),
            "found invalid data structure while parsing BypassPrincipal"
        );
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").err();
        assert!(parse.is_some());
        if let Some(parse) = parse {
            let err: Error = parse.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }
}
