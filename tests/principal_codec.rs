use duo_bypass::principal::serializer::{
    BypassPrincipalSerializer, PrincipalSerializer, PrincipalSerializerRegistry,
};
use duo_bypass::principal::{BypassPrincipal, Principal, UsernamePrincipal};
use duo_bypass::Error;

#[test]
fn persisted_form_is_stable() -> Result<(), Error> {
    let principal = BypassPrincipal::new("alice")?;
    let encoded = BypassPrincipalSerializer.serialize(&principal)?;
    assert_eq!(encoded, r#"{"Entrust":"alice"}"#);
    Ok(())
}

#[test]
fn records_written_earlier_still_decode() -> Result<(), Error> {
    let decoded = BypassPrincipalSerializer::decode(r#"{"Entrust":"alice"}"#)?;
    assert_eq!(decoded, Some(BypassPrincipal::new("alice")?));

    // Extra fields are ignored.
    let decoded = BypassPrincipalSerializer::decode(r#"{"Entrust":"bob","v":2}"#)?;
    assert_eq!(decoded.as_ref().map(BypassPrincipal::name), Some("bob"));
    Ok(())
}

#[test]
fn decode_edge_cases() -> Result<(), Error> {
    assert_eq!(BypassPrincipalSerializer::decode(r#"{"Entrust":""}"#)?, None);
    assert_eq!(BypassPrincipalSerializer::decode(r#"{"Other":"x"}"#)?, None);
    assert!(matches!(
        BypassPrincipalSerializer::decode("[1,2,3]"),
        Err(Error::InvalidDataStructure(_))
    ));
    assert_eq!(BypassPrincipal::new("alice")?, BypassPrincipal::new(" alice ")?);
    assert!(matches!(
        BypassPrincipal::new("\t"),
        Err(Error::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn registry_handles_mixed_storage() -> Result<(), Error> {
    let registry = PrincipalSerializerRegistry::default();
    let stored = [
        r#"{"U":"alice"}"#,
        r#"{"Entrust":"alice"}"#,
        r#"{"AuthnContextClassRef":"urn:oasis:names:tc:SAML:2.0:ac:classes:Password"}"#,
    ];

    let subject = registry.deserialize_subject(&stored)?;
    assert_eq!(subject.len(), 2);
    assert!(subject.contains(&UsernamePrincipal::new("alice")?));
    assert!(subject.contains(&BypassPrincipal::new("alice")?));

    let names: Vec<&str> = subject.principals().map(|p| p.name()).collect();
    assert_eq!(names, vec!["alice", "alice"]);
    Ok(())
}

#[test]
fn dispatch_uses_first_supporting_serializer() -> Result<(), Error> {
    let registry = PrincipalSerializerRegistry::new().with_serializer(BypassPrincipalSerializer);
    assert!(matches!(
        registry.serialize(&UsernamePrincipal::new("alice")?),
        Err(Error::UnsupportedPrincipal(_))
    ));
    assert!(registry.deserialize(r#"{"U":"alice"}"#)?.is_none());

    let restored = registry.deserialize(r#"{"Entrust":"alice"}"#)?;
    assert_eq!(
        restored
            .as_deref()
            .and_then(|p| p.downcast_ref::<BypassPrincipal>())
            .map(BypassPrincipal::name),
        Some("alice")
    );
    Ok(())
}
