use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        JaoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        JaoError::time_expression("x")
            .to_string()
            .contains("time expression error:")
    );
    assert!(JaoError::renderer("x").to_string().contains("renderer error:"));
    assert!(JaoError::action("x").to_string().contains("action error:"));
    assert!(
        JaoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn lookup_failures_carry_their_kind() {
    let err = JaoError::action_not_found("lib", "Missing");
    assert_eq!(err.lookup_kind(), Some(LookupKind::Action));
    assert!(err.to_string().contains("unknown action 'Missing'"));

    let err = JaoError::library_not_found("nope");
    assert_eq!(err.lookup_kind(), Some(LookupKind::Library));
    assert!(err.to_string().contains("unknown library 'nope'"));

    let err = JaoError::initializer_not_found("lib", "Init");
    assert_eq!(err.lookup_kind(), Some(LookupKind::Initializer));

    assert_eq!(JaoError::validation("x").lookup_kind(), None);
}

#[test]
fn wrapped_causes_are_preserved() {
    let err = JaoError::instantiation("BadAction", anyhow::anyhow!("constructor blew up"));
    assert!(err.to_string().contains("BadAction"));
    assert!(err.to_string().contains("constructor blew up"));

    let base = std::io::Error::other("boom");
    let err = JaoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
