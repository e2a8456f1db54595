use crate::{PlayerId, Profile};

#[test]
fn given_null_account_ref_when_checked_then_has_no_account() {
    let profile = Profile {
        id: PlayerId::new(1),
        username: "Player1".into(),
        account_ref: None,
    };
    assert!(!profile.has_account());
}

#[test]
fn given_account_ref_when_checked_then_has_account() {
    let profile = Profile {
        id: PlayerId::new(42),
        username: "Player42".into(),
        account_ref: Some("acct-1".into()),
    };
    assert!(profile.has_account());
}

#[test]
fn given_row_without_account_ref_when_deserialized_then_defaults_to_none() {
    let json = r#"{"id":42,"username":"Player42"}"#;
    let profile: Profile = serde_json::from_str(json).unwrap();

    assert_eq!(profile.id, PlayerId::new(42));
    assert!(profile.account_ref.is_none());
}

#[test]
fn given_row_with_null_account_ref_when_deserialized_then_unlinked() {
    let json = r#"{"id":3,"username":"Player3","account_ref":null}"#;
    let profile: Profile = serde_json::from_str(json).unwrap();

    assert!(!profile.has_account());
}
