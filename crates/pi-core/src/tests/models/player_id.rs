use crate::{CoreError, PlayerId};

use std::str::FromStr;

use proptest::prelude::*;

#[test]
fn given_decimal_string_when_parsed_then_returns_player_id() {
    assert_eq!(PlayerId::from_str("42").unwrap(), PlayerId::new(42));
}

#[test]
fn given_padded_decimal_string_when_parsed_then_whitespace_is_ignored() {
    assert_eq!(PlayerId::from_str(" 7\n").unwrap(), PlayerId::new(7));
}

#[test]
fn given_non_numeric_string_when_parsed_then_invalid_player_id() {
    let err = PlayerId::from_str("abc").unwrap_err();
    match err {
        CoreError::InvalidPlayerId { value, .. } => assert_eq!(value, "abc"),
        other => panic!("Expected InvalidPlayerId, got {other:?}"),
    }
}

#[test]
fn given_empty_string_when_parsed_then_fails() {
    assert!(PlayerId::from_str("").is_err());
}

#[test]
fn given_player_id_when_serialized_then_is_plain_number() {
    let json = serde_json::to_string(&PlayerId::new(42)).unwrap();
    assert_eq!(json, "42");
}

proptest! {
    #[test]
    fn given_any_i64_when_displayed_and_parsed_then_same_id(value in any::<i64>()) {
        let id = PlayerId::new(value);
        prop_assert_eq!(PlayerId::from_str(&id.to_string()).unwrap(), id);
    }
}
