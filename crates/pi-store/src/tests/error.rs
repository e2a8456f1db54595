//! Unit tests for StorageError classification.

use crate::{IdentityDocument, SCHEMA_VERSION, StorageError};

use std::path::PathBuf;

#[test]
fn given_any_error_when_recovery_hint_then_returns_non_empty_string() {
    let errors = vec![
        StorageError::unavailable("test"),
        StorageError::corrupted(PathBuf::from("/test"), "bad"),
        StorageError::file_write(
            PathBuf::from("/test"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        ),
        StorageError::atomic_rename(
            PathBuf::from("/from"),
            PathBuf::from("/to"),
            std::io::Error::other("test"),
        ),
    ];

    for err in errors {
        let hint = err.recovery_hint();
        assert!(
            !hint.is_empty(),
            "recovery_hint should not be empty for {err:?}"
        );
    }
}

#[test]
fn given_serde_error_when_converted_then_serialization_variant() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let storage_err: StorageError = json_err.into();

    assert!(matches!(storage_err, StorageError::Serialization { .. }));
}

#[test]
fn given_document_without_entries_when_deserialized_then_entries_empty() {
    let json = r#"{"schema_version":1,"updated_at":"2026-01-01T00:00:00Z"}"#;
    let document: IdentityDocument = serde_json::from_str(json).unwrap();

    assert_eq!(document.schema_version, SCHEMA_VERSION);
    assert!(document.entries.is_empty());
}
