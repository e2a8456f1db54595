use crate::{CliError, Commands};
use crate::app::execute;

use pi_config::Config;
use pi_core::PlayerId;

use googletest::prelude::*;
use tempfile::TempDir;

fn sqlite_config(temp: &TempDir) -> Config {
    let config = Config::load_from(temp.path()).unwrap();
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn given_fresh_dir_when_bootstrapped_then_identity_created_and_stored() {
    // Given
    let temp = TempDir::new().unwrap();
    let config = sqlite_config(&temp);

    // When
    let snapshot = execute(&Commands::Bootstrap, &config).await.unwrap();
    let status = execute(&Commands::Status, &config).await.unwrap();

    // Then
    assert_that!(snapshot["state"].as_str(), some(eq("ready")));
    assert_that!(snapshot["has_account"].as_bool(), some(eq(false)));
    let id = snapshot["identity"].as_i64().unwrap();
    assert_that!(status["stored"].as_str(), some(eq(id.to_string().as_str())));
}

#[tokio::test]
async fn given_existing_identity_when_bootstrapped_again_then_reused() {
    let temp = TempDir::new().unwrap();
    let config = sqlite_config(&temp);

    let first = execute(&Commands::Bootstrap, &config).await.unwrap();
    let second = execute(&Commands::Bootstrap, &config).await.unwrap();

    assert_that!(second["identity"].as_i64(), eq(first["identity"].as_i64()));
    assert_that!(second["profile"]["username"].as_str(), eq(first["profile"]["username"].as_str()));
}

#[tokio::test]
async fn given_fresh_dir_when_status_checked_then_nothing_stored() {
    let temp = TempDir::new().unwrap();
    let config = sqlite_config(&temp);

    let status = execute(&Commands::Status, &config).await.unwrap();

    assert!(status["stored"].is_null());
    assert_that!(status["identity_key"].as_str(), some(eq("player_id")));
}

#[tokio::test]
async fn given_bootstrapped_when_overridden_then_stored_identity_unchanged() {
    // Given
    let temp = TempDir::new().unwrap();
    let config = sqlite_config(&temp);
    let first = execute(&Commands::Bootstrap, &config).await.unwrap();
    let stored_id = first["identity"].as_i64().unwrap();

    // When
    let overridden = execute(
        &Commands::Override {
            id: PlayerId::new(9_999),
        },
        &config,
    )
    .await
    .unwrap();
    let status = execute(&Commands::Status, &config).await.unwrap();

    // Then
    assert_that!(overridden["identity"].as_i64(), some(eq(9_999)));
    assert_that!(overridden["error"].as_str(), some(anything()));
    assert_that!(
        status["stored"].as_str(),
        some(eq(stored_id.to_string().as_str()))
    );
}

#[tokio::test]
async fn given_bootstrapped_when_refetched_then_profile_returned() {
    let temp = TempDir::new().unwrap();
    let config = sqlite_config(&temp);
    execute(&Commands::Bootstrap, &config).await.unwrap();

    let refetched = execute(&Commands::Refetch, &config).await.unwrap();

    assert_that!(refetched["state"].as_str(), some(eq("ready")));
    assert!(refetched["error"].is_null());
    assert_that!(refetched["profile"]["username"].as_str(), some(anything()));
}

#[tokio::test]
async fn given_corrupted_identity_file_when_status_checked_then_error_carries_recovery_hint() {
    // Given
    let temp = TempDir::new().unwrap();
    let config = sqlite_config(&temp);
    std::fs::create_dir_all(config.storage_dir()).unwrap();
    std::fs::write(
        config.storage_dir().join(pi_store::IDENTITY_FILENAME),
        "{ not json",
    )
    .unwrap();

    // When
    let err = execute(&Commands::Status, &config).await.unwrap_err();

    // Then
    assert!(matches!(err, CliError::Storage { .. }));
    assert!(err.to_string().contains("Remove or repair the identity file"));
}
