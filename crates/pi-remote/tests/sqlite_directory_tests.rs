mod common;

use common::{create_test_pool, link_account};

use pi_core::{PlayerId, UsernameSeed};
use pi_remote::{DirectoryError, RemoteDirectory, SqliteDirectory};

use googletest::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn given_empty_directory_when_profile_created_then_row_is_unlinked_with_generated_name() {
    // Given: An empty players table
    let pool = create_test_pool().await;
    let directory = SqliteDirectory::new(pool);
    let seed = UsernameSeed::default();

    // When: Creating a profile
    let profile = directory.create_profile(&seed).await.unwrap();

    // Then: The row has an id, a generated username and no account
    assert_that!(profile.account_ref, none());
    assert_that!(seed.matches(&profile.username), is_true());
    assert_that!(profile.id.get(), gt(0));
}

#[tokio::test]
async fn given_two_creates_when_ids_compared_then_ids_are_distinct() {
    // Given
    let pool = create_test_pool().await;
    let directory = SqliteDirectory::new(pool);
    let seed = UsernameSeed::default();

    // When
    let first = directory.create_profile(&seed).await.unwrap();
    let second = directory.create_profile(&seed).await.unwrap();

    // Then
    assert_that!(first.id, not(eq(second.id)));
}

#[tokio::test]
async fn given_created_profile_when_fetched_then_same_row_is_returned() {
    // Given
    let pool = create_test_pool().await;
    let directory = SqliteDirectory::new(pool);
    let created = directory
        .create_profile(&UsernameSeed::default())
        .await
        .unwrap();

    // When
    let fetched = directory.fetch_profile(created.id).await.unwrap();

    // Then
    assert_that!(fetched.id, eq(created.id));
    assert_that!(fetched.username, eq(&created.username));
    assert_that!(fetched.account_ref, none());
}

#[tokio::test]
async fn given_linked_account_when_fetched_then_account_ref_is_visible() {
    // Given
    let pool = create_test_pool().await;
    let directory = SqliteDirectory::new(pool.clone());
    let created = directory
        .create_profile(&UsernameSeed::default())
        .await
        .unwrap();
    link_account(&pool, created.id.get(), "acct-1").await;

    // When
    let fetched = directory.fetch_profile(created.id).await.unwrap();

    // Then
    assert_that!(fetched.account_ref, some(eq("acct-1")));
    assert_that!(fetched.has_account(), is_true());
}

#[tokio::test]
async fn given_unknown_id_when_fetched_then_not_found() {
    // Given
    let pool = create_test_pool().await;
    let directory = SqliteDirectory::new(pool);

    // When
    let result = directory.fetch_profile(PlayerId::new(9999)).await;

    // Then
    let err = result.unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn given_database_file_when_reconnected_then_rows_persist() {
    // Given
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("players.db");
    let created = {
        let directory = SqliteDirectory::connect(&path).await.unwrap();
        directory
            .create_profile(&UsernameSeed::default())
            .await
            .unwrap()
    };

    // When
    let reopened = SqliteDirectory::connect(&path).await.unwrap();
    let fetched = reopened.fetch_profile(created.id).await.unwrap();

    // Then
    assert_that!(fetched.id, eq(created.id));
}
