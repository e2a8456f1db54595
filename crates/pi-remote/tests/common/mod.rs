use pi_remote::SqliteDirectory;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    SqliteDirectory::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Marks a player as linked, the way an account-linking flow would
pub async fn link_account(pool: &SqlitePool, id: i64, account_ref: &str) {
    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query("UPDATE players SET account_ref = ? WHERE id = ?")
        .bind(account_ref)
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to link account");
}
