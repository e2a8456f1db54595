use crate::player_row::PlayerRow;
use crate::{DirectoryError, RemoteDirectory, Result as DirectoryResult};

use pi_core::{PlayerId, Profile, UsernameSeed};

use std::path::Path;

use async_trait::async_trait;
use log::{debug, info};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const MAX_CONNECTIONS: u32 = 4;

/// Player directory stored in a local SQLite database.
///
/// Stands in for the hosted directory during development and tests; ids
/// come from the table's AUTOINCREMENT key.
pub struct SqliteDirectory {
    pool: SqlitePool,
}

impl SqliteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database file and run migrations.
    pub async fn connect(path: &Path) -> DirectoryResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DirectoryError::setup(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        Self::migrate(&pool).await?;
        info!("Player directory opened at {}", path.display());

        Ok(Self::new(pool))
    }

    pub async fn migrate(pool: &SqlitePool) -> DirectoryResult<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteDirectory for SqliteDirectory {
    async fn create_profile(&self, seed: &UsernameSeed) -> DirectoryResult<Profile> {
        let username = seed.generate();
        let created_at = chrono::Utc::now().timestamp();

        let row = sqlx::query_as::<_, PlayerRow>(
            r#"
                INSERT INTO players (username, account_ref, created_at)
                VALUES (?, NULL, ?)
                RETURNING id, username, account_ref
            "#,
        )
        .bind(&username)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        info!("Created player {} ({})", row.id, row.username);
        Ok(row.into())
    }

    async fn fetch_profile(&self, id: PlayerId) -> DirectoryResult<Profile> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r#"
                SELECT id, username, account_ref
                FROM players
                WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                debug!("Fetched player {id}");
                Ok(row.into())
            }
            None => Err(DirectoryError::not_found(id)),
        }
    }
}
