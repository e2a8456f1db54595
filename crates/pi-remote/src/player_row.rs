use pi_core::{PlayerId, Profile};

use serde::Serialize;

/// Row shape of the `players` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayerRow {
    pub id: i64,
    pub username: String,
    pub account_ref: Option<String>,
}

impl From<PlayerRow> for Profile {
    fn from(row: PlayerRow) -> Self {
        Profile {
            id: PlayerId::new(row.id),
            username: row.username,
            account_ref: row.account_ref,
        }
    }
}

/// Insert payload. `account_ref` is left to the column default (NULL).
#[derive(Debug, Serialize)]
pub struct NewPlayer<'a> {
    pub username: &'a str,
}
