use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use crate::error::ApiError;

pub mod games;
pub mod players;

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS players (
           id       INTEGER PRIMARY KEY AUTOINCREMENT,
           username TEXT    NOT NULL UNIQUE
       )"#,
    r#"CREATE TABLE IF NOT EXISTS games (
           id           INTEGER PRIMARY KEY AUTOINCREMENT,
           title        TEXT    NOT NULL,
           price        REAL    NOT NULL DEFAULT 0.0,
           release_year INTEGER,
           weight       REAL,
           genre        TEXT,
           player_id    INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE
       )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_games_player_id ON games(player_id)"#,
];

/// Open a pool on a file-backed database, creating the file if needed.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new().connect_with(options).await
}

/// Single-connection in-memory pool. Every connection to `:memory:` is its own
/// database, so the pool must never open a second one or drop the first.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

/// Commit `tx` if `result` is `Ok`, roll it back otherwise.
pub async fn finish<T>(tx: Transaction<'_, Sqlite>, result: Result<T, ApiError>) -> Result<T, ApiError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = connect_in_memory().await.unwrap();
    init_schema(&pool).await.unwrap();
    pool
}
