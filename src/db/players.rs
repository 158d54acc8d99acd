use sqlx::SqliteConnection;

use crate::db::games;
use crate::error::ApiError;
use crate::models::{Player, PlayerChanges, PlayerWithGames};

pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Player>, ApiError> {
    let players = sqlx::query_as::<_, Player>(
        r#"SELECT id, username FROM players ORDER BY id"#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(players)
}

pub async fn find_by_id(conn: &mut SqliteConnection, player_id: i64) -> Result<Option<Player>, ApiError> {
    let player = sqlx::query_as::<_, Player>(
        r#"SELECT id, username FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(player)
}

pub async fn exists(conn: &mut SqliteConnection, player_id: i64) -> Result<bool, ApiError> {
    let found: Option<i64> = sqlx::query_scalar(
        r#"SELECT 1 FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(found.is_some())
}

/// Load a player and every game it owns.
pub async fn find_with_games(conn: &mut SqliteConnection, player_id: i64) -> Result<PlayerWithGames, ApiError> {
    let player = find_by_id(conn, player_id)
        .await?
        .ok_or_else(ApiError::player_not_found)?;

    let games = games::list_by_player(conn, player.id).await?;

    Ok(player.with_games(games))
}

pub async fn insert(conn: &mut SqliteConnection, username: &str) -> Result<Player, ApiError> {
    let player = sqlx::query_as::<_, Player>(
        r#"INSERT INTO players (username) VALUES (?) RETURNING id, username"#
    )
    .bind(username)
    .fetch_one(&mut *conn)
    .await
    .map_err(|err| username_taken(err, username))?;

    tracing::debug!(player_id = player.id, username = %player.username, "Created player");
    Ok(player)
}

/// Apply a partial update and return the player with its games.
pub async fn update(
    conn: &mut SqliteConnection,
    player_id: i64,
    changes: PlayerChanges,
) -> Result<PlayerWithGames, ApiError> {
    let mut player = find_by_id(conn, player_id)
        .await?
        .ok_or_else(ApiError::player_not_found)?;

    changes.apply(&mut player)?;

    sqlx::query(
        r#"UPDATE players SET username = ? WHERE id = ?"#
    )
    .bind(&player.username)
    .bind(player.id)
    .execute(&mut *conn)
    .await
    .map_err(|err| username_taken(err, &player.username))?;

    tracing::debug!(player_id = player.id, username = %player.username, "Updated player");

    let games = games::list_by_player(conn, player.id).await?;
    Ok(player.with_games(games))
}

/// Delete a player. Its games go with it through `ON DELETE CASCADE`.
pub async fn delete(conn: &mut SqliteConnection, player_id: i64) -> Result<(), ApiError> {
    let result = sqlx::query(
        r#"DELETE FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::player_not_found());
    }

    tracing::debug!(player_id, "Deleted player");
    Ok(())
}

fn username_taken(err: sqlx::Error, username: &str) -> ApiError {
    match ApiError::from(err) {
        ApiError::Conflict(_) => ApiError::Conflict(format!("username {username:?} is already taken")),
        other => other,
    }
}
