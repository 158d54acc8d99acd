use sqlx::SqliteConnection;

use crate::db::players;
use crate::error::ApiError;
use crate::models::{Game, GameChanges, GameFields};

pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Game>, ApiError> {
    let games = sqlx::query_as::<_, Game>(
        r#"SELECT id, title, price, release_year, weight, genre, player_id
           FROM games ORDER BY id"#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(games)
}

pub async fn list_by_player(conn: &mut SqliteConnection, player_id: i64) -> Result<Vec<Game>, ApiError> {
    let games = sqlx::query_as::<_, Game>(
        r#"SELECT id, title, price, release_year, weight, genre, player_id
           FROM games WHERE player_id = ? ORDER BY id"#
    )
    .bind(player_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(games)
}

pub async fn find_by_id(conn: &mut SqliteConnection, game_id: i64) -> Result<Option<Game>, ApiError> {
    let game = sqlx::query_as::<_, Game>(
        r#"SELECT id, title, price, release_year, weight, genre, player_id
           FROM games WHERE id = ?"#
    )
    .bind(game_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(game)
}

pub async fn insert(conn: &mut SqliteConnection, fields: &GameFields) -> Result<Game, ApiError> {
    ensure_owner_exists(conn, fields.player_id).await?;

    let game = sqlx::query_as::<_, Game>(
        r#"INSERT INTO games (title, price, release_year, weight, genre, player_id)
           VALUES (?, ?, ?, ?, ?, ?)
           RETURNING id, title, price, release_year, weight, genre, player_id"#
    )
    .bind(&fields.title)
    .bind(fields.price)
    .bind(fields.release_year)
    .bind(fields.weight)
    .bind(&fields.genre)
    .bind(fields.player_id)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!(game_id = game.id, player_id = game.player_id, title = %game.title, "Created game");
    Ok(game)
}

/// Apply a partial update. Columns absent from `changes` keep their values.
pub async fn update(conn: &mut SqliteConnection, game_id: i64, changes: GameChanges) -> Result<Game, ApiError> {
    let current = find_by_id(conn, game_id)
        .await?
        .ok_or_else(ApiError::game_not_found)?;

    if let Some(player_id) = changes.player_id() {
        ensure_owner_exists(conn, player_id).await?;
    }

    let mut fields = current.fields();
    changes.apply(&mut fields)?;

    let game = sqlx::query_as::<_, Game>(
        r#"UPDATE games
           SET title = ?, price = ?, release_year = ?, weight = ?, genre = ?, player_id = ?
           WHERE id = ?
           RETURNING id, title, price, release_year, weight, genre, player_id"#
    )
    .bind(&fields.title)
    .bind(fields.price)
    .bind(fields.release_year)
    .bind(fields.weight)
    .bind(&fields.genre)
    .bind(fields.player_id)
    .bind(game_id)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!(game_id = game.id, "Updated game");
    Ok(game)
}

pub async fn delete(conn: &mut SqliteConnection, game_id: i64) -> Result<(), ApiError> {
    let result = sqlx::query(
        r#"DELETE FROM games WHERE id = ?"#
    )
    .bind(game_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::game_not_found());
    }

    tracing::debug!(game_id, "Deleted game");
    Ok(())
}

async fn ensure_owner_exists(conn: &mut SqliteConnection, player_id: i64) -> Result<(), ApiError> {
    if players::exists(conn, player_id).await? {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("player {player_id} does not exist")))
    }
}
