use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::models::{NewPlayer, Player, PlayerChanges, PlayerWithGames};
use crate::error::ApiError;
use crate::db;

// GET /api/players - List all players, without their games
pub async fn get_players(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let mut conn = pool.acquire().await?;
    let players = db::players::list_all(&mut conn).await?;

    Ok(Json(players))
}

// GET /api/players/:id - Get player by ID, including games
pub async fn get_player_by_id(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PlayerWithGames>, ApiError> {
    let Path(player_id) = path.map_err(|_| ApiError::player_not_found())?;
    let mut conn = pool.acquire().await?;
    let player = db::players::find_with_games(&mut conn, player_id).await?;

    Ok(Json(player))
}

// POST /api/players - Create a player
pub async fn create_player(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewPlayer>, JsonRejection>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let Json(payload) = payload?;
    let username = payload.into_username()?;

    let mut tx = pool.begin().await?;
    let result = db::players::insert(&mut tx, &username).await;
    let player = db::finish(tx, result).await?;

    Ok((StatusCode::CREATED, Json(player)))
}

// PATCH /api/players/:id - Change only the fields present in the body
pub async fn update_player(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PlayerChanges>, JsonRejection>,
) -> Result<Json<PlayerWithGames>, ApiError> {
    let Path(player_id) = path.map_err(|_| ApiError::player_not_found())?;
    let Json(changes) = payload?;

    let mut tx = pool.begin().await?;
    let result = db::players::update(&mut tx, player_id, changes).await;
    let player = db::finish(tx, result).await?;

    Ok(Json(player))
}

// DELETE /api/players/:id - Delete a player and its games
pub async fn delete_player(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(player_id) = path.map_err(|_| ApiError::player_not_found())?;
    let mut tx = pool.begin().await?;
    let result = db::players::delete(&mut tx, player_id).await;
    db::finish(tx, result).await?;

    Ok(StatusCode::ACCEPTED)
}
