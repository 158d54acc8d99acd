use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::models::{Game, GameChanges, NewGame};
use crate::error::ApiError;
use crate::db;

// GET /api/games - List all games
pub async fn get_games(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let mut conn = pool.acquire().await?;
    let games = db::games::list_all(&mut conn).await?;

    Ok(Json(games))
}

// GET /api/games/:id - Get game by ID
pub async fn get_game_by_id(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Game>, ApiError> {
    let Path(game_id) = path.map_err(|_| ApiError::game_not_found())?;
    let mut conn = pool.acquire().await?;
    let game = db::games::find_by_id(&mut conn, game_id)
        .await?
        .ok_or_else(ApiError::game_not_found)?;

    Ok(Json(game))
}

// POST /api/games - Create a game; price defaults to 0.0
pub async fn create_game(
    State(pool): State<SqlitePool>,
    payload: Result<Json<NewGame>, JsonRejection>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let Json(payload) = payload?;
    let fields = payload.into_fields()?;

    let mut tx = pool.begin().await?;
    let result = db::games::insert(&mut tx, &fields).await;
    let game = db::finish(tx, result).await?;

    Ok((StatusCode::CREATED, Json(game)))
}

// PATCH /api/games/:id - Change only the fields present in the body
pub async fn update_game(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<GameChanges>, JsonRejection>,
) -> Result<Json<Game>, ApiError> {
    let Path(game_id) = path.map_err(|_| ApiError::game_not_found())?;
    let Json(changes) = payload?;

    let mut tx = pool.begin().await?;
    let result = db::games::update(&mut tx, game_id, changes).await;
    let game = db::finish(tx, result).await?;

    Ok(Json(game))
}

// DELETE /api/games/:id - Delete a game
pub async fn delete_game(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(game_id) = path.map_err(|_| ApiError::game_not_found())?;
    let mut tx = pool.begin().await?;
    let result = db::games::delete(&mut tx, game_id).await;
    db::finish(tx, result).await?;

    Ok(StatusCode::ACCEPTED)
}
