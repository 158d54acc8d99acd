//! REST API over players and the games they own, stored in SQLite.

use axum::{routing::get, Router};
use sqlx::sqlite::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

/// Build the full router around an already-initialised pool.
pub fn app(pool: SqlitePool) -> Router {
    // Browser clients may live on any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Game Library API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route(
            "/api/players",
            get(routes::players::get_players).post(routes::players::create_player),
        )
        .route(
            "/api/players/{id}",
            get(routes::players::get_player_by_id)
                .patch(routes::players::update_player)
                .delete(routes::players::delete_player),
        )

        // Game endpoints
        .route(
            "/api/games",
            get(routes::games::get_games).post(routes::games::create_game),
        )
        .route(
            "/api/games/{id}",
            get(routes::games::get_game_by_id)
                .patch(routes::games::update_game)
                .delete(routes::games::delete_game),
        )

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(pool)
}
