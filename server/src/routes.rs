use axum::Router;

use crate::accounts;
use crate::game::{crud as game_crud, players as game_players};
use crate::state::AppState;
use crate::ws::handler as ws_handler;

/// Build the full axum Router with all routes.
pub fn build_router(state: AppState) -> Router {
    // Lobby game endpoints
    let game_routes = Router::new()
        .route("/api/game/new", axum::routing::post(game_crud::create_game))
        .route("/api/game", axum::routing::get(game_crud::list_games))
        .route(
            "/api/game/{game_id}/info",
            axum::routing::get(game_crud::game_info),
        )
        .route(
            "/api/game/{game_id}/add",
            axum::routing::post(game_players::add_player),
        )
        .route(
            "/api/game/{game_id}/claim",
            axum::routing::post(game_players::claim_player),
        )
        .route(
            "/api/game/{game_id}/name",
            axum::routing::post(game_players::name_player),
        );

    // Account endpoints
    let account_routes = Router::new()
        .route("/api/users", axum::routing::post(accounts::create_user))
        .route("/api/users", axum::routing::get(accounts::list_users));

    // WebSocket endpoint — one connection per room
    let ws_routes = Router::new().route(
        "/ws/{game_id}",
        axum::routing::get(ws_handler::ws_upgrade),
    );

    // Health check
    let health = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(game_routes)
        .merge(account_routes)
        .merge(ws_routes)
        .merge(health)
        .with_state(state)
}

/// Basic health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
