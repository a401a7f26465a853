//! Game CRUD endpoints: create a game, list games, fetch game info.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::{api_error, internal_error, ApiError, GameResponse};
use crate::catalog;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    pub message: String,
    pub game: GameResponse,
}

#[derive(Debug, Serialize)]
pub struct GameInfoResponse {
    pub game: GameResponse,
}

/// POST /api/game/new — Create a game in the `waiting` state.
/// Returns the generated 6-character game code.
pub async fn create_game(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let db = state.db.clone();

    let game = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| internal_error())?;
        catalog::create_game(&conn).map_err(|_| internal_error())
    })
    .await
    .map_err(|_| internal_error())??;

    tracing::info!(game_id = %game.game_id, "Game created");

    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            message: "Game created successfully".to_string(),
            game: GameResponse::new(&game, &[]),
        }),
    ))
}

/// GET /api/game — List all games with their players.
pub async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let db = state.db.clone();

    let games = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| internal_error())?;
        let games = catalog::list_games(&conn).map_err(|_| internal_error())?;
        games
            .iter()
            .map(|game| {
                let players =
                    catalog::list_players(&conn, &game.game_id).map_err(|_| internal_error())?;
                Ok(GameResponse::new(game, &players))
            })
            .collect::<Result<Vec<_>, ApiError>>()
    })
    .await
    .map_err(|_| internal_error())??;

    Ok(Json(games))
}

/// GET /api/game/{game_id}/info — Game status and player roster.
pub async fn game_info(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameInfoResponse>, ApiError> {
    let db = state.db.clone();

    let (game, players) = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| internal_error())?;
        let game = catalog::get_game(&conn, &game_id)
            .map_err(|_| internal_error())?
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Game not found"))?;
        let players = catalog::list_players(&conn, &game_id).map_err(|_| internal_error())?;
        Ok::<_, ApiError>((game, players))
    })
    .await
    .map_err(|_| internal_error())??;

    Ok(Json(GameInfoResponse {
        game: GameResponse::new(&game, &players),
    }))
}
