//! Player endpoints: add a player to a game, claim the player a session
//! controls, and rename a player. Add and rename announce themselves to the
//! room; claim records the resolved seat in the registry.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{api_error, internal_error, ApiError, GameResponse, PlayerResponse};
use crate::catalog;
use crate::session::claim::{resolve_claim, ClaimError};
use crate::state::AppState;
use crate::ws::broadcast;
use crate::ws::protocol::RoomEvent;

// --- Request types ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlayerRequest {
    pub user_id: Option<String>,
    /// Player name; defaults to the account's username.
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPlayerRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamePlayerRequest {
    pub player_id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
}

// --- Response types ---

#[derive(Debug, Serialize)]
pub struct AddPlayerResponse {
    pub message: String,
    pub game: GameResponse,
    pub player: PlayerResponse,
}

#[derive(Debug, Serialize)]
pub struct PlayerEnvelope {
    pub player: PlayerResponse,
}

// --- Handlers ---

/// POST /api/game/{game_id}/add — Create a player for an account and
/// announce it to the room.
pub async fn add_player(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Option<Json<AddPlayerRequest>>,
) -> Result<(StatusCode, Json<AddPlayerResponse>), ApiError> {
    let AddPlayerRequest { user_id, name } = body.map(|Json(req)| req).unwrap_or_default();
    let user_id = user_id.ok_or_else(|| {
        api_error(StatusCode::BAD_REQUEST, "userId parameter is required")
    })?;

    let db = state.db.clone();
    let room_id = game_id.clone();

    let (game, player, players) = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| internal_error())?;

        let game = catalog::get_game(&conn, &game_id)
            .map_err(|_| internal_error())?
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Game not found"))?;

        let account = catalog::get_user(&conn, &user_id)
            .map_err(|_| internal_error())?
            .ok_or_else(|| {
                api_error(
                    StatusCode::NOT_FOUND,
                    "Account not found for the given userId",
                )
            })?;

        let name = name.unwrap_or_else(|| account.username.clone());
        let player = catalog::create_player(&conn, &game.game_id, &account.user_id, &name)
            .map_err(|_| internal_error())?;
        let players = catalog::list_players(&conn, &game.game_id).map_err(|_| internal_error())?;

        Ok::<_, ApiError>((game, player, players))
    })
    .await
    .map_err(|_| internal_error())??;

    tracing::info!(
        game_id = %game.game_id,
        player_id = %player.player_id,
        user_id = %player.user_id,
        "Player added"
    );

    broadcast::publish(
        &state.rooms,
        &room_id,
        &RoomEvent::AddPlayer {
            player_id: player.player_id.clone(),
            name: player.name.clone(),
        },
    );

    Ok((
        StatusCode::CREATED,
        Json(AddPlayerResponse {
            message: format!("{} added to the game", player.name),
            game: GameResponse::new(&game, &players),
            player: PlayerResponse::from(&player),
        }),
    ))
}

/// POST /api/game/{game_id}/claim — Resolve which player the given session
/// controls and record the claim.
///
/// The resolver prefers the session's existing claim (affinity), then falls
/// back to the first of the user's players without a live claim
/// (reconnection recovery). Failures are client-visible and never retried.
pub async fn claim_player(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Option<Json<ClaimPlayerRequest>>,
) -> Result<Json<PlayerEnvelope>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let db = state.db.clone();
    let room_id = game_id.clone();

    let roster = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| internal_error())?;
        catalog::get_game(&conn, &game_id)
            .map_err(|_| internal_error())?
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Game not found"))?;
        catalog::list_players(&conn, &game_id).map_err(|_| internal_error())
    })
    .await
    .map_err(|_| internal_error())??;

    let session_id = req
        .session_id
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No session id"))?;

    let player_id = resolve_claim(&state.registry, &room_id, &session_id, &roster).map_err(
        |err| match err {
            ClaimError::NoUserForSession => api_error(
                StatusCode::BAD_REQUEST,
                format!("No user id for session id {session_id}"),
            ),
            ClaimError::NoPlayersForUser => api_error(
                StatusCode::NOT_FOUND,
                format!("No players found for game {room_id}"),
            ),
            ClaimError::NoAvailablePlayer => api_error(
                StatusCode::NOT_FOUND,
                format!("No available players found for game {room_id}"),
            ),
        },
    )?;

    // The resolver does not mutate; the claim is recorded here, on success.
    if let Some(user_id) = state.registry.user_of(&session_id) {
        state
            .registry
            .record_claim(&room_id, &user_id, &session_id, &player_id);
    }

    tracing::info!(
        game_id = %room_id,
        session_id = %session_id,
        player_id = %player_id,
        "Claim resolved"
    );

    let player = roster
        .iter()
        .find(|player| player.player_id == player_id)
        .ok_or_else(internal_error)?;

    Ok(Json(PlayerEnvelope {
        player: PlayerResponse::from(player),
    }))
}

/// POST /api/game/{game_id}/name — Rename a player owned by the caller's
/// account and announce the new name to the room.
pub async fn name_player(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Option<Json<NamePlayerRequest>>,
) -> Result<Json<PlayerEnvelope>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let (Some(player_id), Some(user_id), Some(name)) = (req.player_id, req.user_id, req.name)
    else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "playerId, userId and name parameters are required",
        ));
    };

    let db = state.db.clone();
    let room_id = game_id.clone();

    let player = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| internal_error())?;

        catalog::get_game(&conn, &game_id)
            .map_err(|_| internal_error())?
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Game not found"))?;

        let players = catalog::list_players(&conn, &game_id).map_err(|_| internal_error())?;
        if players.is_empty() {
            return Err(api_error(
                StatusCode::NOT_FOUND,
                format!("No players found for game {game_id}"),
            ));
        }

        if Uuid::parse_str(&player_id).is_err() {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                format!("Invalid player id {player_id} to rename for game {game_id}"),
            ));
        }

        let target = players
            .iter()
            .find(|player| player.player_id == player_id)
            .ok_or_else(|| {
                api_error(
                    StatusCode::NOT_FOUND,
                    format!("No player {player_id} to rename for game {game_id}"),
                )
            })?;

        if target.user_id != user_id {
            return Err(api_error(
                StatusCode::UNAUTHORIZED,
                format!("You cannot rename a player that is not your own. player:{player_id}"),
            ));
        }

        catalog::rename_player(&conn, &player_id, &name)
            .map_err(|_| internal_error())?
            .ok_or_else(internal_error)
    })
    .await
    .map_err(|_| internal_error())??;

    tracing::info!(
        game_id = %room_id,
        player_id = %player.player_id,
        name = %player.name,
        "Player renamed"
    );

    broadcast::publish(
        &state.rooms,
        &room_id,
        &RoomEvent::NamePlayer {
            player_id: player.player_id.clone(),
            name: player.name.clone(),
        },
    );

    Ok(Json(PlayerEnvelope {
        player: PlayerResponse::from(&player),
    }))
}
