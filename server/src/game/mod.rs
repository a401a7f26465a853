pub mod crud;
pub mod players;

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::db::models::{Game, Player};

/// Error body shape shared by all lobby endpoints: `{"error": "..."}`.
pub type ApiError = (StatusCode, Json<Value>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

pub(crate) fn internal_error() -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

// --- Response types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub player_id: String,
    pub game_id: String,
    pub user_id: String,
    pub name: String,
}

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.player_id.clone(),
            game_id: player.game_id.clone(),
            user_id: player.user_id.clone(),
            name: player.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub game_id: String,
    pub status: String,
    pub players: Vec<PlayerResponse>,
}

impl GameResponse {
    pub fn new(game: &Game, players: &[Player]) -> Self {
        Self {
            game_id: game.game_id.clone(),
            status: game.status.clone(),
            players: players.iter().map(PlayerResponse::from).collect(),
        }
    }
}
