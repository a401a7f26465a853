//! Wire protocol for lobby WebSocket connections: JSON text frames tagged
//! by `type`, camelCase field names.

use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;

use crate::state::AppState;
use crate::ws::broadcast;

/// Inbound messages from a client.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Bind this connection to a session and its user.
    BindSession { session_id: String, user_id: String },
    /// Assert the player this session controls, typically right after an
    /// HTTP add/claim/rename call succeeded.
    BindPlayer { player_id: String },
    /// Free-form client message, relayed to the room.
    Chat { message: String },
}

/// Events fanned out to every live connection in a room.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RoomEvent {
    AddPlayer {
        player_id: String,
        name: String,
    },
    NamePlayer {
        player_id: String,
        name: String,
    },
    PlayerDisconnected {
        player_id: String,
        room_id: String,
    },
    Chat {
        /// The sender's claimed player, when it has one.
        #[serde(skip_serializing_if = "Option::is_none")]
        player_id: Option<String>,
        message: String,
    },
}

/// Handle an incoming text frame: parse, dispatch, reply.
///
/// Malformed frames and unrecognized message types are logged and dropped —
/// the connection stays open and no state changes.
pub fn handle_text_message(
    text: &str,
    tx: &mpsc::UnboundedSender<Message>,
    state: &AppState,
    connection_id: &str,
    room_id: &str,
) {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                connection_id = %connection_id,
                error = %e,
                "Failed to parse message as JSON"
            );
            return;
        }
    };

    let message = match serde_json::from_value::<ClientMessage>(value) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection_id,
                error = %e,
                "Unrecognized message"
            );
            return;
        }
    };

    dispatch_message(message, tx, state, connection_id, room_id);
}

/// Dispatch a decoded message to the appropriate handler.
fn dispatch_message(
    message: ClientMessage,
    tx: &mpsc::UnboundedSender<Message>,
    state: &AppState,
    connection_id: &str,
    room_id: &str,
) {
    match message {
        ClientMessage::BindSession {
            session_id,
            user_id,
        } => {
            state
                .registry
                .bind_session(&session_id, &user_id, connection_id, room_id);
            tracing::info!(
                connection_id = %connection_id,
                session_id = %session_id,
                user_id = %user_id,
                room_id = %room_id,
                "Session bound"
            );
            send_json(
                tx,
                &json!({
                    "type": "session_bound",
                    "sessionId": session_id,
                    "userId": user_id,
                }),
            );
        }
        ClientMessage::BindPlayer { player_id } => {
            state.registry.set_claim(&player_id, connection_id, room_id);
            tracing::info!(
                connection_id = %connection_id,
                player_id = %player_id,
                room_id = %room_id,
                "Player bound"
            );
            send_json(
                tx,
                &json!({
                    "type": "player_bound",
                    "playerId": player_id,
                }),
            );
        }
        ClientMessage::Chat { message } => {
            let player_id = state.registry.session_of(connection_id).and_then(|session_id| {
                let user_id = state.registry.user_of(&session_id)?;
                state
                    .registry
                    .sessions_of(&user_id, room_id)
                    .get(&session_id)
                    .cloned()
            });
            broadcast::publish(
                &state.rooms,
                room_id,
                &RoomEvent::Chat { player_id, message },
            );
        }
    }
}

/// Encode and send a JSON value as a text WebSocket message.
fn send_json(tx: &mpsc::UnboundedSender<Message>, value: &serde_json::Value) {
    if let Ok(text) = serde_json::to_string(value) {
        let _ = tx.send(Message::Text(text.into()));
    }
}
