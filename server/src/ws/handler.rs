use axum::{
    extract::{ws::WebSocketUpgrade, Path, State},
    response::Response,
};

use crate::state::AppState;
use crate::ws::actor;

/// GET /ws/{game_id}
/// WebSocket upgrade endpoint. The connection is scoped to the given room
/// (game) for its entire lifetime. The room is created implicitly on first
/// reference — no existence check against the catalog here; a connection to
/// an unknown game simply idles in an empty room.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| actor::run_connection(socket, state, game_id))
}
