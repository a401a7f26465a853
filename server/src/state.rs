use std::sync::Arc;

use crate::db::DbPool;
use crate::session::SessionRegistry;
use crate::ws::RoomChannels;

/// Shared application state passed to all handlers via axum State extractor.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection wrapped in Arc<Mutex>
    pub db: DbPool,
    /// In-memory identity registry: connections, sessions, per-room claims
    pub registry: Arc<SessionRegistry>,
    /// Per-room broadcast groups for live WebSocket connections
    pub rooms: RoomChannels,
}
