pub mod actor;
pub mod broadcast;
pub mod handler;
pub mod protocol;

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Type alias for the sender half of a WebSocket connection's channel.
/// Other parts of the system can clone this to push messages to a specific client.
pub type ConnectionSender = mpsc::UnboundedSender<axum::extract::ws::Message>;

/// One live connection's membership in a room.
#[derive(Debug)]
pub struct RoomMember {
    pub connection_id: String,
    pub sender: ConnectionSender,
}

/// Room broadcast groups: the set of live connections joined to each room.
/// Arc<DashMap<RoomId, Vec<RoomMember>>>
pub type RoomChannels = Arc<DashMap<String, Vec<RoomMember>>>;

/// Create a new empty set of room broadcast groups.
pub fn new_room_channels() -> RoomChannels {
    Arc::new(DashMap::new())
}
