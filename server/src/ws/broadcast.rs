//! Per-room fan-out. Membership is explicit — a connection joins its room
//! on open and leaves on close; publishes reach only the members present at
//! publish time. No queueing, no replay.

use axum::extract::ws::Message;

use super::{RoomChannels, RoomMember};
use crate::ws::protocol::RoomEvent;

/// Add a connection to a room's broadcast group.
pub fn join(
    rooms: &RoomChannels,
    room_id: &str,
    connection_id: &str,
    sender: super::ConnectionSender,
) {
    let mut members = rooms.entry(room_id.to_string()).or_default();
    members.push(RoomMember {
        connection_id: connection_id.to_string(),
        sender,
    });
    tracing::debug!(
        room_id = %room_id,
        connection_id = %connection_id,
        members = members.len(),
        "Connection joined room"
    );
}

/// Remove a connection from a room's broadcast group. Also drops any
/// members whose receiver has gone away. The room entry itself is removed
/// once empty.
pub fn leave(rooms: &RoomChannels, room_id: &str, connection_id: &str) {
    if let Some(mut members) = rooms.get_mut(room_id) {
        members.retain(|member| {
            member.connection_id != connection_id && !member.sender.is_closed()
        });
    }
    rooms.remove_if(room_id, |_, members| members.is_empty());

    tracing::debug!(
        room_id = %room_id,
        connection_id = %connection_id,
        "Connection left room"
    );
}

/// Deliver an event to every connection currently joined to a room.
///
/// Holding the room entry mutably serializes concurrent publishes to the
/// same room, so each recipient sees events in publish order. Members whose
/// channel is gone are dropped in passing.
pub fn publish(rooms: &RoomChannels, room_id: &str, event: &RoomEvent) {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(room_id = %room_id, error = %e, "Failed to serialize room event");
            return;
        }
    };
    let msg = Message::Text(text.into());

    if let Some(mut members) = rooms.get_mut(room_id) {
        members.retain(|member| member.sender.send(msg.clone()).is_ok());
    }
}
