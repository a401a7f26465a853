//! In-memory identity registry linking connections, sessions, users, and
//! per-room player claims.
//!
//! Three identity layers overlap here: the transport connection (one per open
//! socket), the client-held session token (survives reconnects), and the
//! durable user. Connection→Session and Session→User are process-global;
//! claims are scoped per room. Nothing in this module is persisted — all
//! mappings are lost on restart.

pub mod claim;

use dashmap::DashMap;
use std::collections::HashMap;

/// Per-room claim tables.
///
/// `by_player` is the inverse index of `by_user`, updated in the same
/// mutation so the two can never disagree.
#[derive(Debug, Default)]
struct RoomClaims {
    /// user id -> (session id -> player id)
    by_user: HashMap<String, HashMap<String, String>>,
    /// player id -> (user id, session id)
    by_player: HashMap<String, (String, String)>,
}

impl RoomClaims {
    /// Record a claim for a bound session. Returns false when the user has
    /// no entry in this room (the caller never bound a session here).
    ///
    /// A session holds at most one player per room: claiming a second player
    /// replaces the first. A player is held by at most one session: claiming
    /// an already-held player evicts the previous holder (last writer wins).
    fn insert(&mut self, user_id: &str, session_id: &str, player_id: &str) -> bool {
        let Some(sessions) = self.by_user.get_mut(user_id) else {
            return false;
        };
        if let Some(prev) = sessions.insert(session_id.to_string(), player_id.to_string()) {
            if prev != player_id {
                self.by_player.remove(&prev);
            }
        }
        if let Some((prev_user, prev_session)) = self
            .by_player
            .insert(player_id.to_string(), (user_id.to_string(), session_id.to_string()))
        {
            if prev_session != session_id {
                if let Some(other) = self.by_user.get_mut(&prev_user) {
                    other.remove(&prev_session);
                }
            }
        }
        true
    }

    /// Remove the claim held by a session, returning the released player.
    /// Tolerates the claim already being absent.
    fn release(&mut self, user_id: &str, session_id: &str) -> Option<String> {
        let sessions = self.by_user.get_mut(user_id)?;
        let player_id = sessions.remove(session_id)?;
        if matches!(self.by_player.get(&player_id), Some((_, holder)) if holder == session_id) {
            self.by_player.remove(&player_id);
        }
        Some(player_id)
    }
}

/// Process-wide registry of connection/session/user mappings and per-room
/// claims. Owned by `AppState`; every handler gets a reference — no
/// ambient or static state.
///
/// All identity keys cross this boundary as canonical strings. Mutations
/// for a given room serialize through that room's map entry, so rooms
/// stay independent of each other.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// connection id -> session id
    connections: DashMap<String, String>,
    /// session id -> user id
    sessions: DashMap<String, String>,
    /// room id -> claim tables
    rooms: DashMap<String, RoomClaims>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record Connection→Session and Session→User, and ensure the user has
    /// a (possibly empty) claims entry in the room. Idempotent: repeated
    /// binds overwrite in place.
    pub fn bind_session(
        &self,
        session_id: &str,
        user_id: &str,
        connection_id: &str,
        room_id: &str,
    ) {
        self.connections
            .insert(connection_id.to_string(), session_id.to_string());
        self.sessions
            .insert(session_id.to_string(), user_id.to_string());
        self.rooms
            .entry(room_id.to_string())
            .or_default()
            .by_user
            .entry(user_id.to_string())
            .or_default();
    }

    /// The user a session is bound to. Absent for fresh/unknown sessions.
    pub fn user_of(&self, session_id: &str) -> Option<String> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }

    /// The session a connection carries. Absent before the first bind.
    pub fn session_of(&self, connection_id: &str) -> Option<String> {
        self.connections
            .get(connection_id)
            .map(|entry| entry.value().clone())
    }

    /// Every active claim in a room, as Player→Session.
    pub fn claims_in_room(&self, room_id: &str) -> HashMap<String, String> {
        self.rooms
            .get(room_id)
            .map(|claims| {
                claims
                    .by_player
                    .iter()
                    .map(|(player_id, (_, session_id))| (player_id.clone(), session_id.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A user's active claims in a room, as Session→Player. Empty when the
    /// user holds none.
    pub fn sessions_of(&self, user_id: &str, room_id: &str) -> HashMap<String, String> {
        self.rooms
            .get(room_id)
            .and_then(|claims| claims.by_user.get(user_id).cloned())
            .unwrap_or_default()
    }

    /// Record a claim for the session bound to a connection. Silently does
    /// nothing when the connection has no bound session or the room/user
    /// entry does not exist — callers are expected to bind a session first.
    pub fn set_claim(&self, player_id: &str, connection_id: &str, room_id: &str) {
        let Some(session_id) = self.session_of(connection_id) else {
            return;
        };
        let Some(user_id) = self.user_of(&session_id) else {
            return;
        };
        self.record_claim(room_id, &user_id, &session_id, player_id);
    }

    /// Record a claim for an already-resolved (user, session) pair. Used by
    /// the claim resolver's success path, where the caller holds both ids.
    /// Same no-op semantics as `set_claim` when the room/user entry is
    /// missing.
    pub fn record_claim(
        &self,
        room_id: &str,
        user_id: &str,
        session_id: &str,
        player_id: &str,
    ) {
        if let Some(mut claims) = self.rooms.get_mut(room_id) {
            claims.insert(user_id, session_id, player_id);
        }
    }

    /// Tear down a closing connection: drop Connection→Session and
    /// Session→User, and release the session's claim in the room. Returns
    /// the player that was claimed, if any, so the caller can announce it.
    /// Every removal tolerates its target already being absent.
    pub fn disconnect(&self, connection_id: &str, room_id: &str) -> Option<String> {
        let session_id = self.connections.remove(connection_id)?.1;
        let user_id = self.sessions.remove(&session_id).map(|(_, user)| user)?;
        let mut claims = self.rooms.get_mut(room_id)?;
        claims.release(&user_id, &session_id)
    }

    /// Clear all state. Test isolation only.
    pub fn reset(&self) {
        self.connections.clear();
        self.sessions.clear();
        self.rooms.clear();
    }
}
