//! Claim resolution: which player does a session control in a room?
//!
//! The direct-hit path preserves session affinity across repeated requests;
//! the fallback lets a user who dropped and reconnected with a new session
//! recover the seat they previously occupied, by matching ownership rather
//! than session identity.

use std::fmt;

use crate::db::models::Player;
use crate::session::SessionRegistry;

/// Why a claim could not be resolved. Surfaced to the caller as a
/// client-visible failure; never retried, never fatal to the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    /// The session is not bound to any user.
    NoUserForSession,
    /// The catalog holds no players for this user in the room.
    NoPlayersForUser,
    /// All of the user's players are currently claimed by live sessions.
    NoAvailablePlayer,
}

impl fmt::Display for ClaimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ClaimError::NoUserForSession => "no user bound for session",
            ClaimError::NoPlayersForUser => "no players for user",
            ClaimError::NoAvailablePlayer => "no available player",
        };
        f.write_str(msg)
    }
}

/// Resolve the player a session controls in a room.
///
/// `roster` is the room's full player list in catalog order (the catalog
/// orders by creation time, so the reconnection tie-break is deterministic:
/// first unclaimed player of the user wins). Failure never mutates the
/// registry; recording a successful claim is the caller's decision.
pub fn resolve_claim(
    registry: &SessionRegistry,
    room_id: &str,
    session_id: &str,
    roster: &[Player],
) -> Result<String, ClaimError> {
    let user_id = registry
        .user_of(session_id)
        .ok_or(ClaimError::NoUserForSession)?;

    // Direct hit: the session already controls a player in this room.
    if let Some(player_id) = registry.sessions_of(&user_id, room_id).get(session_id) {
        return Ok(player_id.clone());
    }

    let mine: Vec<&Player> = roster
        .iter()
        .filter(|player| player.user_id == user_id)
        .collect();
    if mine.is_empty() {
        return Err(ClaimError::NoPlayersForUser);
    }

    // Reconnection fallback: first of the user's players with no live claim.
    let active = registry.claims_in_room(room_id);
    mine.iter()
        .find(|player| !active.contains_key(&player.player_id))
        .map(|player| player.player_id.clone())
        .ok_or(ClaimError::NoAvailablePlayer)
}
