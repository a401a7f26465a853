//! Tests for the in-memory identity registry: session binding, claims,
//! disconnect cleanup, and room isolation.

use lobby_server::session::SessionRegistry;

#[test]
fn test_unknown_lookups_are_absent() {
    let registry = SessionRegistry::new();

    assert_eq!(registry.user_of("session-12345"), None);
    assert_eq!(registry.session_of("conn-12345"), None);
    assert!(registry.claims_in_room("ROOM01").is_empty());
    assert!(registry.sessions_of("user-1", "ROOM01").is_empty());
}

#[test]
fn test_bind_session_maps_connection_and_user() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");

    assert_eq!(registry.user_of("session-12345"), Some("user-1".to_string()));
    assert_eq!(
        registry.session_of("conn-12345"),
        Some("session-12345".to_string())
    );
    // The user has an entry in the room but no claims yet
    assert!(registry.sessions_of("user-1", "ROOM01").is_empty());
}

#[test]
fn test_bind_session_is_idempotent() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");

    assert_eq!(registry.user_of("session-12345"), Some("user-1".to_string()));
    assert_eq!(
        registry.session_of("conn-12345"),
        Some("session-12345".to_string())
    );
}

#[test]
fn test_set_claim_records_both_directions() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.set_claim("player-1", "conn-12345", "ROOM01");

    let claims = registry.claims_in_room("ROOM01");
    assert_eq!(claims.len(), 1);
    assert_eq!(claims.get("player-1"), Some(&"session-12345".to_string()));

    let sessions = registry.sessions_of("user-1", "ROOM01");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions.get("session-12345"), Some(&"player-1".to_string()));
}

#[test]
fn test_set_claim_without_bound_session_is_a_noop() {
    let registry = SessionRegistry::new();

    registry.set_claim("player-1", "conn-unknown", "ROOM01");

    assert!(registry.claims_in_room("ROOM01").is_empty());
}

#[test]
fn test_set_claim_replaces_previous_claim_of_session() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.set_claim("player-1", "conn-12345", "ROOM01");
    registry.set_claim("player-2", "conn-12345", "ROOM01");

    let claims = registry.claims_in_room("ROOM01");
    assert_eq!(claims.len(), 1);
    assert_eq!(claims.get("player-2"), Some(&"session-12345".to_string()));
    assert_eq!(claims.get("player-1"), None);

    let sessions = registry.sessions_of("user-1", "ROOM01");
    assert_eq!(sessions.get("session-12345"), Some(&"player-2".to_string()));
}

#[test]
fn test_two_sessions_of_same_user_claim_distinct_players() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.set_claim("player-1", "conn-12345", "ROOM01");
    registry.bind_session("session-67890", "user-1", "conn-67890", "ROOM01");
    registry.set_claim("player-2", "conn-67890", "ROOM01");

    let claims = registry.claims_in_room("ROOM01");
    assert_eq!(claims.len(), 2);
    assert_eq!(claims.get("player-1"), Some(&"session-12345".to_string()));
    assert_eq!(claims.get("player-2"), Some(&"session-67890".to_string()));

    let sessions = registry.sessions_of("user-1", "ROOM01");
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions.get("session-12345"), Some(&"player-1".to_string()));
    assert_eq!(sessions.get("session-67890"), Some(&"player-2".to_string()));
}

#[test]
fn test_disconnect_removes_mappings_and_returns_player() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.set_claim("player-1", "conn-12345", "ROOM01");

    let released = registry.disconnect("conn-12345", "ROOM01");

    assert_eq!(released, Some("player-1".to_string()));
    assert_eq!(registry.session_of("conn-12345"), None);
    assert_eq!(registry.user_of("session-12345"), None);
    assert!(registry.claims_in_room("ROOM01").is_empty());
    assert!(registry.sessions_of("user-1", "ROOM01").is_empty());
}

#[test]
fn test_disconnect_without_claim_returns_none() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");

    assert_eq!(registry.disconnect("conn-12345", "ROOM01"), None);
    assert_eq!(registry.session_of("conn-12345"), None);
}

#[test]
fn test_disconnect_unknown_connection_is_harmless() {
    let registry = SessionRegistry::new();

    assert_eq!(registry.disconnect("conn-unknown", "ROOM01"), None);
}

#[test]
fn test_disconnect_leaves_other_sessions_intact() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.set_claim("player-1", "conn-12345", "ROOM01");
    registry.bind_session("session-67890", "user-1", "conn-67890", "ROOM01");
    registry.set_claim("player-2", "conn-67890", "ROOM01");

    let released = registry.disconnect("conn-12345", "ROOM01");
    assert_eq!(released, Some("player-1".to_string()));

    let claims = registry.claims_in_room("ROOM01");
    assert_eq!(claims.len(), 1);
    assert_eq!(claims.get("player-2"), Some(&"session-67890".to_string()));

    let sessions = registry.sessions_of("user-1", "ROOM01");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions.get("session-67890"), Some(&"player-2".to_string()));
}

#[test]
fn test_rooms_are_isolated() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.set_claim("player-1", "conn-12345", "ROOM01");

    // Same user/session strings never leak into another room
    assert!(registry.claims_in_room("ROOM02").is_empty());
    assert!(registry.sessions_of("user-1", "ROOM02").is_empty());

    registry.bind_session("session-67890", "user-1", "conn-67890", "ROOM02");
    registry.set_claim("player-2", "conn-67890", "ROOM02");

    let room1 = registry.claims_in_room("ROOM01");
    assert_eq!(room1.len(), 1);
    assert_eq!(room1.get("player-1"), Some(&"session-12345".to_string()));

    let room2 = registry.claims_in_room("ROOM02");
    assert_eq!(room2.len(), 1);
    assert_eq!(room2.get("player-2"), Some(&"session-67890".to_string()));
}

#[test]
fn test_claim_in_room_without_session_binding_there_is_a_noop() {
    let registry = SessionRegistry::new();

    // Session bound in ROOM01 only — a claim against ROOM02 has no
    // room/user entry there and must be ignored.
    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.set_claim("player-1", "conn-12345", "ROOM02");

    assert!(registry.claims_in_room("ROOM02").is_empty());
}

#[test]
fn test_reset_clears_everything() {
    let registry = SessionRegistry::new();

    registry.bind_session("session-12345", "user-1", "conn-12345", "ROOM01");
    registry.set_claim("player-1", "conn-12345", "ROOM01");

    registry.reset();

    assert_eq!(registry.user_of("session-12345"), None);
    assert_eq!(registry.session_of("conn-12345"), None);
    assert!(registry.claims_in_room("ROOM01").is_empty());
}
