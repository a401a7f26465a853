/// Database row types for all tables.
/// These correspond 1:1 to the SQLite schema defined in migrations.rs.

/// Account record in the accounts table — the durable user identity.
#[derive(Debug, Clone)]
pub struct Account {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Game record in the games table. The game id doubles as the room id
/// for registry and broadcast scoping.
#[derive(Debug, Clone)]
pub struct Game {
    pub game_id: String,
    pub status: String,
    pub created_at: String,
}

/// Player record in the players table. A player belongs to exactly one
/// game and one account, and outlives any connection or session.
#[derive(Debug, Clone)]
pub struct Player {
    pub player_id: String,
    pub game_id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: String,
}
