//! Catalog: durable store operations for accounts, games, and players.
//!
//! Synchronous rusqlite helpers, called from handlers inside
//! tokio::task::spawn_blocking. The registry never touches the database
//! directly — everything durable goes through here.

use chrono::Utc;
use rand::Rng;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::models::{Account, Game, Player};

/// Characters used for game codes: uppercase letters and digits.
const GAME_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated game code.
const GAME_CODE_LEN: usize = 6;

/// Generate a random 6-character game code (uppercase alphanumeric).
pub fn generate_game_code() -> String {
    let mut rng = rand::rng();
    (0..GAME_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..GAME_CODE_CHARSET.len());
            GAME_CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Create a new game in the `waiting` state with a fresh game code.
pub fn create_game(conn: &Connection) -> rusqlite::Result<Game> {
    let game = Game {
        game_id: generate_game_code(),
        status: "waiting".to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    conn.execute(
        "INSERT INTO games (game_id, status, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![game.game_id, game.status, game.created_at],
    )?;
    Ok(game)
}

/// List all games, oldest first.
pub fn list_games(conn: &Connection) -> rusqlite::Result<Vec<Game>> {
    let mut stmt = conn.prepare(
        "SELECT game_id, status, created_at FROM games ORDER BY created_at, game_id",
    )?;
    let games = stmt
        .query_map([], |row| {
            Ok(Game {
                game_id: row.get(0)?,
                status: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(games)
}

/// Look up a game by id. Absence is a normal outcome, not an error.
pub fn get_game(conn: &Connection, game_id: &str) -> rusqlite::Result<Option<Game>> {
    conn.query_row(
        "SELECT game_id, status, created_at FROM games WHERE game_id = ?1",
        rusqlite::params![game_id],
        |row| {
            Ok(Game {
                game_id: row.get(0)?,
                status: row.get(1)?,
                created_at: row.get(2)?,
            })
        },
    )
    .optional()
}

/// List the players of a game in catalog order.
///
/// Catalog order is `created_at, player_id` — the claim resolver's
/// reconnection tie-break depends on this being deterministic.
pub fn list_players(conn: &Connection, game_id: &str) -> rusqlite::Result<Vec<Player>> {
    let mut stmt = conn.prepare(
        "SELECT player_id, game_id, user_id, name, created_at
         FROM players WHERE game_id = ?1
         ORDER BY created_at, player_id",
    )?;
    let players = stmt
        .query_map(rusqlite::params![game_id], |row| {
            Ok(Player {
                player_id: row.get(0)?,
                game_id: row.get(1)?,
                user_id: row.get(2)?,
                name: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(players)
}

/// Create a player for a game, owned by the given account.
pub fn create_player(
    conn: &Connection,
    game_id: &str,
    user_id: &str,
    name: &str,
) -> rusqlite::Result<Player> {
    let player = Player {
        player_id: Uuid::new_v4().to_string(),
        game_id: game_id.to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    conn.execute(
        "INSERT INTO players (player_id, game_id, user_id, name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            player.player_id,
            player.game_id,
            player.user_id,
            player.name,
            player.created_at
        ],
    )?;
    Ok(player)
}

/// Rename a player. Returns the updated row, or None if the id is unknown.
pub fn rename_player(
    conn: &Connection,
    player_id: &str,
    name: &str,
) -> rusqlite::Result<Option<Player>> {
    conn.execute(
        "UPDATE players SET name = ?1 WHERE player_id = ?2",
        rusqlite::params![name, player_id],
    )?;
    conn.query_row(
        "SELECT player_id, game_id, user_id, name, created_at
         FROM players WHERE player_id = ?1",
        rusqlite::params![player_id],
        |row| {
            Ok(Player {
                player_id: row.get(0)?,
                game_id: row.get(1)?,
                user_id: row.get(2)?,
                name: row.get(3)?,
                created_at: row.get(4)?,
            })
        },
    )
    .optional()
}

/// Look up an account by user id.
pub fn get_user(conn: &Connection, user_id: &str) -> rusqlite::Result<Option<Account>> {
    conn.query_row(
        "SELECT user_id, username, email, created_at FROM accounts WHERE user_id = ?1",
        rusqlite::params![user_id],
        |row| {
            Ok(Account {
                user_id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
}

/// Create an account with a fresh user id.
pub fn create_account(
    conn: &Connection,
    username: &str,
    email: &str,
) -> rusqlite::Result<Account> {
    let account = Account {
        user_id: Uuid::new_v4().to_string(),
        username: username.to_string(),
        email: email.to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    conn.execute(
        "INSERT INTO accounts (user_id, username, email, created_at) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            account.user_id,
            account.username,
            account.email,
            account.created_at
        ],
    )?;
    Ok(account)
}

/// List all accounts, oldest first.
pub fn list_accounts(conn: &Connection) -> rusqlite::Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, username, email, created_at FROM accounts ORDER BY created_at, user_id",
    )?;
    let accounts = stmt
        .query_map([], |row| {
            Ok(Account {
                user_id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(accounts)
}
