//! WebSocket protocol message definitions
//! These are the wire types for client-server communication

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Power-up kinds spawnable in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    Speed,
    Shield,
    RapidFire,
    Health,
    Damage,
}

/// Timed buff kinds carried on a player. `Health` power-ups heal instantly
/// and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    Speed,
    Shield,
    RapidFire,
    Damage,
}

/// Cosmetic team label assigned at seat creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Team {
    Red,
    Blue,
}

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMsg {
    /// Movement intent plus reported aim angle
    PlayerMove {
        /// Movement intent X in [-1, 1]
        dx: f32,
        /// Movement intent Y in [-1, 1]
        dy: f32,
        /// Aim angle in radians (trusted, display only)
        angle: f32,
    },

    /// Fire request
    PlayerShoot {
        /// Fire angle in radians
        angle: f32,
    },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMsg {
    /// Full snapshot sent once on connect (and on promotion)
    #[serde(rename_all = "camelCase")]
    GameState {
        #[serde(flatten)]
        snapshot: WorldSnapshot,
        is_spectator: bool,
    },

    /// Connect refused a seat; the session is spectating
    #[serde(rename_all = "camelCase")]
    GameFull {
        message: String,
        is_spectator: bool,
    },

    /// A session took a seat
    #[serde(rename_all = "camelCase")]
    PlayerJoined { player_count: usize },

    /// Sent to a spectator that just received a seat
    #[serde(rename_all = "camelCase")]
    PromotedToPlayer {
        message: String,
        is_spectator: bool,
    },

    /// Sent to the collecting session only. The collected kind is carried
    /// as `powerUp` because the message tag already claims `type`.
    #[serde(rename_all = "camelCase")]
    PowerUpCollected {
        #[serde(rename = "powerUp")]
        kind: PowerUpKind,
        effect: String,
    },

    /// Occupancy change after a disconnect
    #[serde(rename_all = "camelCase")]
    PlayerCountUpdate {
        player_count: usize,
        spectator_count: usize,
    },

    /// A bullet connected with a player
    #[serde(rename_all = "camelCase")]
    PlayerHit {
        player_id: Uuid,
        shooter_id: Uuid,
        damage: i32,
        x: f32,
        y: f32,
    },

    /// A player's health reached zero
    #[serde(rename_all = "camelCase")]
    PlayerKilled {
        killer: String,
        victim: String,
        killer_color: String,
        victim_color: String,
    },

    /// Full snapshot broadcast every tick
    GameUpdate {
        #[serde(flatten)]
        snapshot: WorldSnapshot,
    },
}

/// Full serialized state of all live entities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub bullets: Vec<BulletSnapshot>,
    pub power_ups: Vec<PowerUpSnapshot>,
    pub explosions: Vec<ExplosionSnapshot>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Player state in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: Uuid,
    pub x: f32,
    pub y: f32,
    /// Aim angle in radians
    pub heading: f32,
    /// Health (0-100)
    pub health: i32,
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,
    pub team: Team,
    pub color: String,
    /// Active buffs as absolute expiry timestamps (unix ms)
    pub active_effects: HashMap<EffectKind, u64>,
}

/// Bullet state in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletSnapshot {
    pub id: String,
    pub owner_id: Uuid,
    pub x: f32,
    pub y: f32,
    pub color: String,
}

/// Power-up state in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUpSnapshot {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
}

/// Cosmetic explosion in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplosionSnapshot {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Ranked leaderboard entry (top 10 by score)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub name: String,
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,
}
