//! Game simulation modules

pub mod combat;
pub mod constants;
pub mod geometry;
pub mod leaderboard;
pub mod powerups;
pub mod server;
pub mod snapshot;
pub mod world;

pub use server::{ArenaHandle, ArenaServer, GameCommand};

use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// Stable short display name derived from a session id
pub fn display_name(id: &Uuid) -> String {
    format!("Player_{}", &id.to_string()[..8])
}

/// Delivery target for an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every connected session, spectators included
    All,
    /// One session only
    One(Uuid),
}

/// A server message paired with its delivery target
#[derive(Debug, Clone)]
pub struct Outbound {
    pub to: Recipient,
    pub msg: ServerMsg,
}

impl Outbound {
    pub fn all(msg: ServerMsg) -> Self {
        Self {
            to: Recipient::All,
            msg,
        }
    }

    pub fn one(id: Uuid, msg: ServerMsg) -> Self {
        Self {
            to: Recipient::One(id),
            msg,
        }
    }
}
