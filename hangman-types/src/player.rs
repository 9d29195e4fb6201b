use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerIdentity {
    pub nick: String,
}

impl PlayerIdentity {
    /// Trims the nickname and rejects blank input.
    pub fn new(nick: &str) -> Result<Self, GameError> {
        let nick = nick.trim();
        if nick.is_empty() {
            return Err(GameError::EmptyNick);
        }
        Ok(Self {
            nick: nick.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    pub nick: String,
    #[ts(type = "number")]
    pub points: i64,
}
