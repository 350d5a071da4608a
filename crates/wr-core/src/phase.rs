//! Game phase: before the timer starts, while playing, and after.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamePhase {
    #[default]
    PreGame,
    Playing,
    Finished,
}

impl GamePhase {
    /// Tiles can only be picked up while the clock is running.
    pub fn allows_drag(self) -> bool {
        matches!(self, GamePhase::Playing)
    }

    /// Advance on "Start Game". No effect outside `PreGame`.
    pub fn start(self) -> Self {
        match self {
            GamePhase::PreGame => GamePhase::Playing,
            other => other,
        }
    }

    /// Timer ran out or the player submitted. No effect outside `Playing`.
    pub fn finish(self) -> Self {
        match self {
            GamePhase::Playing => GamePhase::Finished,
            other => other,
        }
    }
}
