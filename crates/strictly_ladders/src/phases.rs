//! Scheduler phases.

use serde::{Deserialize, Serialize};

/// Where the turn scheduler is in its cycle.
///
/// `Idle → AwaitingRoll ⇄ ResolvingMove → (AwaitingRoll | GameOver)`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum Phase {
    /// No game running.
    #[default]
    Idle,
    /// Waiting for the current player's dice value.
    AwaitingRoll,
    /// Waiting for the mover to report arrival.
    ResolvingMove,
    /// A player has won; no rolls are accepted.
    GameOver,
}

impl Phase {
    /// Returns true while a game is being played.
    pub fn is_running(self) -> bool {
        matches!(self, Phase::AwaitingRoll | Phase::ResolvingMove)
    }
}
