//! Dice rolls as first-class actions, and the errors a turn can raise.
//!
//! Sequencing errors are rejected before any state changes, so the caller
//! can simply retry in the right phase.

use crate::invariants::InvariantViolation;
use crate::phases::Phase;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// A dice value submitted for the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Roll {
    /// The player rolling.
    pub player: PlayerId,
    /// The face rolled.
    pub value: u8,
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rolls {}", self.player, self.value)
    }
}

/// Error raised by a turn command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// The scheduler is not waiting for a roll.
    #[display("Not awaiting a roll (phase {})", _0)]
    NotAwaitingRoll(Phase),

    /// A dice move is still being animated.
    #[display("A move is still in progress")]
    MoveInProgress,

    /// A roll was already requested and not yet submitted.
    #[display("A roll is already pending")]
    RollAlreadyPending,

    /// The value is not a die face.
    #[display("Dice value {} is not between 1 and 6", _0)]
    InvalidDiceValue(u8),

    /// No player is left in the rotation.
    #[display("No active players")]
    NoActivePlayers,

    /// An arrival was reported with no move outstanding.
    #[display("No move in progress")]
    NoMoveInProgress,

    /// No player with this id.
    #[display("Unknown player {}", _0)]
    UnknownPlayer(PlayerId),

    /// A postcondition failed.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl TurnError {
    /// Folds a list of violations into one error.
    pub fn from_violations(violations: &[InvariantViolation]) -> Self {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        TurnError::InvariantViolation(descriptions)
    }
}

impl std::error::Error for TurnError {}
