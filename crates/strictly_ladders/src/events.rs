//! Events published to presentation layers.

use crate::board::Square;
use crate::player::PlayerId;
use crate::shortcuts::ShortcutEntry;
use serde::{Deserialize, Serialize};

/// Something a presentation layer may want to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum GameEvent {
    /// A player's turn began.
    #[display("Turn started: {}", _0)]
    TurnStarted(PlayerId),
    /// The dice source was asked for a roll.
    #[display("Roll requested: {}", _0)]
    RollRequested(PlayerId),
    /// A dice value was accepted.
    #[display("Dice rolled: {}", _0)]
    DiceRolled(u8),
    /// A player rolled the starting value and entered the board.
    #[display("Player {} started", _0)]
    PlayerStarted(PlayerId),
    /// A player missed the starting value; the turn moves on.
    #[display("Player {} passed", _0)]
    TurnPassed(PlayerId),
    /// A player now occupies `square`.
    #[display("Player {} moved to {}", player, square)]
    PlayerMoved {
        /// Who moved.
        player: PlayerId,
        /// Where to.
        square: Square,
    },
    /// A snake or ladder was taken.
    #[display("Player {} took {}", player, entry)]
    ShortcutTaken {
        /// Who took it.
        player: PlayerId,
        /// The shortcut.
        entry: ShortcutEntry,
    },
    /// A shortcut chain was cut at the hop limit.
    #[display("Shortcut chain limit exceeded for {} at {}", player, square)]
    ChainLimitExceeded {
        /// Whose chain.
        player: PlayerId,
        /// Square the chain stopped on.
        square: Square,
    },
    /// The game is over.
    #[display("Player {} won", _0)]
    PlayerWon(PlayerId),
}
