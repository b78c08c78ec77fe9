//! Setup and rule errors.
//!
//! Configuration problems are fatal to starting a game; they never
//! leave the scheduler in a playable phase.

use crate::board::Square;
use crate::phases::Phase;
use crate::shortcuts::ShortcutError;

/// Rule parameters that cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RulesError {
    /// Winning square is not on the board.
    #[display("Winning square {} is not on a board of {} squares", winning_square, square_count)]
    WinningSquareOffBoard {
        /// Configured winning square.
        winning_square: Square,
        /// Squares on the board.
        square_count: Square,
    },

    /// A dice-valued rule is not a die face.
    #[display("{} must be a die face (1-6), got {}", name, value)]
    DiceValueOutOfRange {
        /// Rule name.
        name: &'static str,
        /// Configured value.
        value: u8,
    },

    /// Shortcut chains must allow at least one hop.
    #[display("max_shortcut_chain_length must be at least 1")]
    ChainLimitZero,
}

impl std::error::Error for RulesError {}

/// Reasons `start_game` refuses to start.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SetupError {
    /// The board has not been generated.
    #[display("Board not generated")]
    NotReady,

    /// Fewer than two players.
    #[display("Not enough players: have {}, need at least 2", _0)]
    PlayerCount(usize),

    /// Every player is out of the rotation.
    #[display("No active players")]
    NoActivePlayers,

    /// A game is already running or finished; reset first.
    #[display("Game already started (phase {})", _0)]
    AlreadyStarted(Phase),

    /// Unplayable rules.
    #[display("{}", _0)]
    #[from]
    Rules(RulesError),

    /// A registered shortcut does not fit the board or the rules.
    #[display("{}", _0)]
    #[from]
    Shortcut(ShortcutError),
}

impl std::error::Error for SetupError {}
