//! Rule parameters fixed for the lifetime of a game.

use crate::board::{BoardTopology, Square};
use crate::dice::DIE_FACES;
use crate::error::RulesError;
use crate::shortcuts::{ShortcutEntry, ShortcutError};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Value a player must roll to enter the board.
    pub starting_dice_value: u8,
    /// Square that ends the game.
    pub winning_square: Square,
    /// Value that grants another roll.
    pub bonus_turn_value: u8,
    /// Hop bound when following chained shortcuts.
    pub max_shortcut_chain_length: usize,
    /// Whether `bonus_turn_value` grants another roll at all.
    pub allow_bonus_turn: bool,
    /// Whether a shortcut chain ending on `winning_square` wins.
    pub shortcut_can_win: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_dice_value: 1,
            winning_square: 100,
            bonus_turn_value: 6,
            max_shortcut_chain_length: 10,
            allow_bonus_turn: true,
            shortcut_can_win: true,
        }
    }
}

impl GameRules {
    /// Checks the rules against a board.
    #[instrument(skip(board))]
    pub fn validate(&self, board: &BoardTopology) -> Result<(), RulesError> {
        if !board.contains(self.winning_square) || self.winning_square < 2 {
            return Err(RulesError::WinningSquareOffBoard {
                winning_square: self.winning_square,
                square_count: board.square_count(),
            });
        }
        for (name, value) in [
            ("starting_dice_value", self.starting_dice_value),
            ("bonus_turn_value", self.bonus_turn_value),
        ] {
            if !DIE_FACES.contains(&value) {
                return Err(RulesError::DiceValueOutOfRange { name, value });
            }
        }
        if self.max_shortcut_chain_length == 0 {
            return Err(RulesError::ChainLimitZero);
        }
        Ok(())
    }

    /// Checks that a shortcut keeps players within the playable squares.
    ///
    /// Starts must lie below the winning square and ends may not pass it.
    /// An end on the winning square is only allowed when shortcuts can win,
    /// so nobody is left standing there without having won.
    pub fn validate_shortcut(&self, entry: &ShortcutEntry) -> Result<(), ShortcutError> {
        if entry.start() >= self.winning_square {
            return Err(ShortcutError::PastWinningSquare {
                square: entry.start(),
                winning_square: self.winning_square,
            });
        }
        if entry.end() > self.winning_square {
            return Err(ShortcutError::PastWinningSquare {
                square: entry.end(),
                winning_square: self.winning_square,
            });
        }
        if entry.end() == self.winning_square && !self.shortcut_can_win {
            return Err(ShortcutError::EndsOnWinningSquare {
                start: entry.start(),
                end: entry.end(),
            });
        }
        Ok(())
    }

    /// Whether rolling `dice_value` on the board grants another roll.
    pub fn grants_bonus(&self, dice_value: u8) -> bool {
        self.allow_bonus_turn && dice_value == self.bonus_turn_value
    }
}
