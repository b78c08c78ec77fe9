//! Squares in bounds: every piece is off the board or on `1..=winning_square`.

use super::Invariant;
use crate::board::OFF_BOARD;
use crate::state::GameState;

/// Invariant: pieces never leave `{0} ∪ [1, winning_square]`, and only
/// started players are on the board.
pub struct SquaresInBoundsInvariant;

impl Invariant<GameState> for SquaresInBoundsInvariant {
    fn holds(state: &GameState) -> bool {
        let winning_square = state.rules().winning_square;
        state.players().iter().all(|player| {
            let square = player.current_square();
            if player.has_started() {
                (1..=winning_square).contains(&square)
            } else {
                square == OFF_BOARD
            }
        })
    }

    fn description() -> &'static str {
        "Every player is off the board or on a square up to the winning square"
    }
}
