//! Dice roll resolution.
//!
//! A pure function from a player's state and a dice value to the square
//! the player should occupy. Shortcuts are not consulted here; they are
//! applied once the piece has physically arrived.

use crate::board::{OFF_BOARD, Square};
use crate::player::Player;
use crate::rules::GameRules;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What a roll does for the player who made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outcome {
    /// Square to move to (`0` when the player stays off the board).
    pub new_square: Square,
    /// The roll entered the player onto the board.
    pub started: bool,
    /// The roll reached the winning square.
    pub won: bool,
    /// The same player rolls again.
    pub bonus_turn: bool,
    /// The player stays put and the turn moves on.
    pub turn_passed: bool,
}

/// Resolves `dice_value` for `player` under `rules`.
///
/// - Not started: the starting value enters the board on square 1 with a
///   bonus turn; anything else passes the turn.
/// - Started: reaching or overshooting the winning square wins, clamped to
///   it. Otherwise the player advances, with a bonus turn on the bonus value.
#[instrument(skip(player, rules), fields(player_id = %player.id(), square = player.current_square()))]
pub fn resolve(player: &Player, dice_value: u8, rules: &GameRules) -> Outcome {
    if !player.has_started() {
        return if dice_value == rules.starting_dice_value {
            Outcome {
                new_square: 1,
                started: true,
                bonus_turn: true,
                ..Outcome::default()
            }
        } else {
            Outcome {
                new_square: OFF_BOARD,
                turn_passed: true,
                ..Outcome::default()
            }
        };
    }

    let candidate = player.current_square() + Square::from(dice_value);
    if candidate >= rules.winning_square {
        return Outcome {
            new_square: rules.winning_square,
            won: true,
            ..Outcome::default()
        };
    }

    Outcome {
        new_square: candidate,
        bonus_turn: rules.grants_bonus(dice_value),
        ..Outcome::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;

    fn player_at(square: Square) -> Player {
        let mut player = Player::new(PlayerId::new(1), "Ada", false);
        player.start();
        player.move_to(square);
        player
    }

    #[test]
    fn test_starting_value_enters_board() {
        let player = Player::new(PlayerId::new(1), "Ada", false);
        let outcome = resolve(&player, 1, &GameRules::default());
        assert_eq!(
            outcome,
            Outcome {
                new_square: 1,
                started: true,
                bonus_turn: true,
                ..Outcome::default()
            }
        );
    }

    #[test]
    fn test_other_values_pass_the_turn() {
        let player = Player::new(PlayerId::new(1), "Ada", false);
        for value in 2..=6 {
            let outcome = resolve(&player, value, &GameRules::default());
            assert!(outcome.turn_passed);
            assert!(!outcome.started);
            assert!(!outcome.bonus_turn);
            assert_eq!(outcome.new_square, OFF_BOARD);
        }
    }

    #[test]
    fn test_custom_starting_value() {
        let rules = GameRules {
            starting_dice_value: 6,
            ..GameRules::default()
        };
        let player = Player::new(PlayerId::new(1), "Ada", false);
        assert!(resolve(&player, 1, &rules).turn_passed);
        assert!(resolve(&player, 6, &rules).started);
    }

    #[test]
    fn test_plain_move() {
        let outcome = resolve(&player_at(10), 4, &GameRules::default());
        assert_eq!(outcome.new_square, 14);
        assert!(!outcome.bonus_turn);
        assert!(!outcome.won);
    }

    #[test]
    fn test_six_grants_bonus() {
        let outcome = resolve(&player_at(10), 6, &GameRules::default());
        assert_eq!(outcome.new_square, 16);
        assert!(outcome.bonus_turn);
    }

    #[test]
    fn test_overshoot_wins_clamped() {
        let outcome = resolve(&player_at(95), 6, &GameRules::default());
        assert!(outcome.won);
        assert_eq!(outcome.new_square, 100);
        assert!(!outcome.bonus_turn);
    }

    #[test]
    fn test_exact_landing_wins() {
        let outcome = resolve(&player_at(97), 3, &GameRules::default());
        assert!(outcome.won);
        assert_eq!(outcome.new_square, 100);
    }
}
