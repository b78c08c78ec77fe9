//! Single winner: a finished game has exactly one recorded winner.

use super::Invariant;
use crate::phases::Phase;
use crate::state::GameState;

/// Invariant: `GameOver` records a winner who is the only player on the
/// winning square; any other phase records none.
pub struct SingleWinnerInvariant;

impl Invariant<GameState> for SingleWinnerInvariant {
    fn holds(state: &GameState) -> bool {
        match (state.phase(), state.winner()) {
            (Phase::GameOver, Some(id)) => {
                let winning_square = state.rules().winning_square;
                let mut on_final = state
                    .players()
                    .iter()
                    .filter(|p| p.current_square() == winning_square)
                    .map(|p| p.id());
                on_final.next() == Some(id) && on_final.next().is_none()
            }
            (Phase::GameOver, None) => false,
            (_, winner) => winner.is_none(),
        }
    }

    fn description() -> &'static str {
        "A finished game has exactly one player, the winner, on the winning square"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerId, PlayerRegistry};
    use crate::rules::GameRules;

    fn state() -> GameState {
        GameState::new(PlayerRegistry::with_roster(2, 0, &[]), GameRules::default())
    }

    #[test]
    fn test_running_game_without_winner_holds() {
        assert!(SingleWinnerInvariant::holds(&state()));
    }

    #[test]
    fn test_winner_on_winning_square_holds() {
        let mut state = state();
        if let Some(player) = state.players.get_mut(1) {
            player.start();
            player.move_to(100);
        }
        state.phase = Phase::GameOver;
        state.winner = Some(PlayerId::new(2));
        assert!(SingleWinnerInvariant::holds(&state));
    }

    #[test]
    fn test_second_player_on_winning_square_violates() {
        let mut state = state();
        for index in 0..2 {
            if let Some(player) = state.players.get_mut(index) {
                player.start();
                player.move_to(100);
            }
        }
        state.phase = Phase::GameOver;
        state.winner = Some(PlayerId::new(2));
        assert!(!SingleWinnerInvariant::holds(&state));
    }

    #[test]
    fn test_winner_elsewhere_violates() {
        let mut state = state();
        state.phase = Phase::GameOver;
        state.winner = Some(PlayerId::new(1));
        assert!(!SingleWinnerInvariant::holds(&state));
    }

    #[test]
    fn test_winner_while_running_violates() {
        let mut state = state();
        state.phase = Phase::AwaitingRoll;
        state.winner = Some(PlayerId::new(1));
        assert!(!SingleWinnerInvariant::holds(&state));
    }
}
