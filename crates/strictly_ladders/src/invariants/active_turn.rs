//! Active turn: while a game runs, the turn belongs to an active player.

use super::Invariant;
use crate::state::GameState;

/// Invariant: in `AwaitingRoll` or `ResolvingMove` the current index points
/// at an active player.
pub struct ActiveTurnInvariant;

impl Invariant<GameState> for ActiveTurnInvariant {
    fn holds(state: &GameState) -> bool {
        if !state.phase().is_running() {
            return true;
        }
        state.current_player().is_some_and(|p| p.is_active())
    }

    fn description() -> &'static str {
        "The current player is active while a game is running"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::Phase;
    use crate::player::{PlayerId, PlayerRegistry};
    use crate::rules::GameRules;

    #[test]
    fn test_idle_game_holds() {
        let state = GameState::new(PlayerRegistry::default(), GameRules::default());
        assert!(ActiveTurnInvariant::holds(&state));
    }

    #[test]
    fn test_inactive_current_player_violates() {
        let mut state = GameState::new(PlayerRegistry::with_roster(2, 0, &[]), GameRules::default());
        state.phase = Phase::AwaitingRoll;
        assert!(ActiveTurnInvariant::holds(&state));

        state.players.deactivate(PlayerId::new(1));
        assert!(!ActiveTurnInvariant::holds(&state));
    }
}
