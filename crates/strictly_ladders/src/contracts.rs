//! Contract-based validation for turn commands.
//!
//! Preconditions are checked on every call and reject the command before
//! anything changes. Postconditions run in debug builds.

use crate::action::{Roll, TurnError};
use crate::dice::DIE_FACES;
use crate::invariants::{InvariantSet, LadderInvariants};
use crate::phases::Phase;
use crate::state::GameState;
use tracing::{error, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), TurnError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), TurnError>;
}

// ─────────────────────────────────────────────────────────────
//  Roll Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the scheduler must be waiting for a roll.
pub struct AwaitingRoll;

impl AwaitingRoll {
    /// Maps the phase to the matching sequencing error.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), TurnError> {
        match state.phase() {
            Phase::AwaitingRoll => Ok(()),
            Phase::ResolvingMove => Err(TurnError::MoveInProgress),
            phase => Err(TurnError::NotAwaitingRoll(phase)),
        }
    }
}

/// Precondition: the value must be a die face.
pub struct DieFace;

impl DieFace {
    /// Rejects values outside 1..=6.
    #[instrument]
    pub fn check(roll: &Roll) -> Result<(), TurnError> {
        if DIE_FACES.contains(&roll.value) {
            Ok(())
        } else {
            Err(TurnError::InvalidDiceValue(roll.value))
        }
    }
}

/// Composite precondition for a roll.
pub struct LegalRoll;

impl LegalRoll {
    /// Validates all preconditions for a roll.
    #[instrument(skip(state))]
    pub fn check(roll: &Roll, state: &GameState) -> Result<(), TurnError> {
        AwaitingRoll::check(state)?;
        DieFace::check(roll)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Roll Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: a dice move never takes the roller backwards.
pub struct ForwardDiceMove;

impl ForwardDiceMove {
    /// Compares the roller's square before and after the roll.
    #[instrument(skip(before, after))]
    pub fn holds(before: &GameState, after: &GameState) -> bool {
        let Some(roller) = before.current_player() else {
            return true;
        };
        let valid = after
            .players()
            .by_id(roller.id())
            .is_none_or(|p| p.current_square() >= roller.current_square());
        if !valid {
            warn!(player = %roller.id(), "Dice move went backwards");
        }
        valid
    }
}

/// Checks every engine invariant against `state`.
pub fn check_invariants(state: &GameState) -> Result<(), TurnError> {
    LadderInvariants::check_all(state).map_err(|violations| TurnError::from_violations(&violations))
}

/// Asserts engine invariants after a committed transition.
///
/// Violations are logged and fail a `debug_assert!`; the transition is
/// never reported back to the caller as rejected.
pub fn assert_invariants(state: &GameState) {
    if let Err(e) = check_invariants(state) {
        error!(error = %e, "Engine invariant violated");
        debug_assert!(false, "{}", e);
    }
}

/// Asserts the roll postconditions after a committed roll.
pub fn assert_roll_postconditions(before: &GameState, after: &GameState) {
    if let Err(e) = RollContract::post(before, after) {
        error!(error = %e, "Roll postcondition violated");
        debug_assert!(false, "{}", e);
    }
}

/// Contract for dice rolls.
///
/// Preconditions:
/// - Phase is `AwaitingRoll`
/// - Value is a die face
///
/// Postconditions:
/// - The roller did not move backwards
/// - All engine invariants hold
pub struct RollContract;

impl Contract<GameState, Roll> for RollContract {
    fn pre(state: &GameState, action: &Roll) -> Result<(), TurnError> {
        LegalRoll::check(action, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), TurnError> {
        if !ForwardDiceMove::holds(before, after) {
            return Err(TurnError::InvariantViolation(
                "Dice move went backwards".to_string(),
            ));
        }
        check_invariants(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerId, PlayerRegistry};
    use crate::rules::GameRules;

    fn awaiting() -> GameState {
        let mut state = GameState::new(PlayerRegistry::with_roster(2, 0, &[]), GameRules::default());
        state.phase = Phase::AwaitingRoll;
        state
    }

    #[test]
    fn test_precondition_accepts_face_in_phase() {
        let roll = Roll::new(PlayerId::new(1), 4);
        assert!(RollContract::pre(&awaiting(), &roll).is_ok());
    }

    #[test]
    fn test_precondition_rejects_idle() {
        let state = GameState::new(PlayerRegistry::with_roster(2, 0, &[]), GameRules::default());
        let roll = Roll::new(PlayerId::new(1), 4);
        assert_eq!(
            RollContract::pre(&state, &roll),
            Err(TurnError::NotAwaitingRoll(Phase::Idle))
        );
    }

    #[test]
    fn test_precondition_rejects_move_in_progress() {
        let mut state = awaiting();
        state.phase = Phase::ResolvingMove;
        let roll = Roll::new(PlayerId::new(1), 4);
        assert_eq!(RollContract::pre(&state, &roll), Err(TurnError::MoveInProgress));
    }

    #[test]
    fn test_precondition_rejects_bad_face() {
        for value in [0, 7, 255] {
            let roll = Roll::new(PlayerId::new(1), value);
            assert_eq!(
                RollContract::pre(&awaiting(), &roll),
                Err(TurnError::InvalidDiceValue(value))
            );
        }
    }

    #[test]
    fn test_postcondition_detects_backwards_move() {
        let mut before = awaiting();
        if let Some(player) = before.players.get_mut(0) {
            player.start();
            player.move_to(30);
        }
        let mut after = before.clone();
        if let Some(player) = after.players.get_mut(0) {
            player.move_to(12);
        }
        assert!(RollContract::post(&before, &before.clone()).is_ok());
        assert!(RollContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_assert_invariants_accepts_valid_state() {
        assert_invariants(&awaiting());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "winning square")]
    fn test_assert_invariants_panics_in_debug() {
        let mut state = awaiting();
        if let Some(player) = state.players.get_mut(0) {
            player.start();
            player.move_to(120);
        }
        assert_invariants(&state);
    }
}
