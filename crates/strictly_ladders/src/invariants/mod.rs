//! First-class invariants for the turn engine.
//!
//! Invariants are logical properties of [`GameState`](crate::GameState)
//! that must hold after every transition. The scheduler checks them in
//! debug builds; tests can check them directly.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Returns every violated invariant, or `Ok(())` if all hold.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        into_result(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        into_result(violations)
    }
}

pub mod active_turn;
pub mod single_winner;
pub mod squares_in_bounds;

pub use active_turn::ActiveTurnInvariant;
pub use single_winner::SingleWinnerInvariant;
pub use squares_in_bounds::SquaresInBoundsInvariant;

/// All engine invariants as a composable set.
pub type LadderInvariants = (
    SquaresInBoundsInvariant,
    SingleWinnerInvariant,
    ActiveTurnInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::Phase;
    use crate::player::PlayerRegistry;
    use crate::rules::GameRules;
    use crate::state::GameState;

    fn fresh() -> GameState {
        GameState::new(PlayerRegistry::with_roster(3, 0, &[]), GameRules::default())
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_game() {
        assert!(LadderInvariants::check_all(&fresh()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = fresh();
        if let Some(player) = state.players.get_mut(0) {
            player.move_to(150);
        }
        state.phase = Phase::GameOver;

        let violations = LadderInvariants::check_all(&state).expect_err("corrupted state");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (SquaresInBoundsInvariant, ActiveTurnInvariant);
        assert!(TwoInvariants::check_all(&fresh()).is_ok());
    }
}
