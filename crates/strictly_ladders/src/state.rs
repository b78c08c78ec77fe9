//! Game state owned by the turn scheduler.

use crate::player::{Player, PlayerId, PlayerRegistry};
use crate::phases::Phase;
use crate::rules::GameRules;

/// Everything the rules need to know about a game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) players: PlayerRegistry,
    pub(crate) current_player_index: usize,
    pub(crate) phase: Phase,
    pub(crate) last_dice_value: Option<u8>,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) rules: GameRules,
}

impl GameState {
    /// Creates an idle game.
    pub fn new(players: PlayerRegistry, rules: GameRules) -> Self {
        Self {
            players,
            current_player_index: 0,
            phase: Phase::Idle,
            last_dice_value: None,
            winner: None,
            rules,
        }
    }

    /// The player registry.
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Index of the player whose turn it is.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Most recently accepted dice value.
    pub fn last_dice_value(&self) -> Option<u8> {
        self.last_dice_value
    }

    /// Winner once the game is over.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Rules in force.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }
}
