//! Players and the registry that owns them.

use crate::board::{OFF_BOARD, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Largest supported table.
pub const MAX_PLAYERS: usize = 10;

/// Smallest table a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// Stable, 1-based player identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{}", _0)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Creates an identifier.
    pub fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// A player's board state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    is_ai: bool,
    current_square: Square,
    has_started: bool,
    is_active: bool,
}

impl Player {
    /// Creates a player off the board.
    pub fn new(id: PlayerId, name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_ai,
            current_square: OFF_BOARD,
            has_started: false,
            is_active: true,
        }
    }

    /// Player identifier.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an AI rolls for this player.
    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    /// Square occupied, `0` when off the board.
    pub fn current_square(&self) -> Square {
        self.current_square
    }

    /// Whether the starting value has been rolled.
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// Whether the player is in the turn rotation.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Enters the board on square 1.
    pub fn start(&mut self) {
        self.has_started = true;
        self.current_square = 1;
    }

    /// Places the player on `square`.
    pub fn move_to(&mut self, square: Square) {
        self.current_square = square;
    }

    /// Takes the player out of the rotation.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Back to the off-board, not-started, active state.
    pub fn reset(&mut self) {
        self.current_square = OFF_BOARD;
        self.has_started = false;
        self.is_active = true;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Default name for the player at zero-based `index`.
pub fn default_player_name(index: usize) -> String {
    format!("Player {}", index + 1)
}

/// Ordered set of players; the only owner of [`Player`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    /// Wraps an explicit list of players.
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Creates `count` players, the first `ai_count` of them AI.
    ///
    /// Names come from `names` where given, otherwise `"Player N"`.
    #[instrument(skip(names))]
    pub fn with_roster(count: usize, ai_count: usize, names: &[String]) -> Self {
        let count = count.min(MAX_PLAYERS);
        let players = (0..count)
            .map(|index| {
                let name = names
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| default_player_name(index));
                // count is capped at MAX_PLAYERS, so index + 1 fits in u8
                let id = PlayerId::new(u8::try_from(index + 1).unwrap_or(u8::MAX));
                Player::new(id, name, index < ai_count)
            })
            .collect::<Vec<_>>();
        info!(
            players = players.len(),
            ai = players.iter().filter(|p| p.is_ai()).count(),
            "Players created"
        );
        Self { players }
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if there are no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player at `index`.
    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Mutable player at `index`.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    /// Index of the player with `id`.
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    /// Player with `id`.
    pub fn by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// All players in turn order.
    pub fn as_slice(&self) -> &[Player] {
        &self.players
    }

    /// Iterates players in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Returns true if any player is still in the rotation.
    pub fn any_active(&self) -> bool {
        self.players.iter().any(Player::is_active)
    }

    /// First active player at or after `start`, wrapping around once.
    #[instrument(skip(self))]
    pub fn next_active_from(&self, start: usize) -> Option<usize> {
        let len = self.players.len();
        if len == 0 {
            return None;
        }
        let found = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&index| self.players[index].is_active());
        if found.is_none() {
            warn!("No active players found");
        }
        found
    }

    /// Takes the player with `id` out of the rotation.
    ///
    /// Returns false if no such player exists.
    #[instrument(skip(self))]
    pub fn deactivate(&mut self, id: PlayerId) -> bool {
        match self.players.iter_mut().find(|p| p.id() == id) {
            Some(player) => {
                player.deactivate();
                debug!(player = %player, "Player deactivated");
                true
            }
            None => false,
        }
    }

    /// Resets every player to the initial state.
    pub fn reset_all(&mut self) {
        self.players.iter_mut().for_each(Player::reset);
    }
}
