//! Strictly Ladders - a snakes and ladders turn and rules engine
//!
//! The crate owns whose turn it is, turns dice values into board
//! positions, chains snakes and ladders with a hop bound, detects the
//! winner and decides bonus turns. Rendering, dice animation and input
//! live outside; they talk to the engine through two boundary traits and
//! a stream of events.
//!
//! # Architecture
//!
//! - **Board**: square numbering and zig-zag layout
//! - **Shortcuts**: snake/ladder registry with chain resolution
//! - **Players**: the registry that owns every [`Player`]
//! - **Resolver**: pure dice roll resolution
//! - **Scheduler**: the turn state machine
//!
//! # Example
//!
//! ```
//! use strictly_ladders::{
//!     DiceSource, GameConfig, MoveRequest, Mover, Player, TurnScheduler, TurnStep,
//! };
//!
//! struct Button;
//! impl DiceSource for Button {
//!     fn request_roll(&mut self, _player: &Player) {}
//! }
//!
//! struct Instant;
//! impl Mover for Instant {
//!     fn move_to(&mut self, _request: MoveRequest) {}
//! }
//!
//! let config = GameConfig::new(2, 0);
//! let (mut game, _rejected) = TurnScheduler::from_config(&config, Button, Instant).unwrap();
//! game.start_game().unwrap();
//!
//! // Rolling the starting value enters the board and grants another roll.
//! if let TurnStep::Moving { epoch, .. } = game.submit_roll(1).unwrap() {
//!     let step = game.on_arrived(epoch).unwrap();
//!     assert!(matches!(step, TurnStep::BonusTurn(_)));
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod boundary;
mod config;
mod contracts;
mod dice;
mod error;
mod events;
mod invariants;
mod phases;
mod player;
mod resolver;
mod rules;
mod scheduler;
mod shortcuts;
mod state;

// Crate-level exports - Board
pub use board::{BoardTopology, OFF_BOARD, STANDARD_SIZE, Square};

// Crate-level exports - Shortcuts
pub use shortcuts::{
    ChainResolution, ShortcutEntry, ShortcutError, ShortcutKind, ShortcutTable,
    traditional_shortcuts,
};

// Crate-level exports - Players
pub use player::{MAX_PLAYERS, MIN_PLAYERS, Player, PlayerId, PlayerRegistry, default_player_name};

// Crate-level exports - Rules and resolution
pub use resolver::{Outcome, resolve};
pub use rules::GameRules;

// Crate-level exports - Dice
pub use dice::{DIE_FACES, Die};

// Crate-level exports - Boundary
pub use boundary::{DiceSource, Epoch, MoveRequest, Mover};

// Crate-level exports - Scheduler
pub use action::{Roll, TurnError};
pub use events::GameEvent;
pub use phases::Phase;
pub use scheduler::{TurnScheduler, TurnStep};
pub use state::GameState;

// Crate-level exports - Contracts and invariants
pub use contracts::{
    AwaitingRoll, Contract, DieFace, ForwardDiceMove, LegalRoll, RollContract, assert_invariants,
    assert_roll_postconditions, check_invariants,
};
pub use invariants::{
    ActiveTurnInvariant, Invariant, InvariantSet, InvariantViolation, LadderInvariants,
    SingleWinnerInvariant, SquaresInBoundsInvariant,
};

// Crate-level exports - Configuration and errors
pub use config::{ConfigError, GameConfig};
pub use error::{RulesError, SetupError};
