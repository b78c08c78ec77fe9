//! Contracts with the collaborators outside the engine.
//!
//! The engine asks a [`DiceSource`] for rolls and a [`Mover`] for piece
//! movement. Values come back through the scheduler's `submit_roll` and
//! `on_arrived` commands; the engine never calls into rendering or input.

use crate::board::Square;
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Generation counter bumped on every reset.
///
/// Arrival callbacks carry the epoch of the move they complete so that
/// callbacks issued before a reset can be recognised and dropped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("epoch {}", _0)]
pub struct Epoch(u64);

impl Epoch {
    /// The following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A piece movement for the mover to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct MoveRequest {
    /// Piece to move.
    pub player: PlayerId,
    /// Square the piece leaves.
    pub from: Square,
    /// Square the piece goes to.
    pub to: Square,
    /// `true` for a dice move the engine waits on, `false` for a teleport.
    pub animate: bool,
    /// Generation the request belongs to.
    pub epoch: Epoch,
}

impl MoveRequest {
    /// Squares walked by an animated move.
    pub fn steps(&self) -> Square {
        self.to.saturating_sub(self.from)
    }
}

/// Supplies dice values.
pub trait DiceSource {
    /// Called when `player` should roll. The value arrives later through
    /// `TurnScheduler::submit_roll`.
    fn request_roll(&mut self, player: &Player);
}

/// Moves pieces on the presentation side.
pub trait Mover {
    /// Starts a movement. For animated requests the mover must eventually
    /// call `TurnScheduler::on_arrived` with `request.epoch`. Teleports are
    /// fire-and-forget.
    fn move_to(&mut self, request: MoveRequest);
}

impl<T: DiceSource + ?Sized> DiceSource for Box<T> {
    fn request_roll(&mut self, player: &Player) {
        (**self).request_roll(player);
    }
}

impl<T: Mover + ?Sized> Mover for Box<T> {
    fn move_to(&mut self, request: MoveRequest) {
        (**self).move_to(request);
    }
}
