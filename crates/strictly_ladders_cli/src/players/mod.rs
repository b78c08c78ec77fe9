//! Roller trait and implementations.

mod human;
mod simple_ai;

pub use human::{HumanRoller, spawn_stdin_reader};
pub use simple_ai::AiRoller;

use anyhow::Result;
use strictly_ladders::Player;

/// What a seat decided to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Submit this dice value.
    Roll(u8),
    /// Start over.
    Reset,
    /// Leave the game.
    Quit,
}

/// Trait for seats that can take a turn.
#[async_trait::async_trait]
pub trait Roller: Send {
    /// Waits for this seat's decision on `player`'s turn.
    async fn next_command(&mut self, player: &Player) -> Result<Command>;

    /// Returns the roller's display name.
    fn name(&self) -> &str;
}
