//! Dice source that prompts on the terminal.

use strictly_ladders::{DiceSource, Player};
use tracing::debug;

/// Announces whose roll it is. The value itself comes from a roller.
#[derive(Debug, Default)]
pub struct ConsoleDice;

impl DiceSource for ConsoleDice {
    fn request_roll(&mut self, player: &Player) {
        debug!(player = %player.id(), ai = player.is_ai(), "Prompting for roll");
        let square = match player.current_square() {
            0 => "off the board".to_string(),
            square => format!("on {}", square),
        };
        if player.is_ai() {
            println!("{} ({}) is thinking...", player.name(), square);
        } else {
            println!(
                "{} ({}): press Enter to roll, r to reset, q to quit",
                player.name(),
                square
            );
        }
    }
}
