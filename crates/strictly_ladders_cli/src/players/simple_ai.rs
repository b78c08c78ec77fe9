//! AI player that rolls after a short pause.

use super::{Command, Roller};
use anyhow::Result;
use std::time::Duration;
use strictly_ladders::{Die, Player};
use tracing::debug;

/// AI that always rolls.
pub struct AiRoller {
    name: String,
    die: Die,
    think_delay: Duration,
}

impl AiRoller {
    /// Creates an AI roller that waits `think_delay` before each roll.
    pub fn new(name: impl Into<String>, die: Die, think_delay: Duration) -> Self {
        Self {
            name: name.into(),
            die,
            think_delay,
        }
    }
}

#[async_trait::async_trait]
impl Roller for AiRoller {
    async fn next_command(&mut self, player: &Player) -> Result<Command> {
        debug!(ai = %self.name, player = %player.id(), "AI rolling");

        // Simulate thinking
        tokio::time::sleep(self.think_delay).await;

        let value = self.die.roll();
        debug!(ai = %self.name, value, "AI rolled");
        Ok(Command::Roll(value))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_ladders::PlayerId;

    #[tokio::test]
    async fn test_ai_always_rolls_a_face() {
        let mut ai = AiRoller::new("Bot", Die::seeded(9), Duration::ZERO);
        let player = Player::new(PlayerId::new(2), "Bot", true);
        for _ in 0..20 {
            match ai.next_command(&player).await.expect("command") {
                Command::Roll(value) => assert!((1..=6).contains(&value)),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(ai.name(), "Bot");
    }
}
