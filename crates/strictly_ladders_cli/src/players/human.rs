//! Human player that rolls from the keyboard.

use super::{Command, Roller};
use anyhow::Result;
use strictly_ladders::{Die, Player};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

/// Human seats sharing one keyboard.
pub struct HumanRoller {
    name: String,
    die: Die,
    input_rx: mpsc::UnboundedReceiver<String>,
}

impl HumanRoller {
    /// Creates a human roller reading lines from `input_rx`.
    pub fn new(name: impl Into<String>, die: Die, input_rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            name: name.into(),
            die,
            input_rx,
        }
    }
}

/// Maps one line of input to a command, rolling on a bare Enter.
fn parse_line(line: &str, die: &mut Die) -> Option<Command> {
    match line.trim() {
        "" => Some(Command::Roll(die.roll())),
        "r" | "R" => Some(Command::Reset),
        "q" | "Q" => Some(Command::Quit),
        _ => None,
    }
}

#[async_trait::async_trait]
impl Roller for HumanRoller {
    async fn next_command(&mut self, player: &Player) -> Result<Command> {
        while let Some(line) = self.input_rx.recv().await {
            if let Some(command) = parse_line(&line, &mut self.die) {
                debug!(player = %player.id(), ?command, "Human command");
                return Ok(command);
            }
            println!("Enter rolls, r resets, q quits");
        }

        anyhow::bail!("Input channel closed")
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Forwards stdin lines into a channel until input ends.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).is_err() {
                break;
            }
        }
        debug!("Stdin closed");
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_ladders::{DIE_FACES, PlayerId};

    #[test]
    fn test_parse_line() {
        let mut die = Die::seeded(3);
        assert!(matches!(
            parse_line("\n", &mut die),
            Some(Command::Roll(v)) if DIE_FACES.contains(&v)
        ));
        assert_eq!(parse_line("r", &mut die), Some(Command::Reset));
        assert_eq!(parse_line(" q ", &mut die), Some(Command::Quit));
        assert_eq!(parse_line("roll", &mut die), None);
    }

    #[tokio::test]
    async fn test_skips_unknown_input() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut human = HumanRoller::new("Keyboard", Die::seeded(1), rx);
        let player = Player::new(PlayerId::new(1), "Ada", false);

        tx.send("hello".to_string()).expect("send");
        tx.send("q".to_string()).expect("send");
        assert_eq!(human.next_command(&player).await.expect("command"), Command::Quit);

        drop(tx);
        assert!(human.next_command(&player).await.is_err());
    }
}
