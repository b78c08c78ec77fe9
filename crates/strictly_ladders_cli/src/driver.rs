//! Game orchestration between the engine, the rollers and the mover.

use crate::console::ConsoleDice;
use crate::mover::{ChannelMover, MoverTask, spawn_mover};
use crate::players::{AiRoller, Command, HumanRoller, Roller, spawn_stdin_reader};
use crate::render;
use anyhow::{Context, Result, anyhow};
use strictly_ladders::{Die, GameConfig, Phase, TurnScheduler, TurnStep};
use tracing::{debug, info, instrument, warn};

/// Runs one table of snakes and ladders until a player quits.
pub struct Driver {
    game: TurnScheduler<ConsoleDice, ChannelMover>,
    mover: Option<MoverTask>,
    human: Option<Box<dyn Roller>>,
    ai: Box<dyn Roller>,
}

/// A die for the `offset`-th roller, reproducible when a seed is given.
fn die(seed: Option<u64>, offset: u64) -> Die {
    seed.map(|s| Die::seeded(s.wrapping_add(offset)))
        .unwrap_or_default()
}

impl Driver {
    /// Wires the engine to the terminal from a validated configuration.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig, seed: Option<u64>) -> Result<Self> {
        let (mover, task) = spawn_mover(config.move_step());
        let (game, rejected) = TurnScheduler::from_config(config, ConsoleDice, mover)?;
        for error in &rejected {
            println!("Skipping shortcut: {}", error);
        }

        let has_humans = config.number_of_ai_players() < config.number_of_players();
        let human: Option<Box<dyn Roller>> = if has_humans {
            Some(Box::new(HumanRoller::new(
                "Keyboard",
                die(seed, 0),
                spawn_stdin_reader(),
            )))
        } else {
            None
        };
        let ai = Box::new(AiRoller::new("Simple AI", die(seed, 1), config.ai_think_delay()));

        Ok(Self {
            game,
            mover: Some(task),
            human,
            ai,
        })
    }

    /// Runs the game loop.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting game orchestration");
        self.game.start_game()?;
        self.show_board();

        loop {
            self.show_events();
            match self.game.phase() {
                Phase::Idle => {
                    self.game.start_game()?;
                }
                Phase::AwaitingRoll => {
                    if !self.take_turn().await? {
                        break;
                    }
                }
                Phase::ResolvingMove => {
                    self.await_arrival().await?;
                }
                Phase::GameOver => {
                    if !self.offer_rematch().await? {
                        break;
                    }
                }
            }
        }

        if let Some(task) = self.mover.take() {
            task.shutdown();
        }
        info!("Game orchestration finished");
        Ok(())
    }

    /// Asks the current seat for a command. Returns `false` on quit.
    async fn take_turn(&mut self) -> Result<bool> {
        let id = self.game.request_roll()?;
        let player = self
            .game
            .current_player()
            .cloned()
            .context("No current player")?;

        let roller = if player.is_ai() {
            &mut self.ai
        } else {
            self.human
                .as_mut()
                .ok_or_else(|| anyhow!("No keyboard for {}", player.name()))?
        };
        debug!(player = %id, roller = roller.name(), "Waiting for command");

        match roller.next_command(&player).await? {
            Command::Roll(value) => {
                self.game.submit_roll(value)?;
                Ok(true)
            }
            Command::Reset => {
                self.restart()?;
                Ok(true)
            }
            Command::Quit => Ok(false),
        }
    }

    async fn await_arrival(&mut self) -> Result<()> {
        let task = self.mover.as_mut().context("Mover already shut down")?;
        let epoch = task
            .arrivals
            .recv()
            .await
            .context("Mover task stopped")?;

        match self.game.on_arrived(epoch)? {
            TurnStep::Ignored => warn!(%epoch, "Arrival from an earlier game"),
            step => debug!(?step, "Move resolved"),
        }
        self.show_board();
        Ok(())
    }

    /// Returns `true` if the table wants another game.
    async fn offer_rematch(&mut self) -> Result<bool> {
        let Some(human) = self.human.as_mut() else {
            return Ok(false);
        };
        let Some(winner) = self
            .game
            .winner()
            .and_then(|id| self.game.players().iter().find(|p| p.id() == id))
            .cloned()
        else {
            return Ok(false);
        };

        println!("r starts a new game, q quits");
        loop {
            match human.next_command(&winner).await? {
                Command::Reset => break,
                Command::Quit => return Ok(false),
                Command::Roll(_) => println!("r starts a new game, q quits"),
            }
        }
        self.restart()?;
        Ok(true)
    }

    fn restart(&mut self) -> Result<()> {
        self.game.reset_game();
        self.game.drain_events();
        println!("New game");
        self.game.start_game()?;
        self.show_board();
        Ok(())
    }

    fn show_events(&mut self) {
        for event in self.game.drain_events() {
            if let Some(line) = render::event_line(&event, self.game.players()) {
                println!("{}", line);
            }
        }
    }

    fn show_board(&self) {
        print!(
            "{}",
            render::board(self.game.board(), self.game.shortcuts(), self.game.players())
        );
    }
}
