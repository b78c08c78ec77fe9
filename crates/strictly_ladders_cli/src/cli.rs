//! Command-line interface for strictly_ladders.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use strictly_ladders::GameConfig;
use tracing::{debug, instrument};

/// Strictly Ladders - snakes and ladders in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_ladders")]
#[command(about = "Snakes and ladders against friends or AI players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of players (2-10)
    #[arg(short, long)]
    pub players: Option<usize>,

    /// Number of AI players, taking the first seats
    #[arg(long)]
    pub ai: Option<usize>,

    /// Seed for reproducible dice
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the classic snakes and ladders (`--traditional false` for a bare board)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub traditional: Option<bool>,

    /// Skip animation and AI thinking delays
    #[arg(long)]
    pub fast: bool,
}

impl Cli {
    /// Loads the configuration file, if any, and applies flag overrides.
    #[instrument(skip(self))]
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if self.players.is_some() || self.ai.is_some() {
            let players = self.players.unwrap_or(*config.number_of_players());
            let ai = self.ai.unwrap_or(*config.number_of_ai_players());
            config = config.with_players(players, ai);
        }
        if let Some(traditional) = self.traditional {
            config = config.with_traditional_shortcuts(traditional);
        }
        if self.fast {
            config = config.without_delays();
        }

        config.validate()?;
        debug!(?config, "Resolved game configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["strictly_ladders", "--players", "4", "--ai", "3", "--fast"]);
        let config = cli.game_config().expect("valid flags");
        assert_eq!(*config.number_of_players(), 4);
        assert_eq!(*config.number_of_ai_players(), 3);
        assert!(config.ai_think_delay().is_zero());
        assert!(config.move_step().is_zero());
    }

    #[test]
    fn test_bare_traditional_flag_enables_layout() {
        let cli = Cli::parse_from(["strictly_ladders", "--traditional"]);
        assert_eq!(cli.traditional, Some(true));

        let cli = Cli::parse_from(["strictly_ladders", "--traditional", "false"]);
        let config = cli.game_config().expect("valid flags");
        assert!(config.shortcut_entries().is_empty());
    }

    #[test]
    fn test_out_of_range_players_rejected() {
        let cli = Cli::parse_from(["strictly_ladders", "--players", "11"]);
        assert!(cli.game_config().is_err());

        let cli = Cli::parse_from(["strictly_ladders", "--ai", "3"]);
        assert!(cli.game_config().is_err());
    }
}
