//! Game configuration.
//!
//! An in-process configuration object, optionally loaded from TOML.

use crate::board::{BoardTopology, STANDARD_SIZE};
use crate::player::{MAX_PLAYERS, MIN_PLAYERS, PlayerRegistry};
use crate::rules::GameRules;
use crate::shortcuts::{ShortcutEntry, ShortcutError, ShortcutTable, traditional_shortcuts};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Everything needed to set up a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Players at the table, 2 to 10.
    number_of_players: usize,

    /// How many of them are AI, counted from the first seat.
    number_of_ai_players: usize,

    /// Optional names, by seat. Missing names default to "Player N".
    player_names: Vec<String>,

    /// Rule parameters.
    rules: GameRules,

    /// Include the classic snakes and ladders.
    traditional_shortcuts: bool,

    /// Extra shortcuts, registered after the classic ones.
    shortcuts: Vec<ShortcutEntry>,

    /// Board rows.
    board_rows: u16,

    /// Board columns.
    board_cols: u16,

    /// AI "thinking" time before it rolls, in milliseconds.
    ai_think_delay_ms: u64,

    /// Animation time per square walked, in milliseconds.
    move_step_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            number_of_players: 2,
            number_of_ai_players: 0,
            player_names: Vec::new(),
            rules: GameRules::default(),
            traditional_shortcuts: true,
            shortcuts: Vec::new(),
            board_rows: STANDARD_SIZE,
            board_cols: STANDARD_SIZE,
            ai_think_delay_ms: 1000,
            move_step_ms: 150,
        }
    }
}

impl GameConfig {
    /// Creates a configuration for `players` seats, `ai` of them AI.
    #[instrument]
    pub fn new(players: usize, ai: usize) -> Self {
        Self {
            number_of_players: players,
            number_of_ai_players: ai,
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            players = config.number_of_players,
            ai = config.number_of_ai_players,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects player counts outside the supported range.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.number_of_players) {
            return Err(ConfigError::new(format!(
                "number_of_players must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.number_of_players
            )));
        }
        if self.number_of_ai_players > self.number_of_players {
            return Err(ConfigError::new(format!(
                "number_of_ai_players ({}) exceeds number_of_players ({})",
                self.number_of_ai_players, self.number_of_players
            )));
        }
        if self.player_names.len() > self.number_of_players {
            return Err(ConfigError::new(format!(
                "{} player names given for {} players",
                self.player_names.len(),
                self.number_of_players
            )));
        }
        let board = self.topology();
        self.rules
            .validate(&board)
            .map_err(|e| ConfigError::new(e.to_string()))?;
        Ok(())
    }

    /// A generated board of the configured size.
    pub fn topology(&self) -> BoardTopology {
        let mut board = BoardTopology::new(self.board_rows, self.board_cols);
        board.generate();
        board
    }

    /// Players for the configured seats.
    pub fn registry(&self) -> PlayerRegistry {
        PlayerRegistry::with_roster(
            self.number_of_players,
            self.number_of_ai_players,
            &self.player_names,
        )
    }

    /// Every configured shortcut, classic ones first.
    pub fn shortcut_entries(&self) -> Vec<ShortcutEntry> {
        let mut entries = if self.traditional_shortcuts {
            traditional_shortcuts()
        } else {
            Vec::new()
        };
        entries.extend(self.shortcuts.iter().copied());
        entries
    }

    /// Builds the shortcut table, returning rejected entries as well.
    pub fn shortcut_table(&self, board: &BoardTopology) -> (ShortcutTable, Vec<ShortcutError>) {
        ShortcutTable::from_entries(self.shortcut_entries(), board, &self.rules)
    }

    /// AI thinking time.
    pub fn ai_think_delay(&self) -> Duration {
        Duration::from_millis(self.ai_think_delay_ms)
    }

    /// Animation time per square.
    pub fn move_step(&self) -> Duration {
        Duration::from_millis(self.move_step_ms)
    }

    /// Overrides the seat counts.
    pub fn with_players(mut self, players: usize, ai: usize) -> Self {
        self.number_of_players = players;
        self.number_of_ai_players = ai;
        self
    }

    /// Turns the classic layout on or off.
    pub fn with_traditional_shortcuts(mut self, enabled: bool) -> Self {
        self.traditional_shortcuts = enabled;
        self
    }

    /// Adds a shortcut.
    pub fn with_shortcut(mut self, entry: ShortcutEntry) -> Self {
        self.shortcuts.push(entry);
        self
    }

    /// Replaces the rules.
    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    /// Removes animation and thinking delays.
    pub fn without_delays(mut self) -> Self {
        self.ai_think_delay_ms = 0;
        self.move_step_ms = 0;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
