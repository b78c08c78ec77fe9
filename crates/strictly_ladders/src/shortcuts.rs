//! Snake and ladder registry.
//!
//! Entries are validated when registered and resolved in chains after a
//! player lands on a square. Chains are bounded so that a misconfigured
//! cycle (10→20, 20→10) cannot stall the game.

use crate::board::{BoardTopology, Square};
use crate::rules::GameRules;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Direction of a shortcut.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKind {
    /// Moves the player up the board.
    Ladder,
    /// Moves the player down the board.
    Snake,
}

/// A single snake or ladder.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_new::new,
    derive_more::Display,
)]
#[display("{} {}->{}", kind, start, end)]
pub struct ShortcutEntry {
    start: Square,
    end: Square,
    kind: ShortcutKind,
}

impl ShortcutEntry {
    /// A ladder from `start` up to `end`.
    pub fn ladder(start: Square, end: Square) -> Self {
        Self::new(start, end, ShortcutKind::Ladder)
    }

    /// A snake from `start` down to `end`.
    pub fn snake(start: Square, end: Square) -> Self {
        Self::new(start, end, ShortcutKind::Snake)
    }

    /// Square the shortcut is triggered from.
    pub fn start(&self) -> Square {
        self.start
    }

    /// Square the shortcut leads to.
    pub fn end(&self) -> Square {
        self.end
    }

    /// Snake or ladder.
    pub fn kind(&self) -> ShortcutKind {
        self.kind
    }

    /// Ladders must go up, snakes must go down.
    pub fn is_valid(&self) -> bool {
        match self.kind {
            ShortcutKind::Ladder => self.end > self.start,
            ShortcutKind::Snake => self.end < self.start,
        }
    }
}

/// Reasons an entry is refused by the table.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ShortcutError {
    /// A ladder that does not go up, or a snake that does not go down.
    #[display("Invalid {}: start={}, end={}", kind, start, end)]
    InvalidDirection {
        /// Start square.
        start: Square,
        /// End square.
        end: Square,
        /// Declared kind.
        kind: ShortcutKind,
    },

    /// The start square already carries an entry.
    #[display("Square {} already has a snake or ladder", start)]
    DuplicateStart {
        /// Start square.
        start: Square,
    },

    /// One end of the entry lies outside the board.
    #[display("Square {} is off a board of {} squares", square, square_count)]
    OffBoard {
        /// The offending square.
        square: Square,
        /// Squares on the board.
        square_count: Square,
    },

    /// The entry starts on or beyond the winning square, or leads past it.
    #[display("Square {} is past the winning square {}", square, winning_square)]
    PastWinningSquare {
        /// The offending square.
        square: Square,
        /// Configured winning square.
        winning_square: Square,
    },

    /// The entry leads onto the winning square while shortcuts cannot win.
    #[display("Shortcut {}->{} ends on the winning square, but shortcuts cannot win", start, end)]
    EndsOnWinningSquare {
        /// Start square.
        start: Square,
        /// End square.
        end: Square,
    },
}

impl std::error::Error for ShortcutError {}

/// Result of following shortcuts from a landing square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainResolution {
    /// Square the player ends on.
    pub final_square: Square,
    /// Shortcuts taken, in order.
    pub hops: Vec<ShortcutEntry>,
    /// True when the chain was cut at the hop limit.
    pub limit_exceeded: bool,
}

impl ChainResolution {
    /// Returns true if at least one shortcut was taken.
    pub fn hopped(&self) -> bool {
        !self.hops.is_empty()
    }
}

/// Lookup table keyed by start square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutTable {
    entries: HashMap<Square, ShortcutEntry>,
}

impl ShortcutTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every entry that fits on `board` and is playable under
    /// `rules`, returning the table and the rejections. The first entry for
    /// a start square wins.
    #[instrument(skip(entries, board, rules))]
    pub fn from_entries(
        entries: impl IntoIterator<Item = ShortcutEntry>,
        board: &BoardTopology,
        rules: &GameRules,
    ) -> (Self, Vec<ShortcutError>) {
        let mut table = Self::new();
        let mut rejected = Vec::new();
        let mut total = 0usize;

        for entry in entries {
            total += 1;
            let result = board
                .validate_shortcut(&entry)
                .and_then(|()| rules.validate_shortcut(&entry))
                .and_then(|()| table.register(entry));
            if let Err(e) = result {
                warn!(%entry, error = %e, "Skipping shortcut");
                rejected.push(e);
            }
        }

        info!(total, valid = table.len(), "Initialized snakes and ladders");
        (table, rejected)
    }

    /// The traditional 100-square layout.
    pub fn traditional() -> Self {
        let (table, _) = Self::from_entries(
            traditional_shortcuts(),
            &BoardTopology::standard(),
            &GameRules::default(),
        );
        table
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// - [`ShortcutError::InvalidDirection`] if the direction rule is broken
    /// - [`ShortcutError::DuplicateStart`] if the start square is taken
    #[instrument(skip(self), fields(entry = %entry))]
    pub fn register(&mut self, entry: ShortcutEntry) -> Result<(), ShortcutError> {
        if !entry.is_valid() {
            return Err(ShortcutError::InvalidDirection {
                start: entry.start(),
                end: entry.end(),
                kind: entry.kind(),
            });
        }
        if self.entries.contains_key(&entry.start()) {
            return Err(ShortcutError::DuplicateStart {
                start: entry.start(),
            });
        }
        self.entries.insert(entry.start(), entry);
        debug!("Shortcut registered");
        Ok(())
    }

    /// Entry starting at `square`, if any.
    pub fn lookup(&self, square: Square) -> Option<ShortcutEntry> {
        self.entries.get(&square).copied()
    }

    /// Follows shortcuts from `square` until none applies, a self-loop is
    /// met, or `max_hops` shortcuts have been taken.
    ///
    /// Hitting the limit is not an error: the square reached so far is
    /// returned with `limit_exceeded` set.
    #[instrument(skip(self))]
    pub fn resolve_chain(&self, square: Square, max_hops: usize) -> ChainResolution {
        let mut current = square;
        let mut hops = Vec::new();

        while let Some(entry) = self.lookup(current) {
            if entry.end() == current {
                break;
            }
            if hops.len() >= max_hops {
                warn!(
                    start = square,
                    stopped_at = current,
                    max_hops,
                    "Shortcut chain limit exceeded"
                );
                return ChainResolution {
                    final_square: current,
                    hops,
                    limit_exceeded: true,
                };
            }
            debug!(%entry, "Following shortcut");
            hops.push(entry);
            current = entry.end();
        }

        ChainResolution {
            final_square: current,
            hops,
            limit_exceeded: false,
        }
    }

    /// Entries ordered by start square.
    pub fn entries(&self) -> Vec<ShortcutEntry> {
        let mut entries: Vec<_> = self.entries.values().copied().collect();
        entries.sort_by_key(ShortcutEntry::start);
        entries
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Snakes and ladders of the classic board.
pub fn traditional_shortcuts() -> Vec<ShortcutEntry> {
    vec![
        ShortcutEntry::ladder(2, 23),
        ShortcutEntry::ladder(8, 34),
        ShortcutEntry::ladder(20, 77),
        ShortcutEntry::ladder(32, 68),
        ShortcutEntry::ladder(41, 79),
        ShortcutEntry::ladder(74, 88),
        ShortcutEntry::ladder(82, 100),
        ShortcutEntry::snake(29, 9),
        ShortcutEntry::snake(38, 15),
        ShortcutEntry::snake(47, 5),
        ShortcutEntry::snake(53, 33),
        ShortcutEntry::snake(62, 37),
        ShortcutEntry::snake(86, 54),
        ShortcutEntry::snake(92, 70),
        ShortcutEntry::snake(97, 25),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_snake_rejected() {
        let mut table = ShortcutTable::new();
        let result = table.register(ShortcutEntry::snake(10, 30));
        assert!(matches!(
            result,
            Err(ShortcutError::InvalidDirection { start: 10, end: 30, .. })
        ));
        assert_eq!(table.lookup(10), None);
    }

    #[test]
    fn test_invalid_ladder_rejected() {
        let mut table = ShortcutTable::new();
        assert!(table.register(ShortcutEntry::ladder(40, 12)).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_start_first_wins() {
        let mut table = ShortcutTable::new();
        table.register(ShortcutEntry::ladder(4, 14)).expect("first entry");
        let result = table.register(ShortcutEntry::ladder(4, 60));
        assert_eq!(result, Err(ShortcutError::DuplicateStart { start: 4 }));
        assert_eq!(table.lookup(4), Some(ShortcutEntry::ladder(4, 14)));
    }

    #[test]
    fn test_resolve_chain_without_entry() {
        let table = ShortcutTable::traditional();
        let chain = table.resolve_chain(3, 10);
        assert_eq!(chain.final_square, 3);
        assert!(chain.hops.is_empty());
        assert!(!chain.limit_exceeded);
    }

    #[test]
    fn test_resolve_chain_follows_ladders() {
        let mut table = ShortcutTable::new();
        table.register(ShortcutEntry::ladder(2, 23)).expect("valid");
        table.register(ShortcutEntry::ladder(23, 50)).expect("valid");

        let chain = table.resolve_chain(2, 10);
        assert_eq!(chain.final_square, 50);
        assert_eq!(
            chain.hops,
            vec![ShortcutEntry::ladder(2, 23), ShortcutEntry::ladder(23, 50)]
        );
        assert!(!chain.limit_exceeded);
    }

    #[test]
    fn test_resolve_chain_cycle_is_bounded() {
        let mut table = ShortcutTable::new();
        table.register(ShortcutEntry::ladder(10, 20)).expect("valid");
        table.register(ShortcutEntry::snake(20, 10)).expect("valid");

        let chain = table.resolve_chain(10, 10);
        assert_eq!(chain.hops.len(), 10);
        assert!(chain.limit_exceeded);
        assert_eq!(chain.final_square, 10);
    }

    #[test]
    fn test_chain_exactly_at_limit_is_not_exceeded() {
        let mut table = ShortcutTable::new();
        table.register(ShortcutEntry::ladder(2, 23)).expect("valid");
        table.register(ShortcutEntry::ladder(23, 50)).expect("valid");

        let chain = table.resolve_chain(2, 2);
        assert_eq!(chain.final_square, 50);
        assert!(!chain.limit_exceeded);

        let chain = table.resolve_chain(2, 1);
        assert_eq!(chain.final_square, 23);
        assert!(chain.limit_exceeded);
    }

    #[test]
    fn test_traditional_layout_is_fully_valid() {
        let (table, rejected) = ShortcutTable::from_entries(
            traditional_shortcuts(),
            &BoardTopology::standard(),
            &GameRules::default(),
        );
        assert!(rejected.is_empty());
        assert_eq!(table.len(), 15);
        assert_eq!(table.entries().first().map(ShortcutEntry::start), Some(2));
    }

    #[test]
    fn test_from_entries_collects_rejections() {
        let entries = vec![
            ShortcutEntry::ladder(3, 40),
            ShortcutEntry::snake(3, 1),
            ShortcutEntry::snake(50, 60),
            ShortcutEntry::ladder(95, 140),
        ];
        let (table, rejected) =
            ShortcutTable::from_entries(entries, &BoardTopology::standard(), &GameRules::default());
        assert_eq!(table.len(), 1);
        assert_eq!(rejected.len(), 3);
    }

    #[test]
    fn test_from_entries_stays_below_short_winning_square() {
        let rules = GameRules {
            winning_square: 50,
            ..GameRules::default()
        };
        let (table, rejected) =
            ShortcutTable::from_entries(traditional_shortcuts(), &BoardTopology::standard(), &rules);

        assert!(table.lookup(20).is_none());
        assert!(table.lookup(53).is_none());
        assert_eq!(table.lookup(2), Some(ShortcutEntry::ladder(2, 23)));
        assert_eq!(table.lookup(47), Some(ShortcutEntry::snake(47, 5)));
        assert!(rejected.contains(&ShortcutError::PastWinningSquare {
            square: 77,
            winning_square: 50
        }));
        assert!(table.entries().iter().all(|e| e.start() < 50 && e.end() <= 50));
    }

    #[test]
    fn test_entry_display() {
        assert_eq!(ShortcutEntry::snake(29, 9).to_string(), "Snake 29->9");
    }
}
