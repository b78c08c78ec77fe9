//! Board topology: square numbering and the zig-zag layout.
//!
//! The engine never needs geometry. It only asks whether the board is
//! ready and whether a square exists; the row/column mapping is offered
//! for presentation layers that draw the board.

use crate::shortcuts::{ShortcutEntry, ShortcutError};
use tracing::{debug, info, instrument};

/// A square number. `0` is off the board, `1..=N` are on it.
pub type Square = u32;

/// The square a player occupies before rolling the starting value.
pub const OFF_BOARD: Square = 0;

/// Rows and columns of the traditional board.
pub const STANDARD_SIZE: u16 = 10;

/// Static board layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTopology {
    rows: u16,
    cols: u16,
    ready: bool,
}

impl BoardTopology {
    /// Creates a board of `rows` × `cols` squares. Zero dimensions become 1.
    ///
    /// The board is not ready until [`BoardTopology::generate`] is called.
    #[instrument]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            ready: false,
        }
    }

    /// A generated 10×10 board.
    pub fn standard() -> Self {
        let mut board = Self::new(STANDARD_SIZE, STANDARD_SIZE);
        board.generate();
        board
    }

    /// Marks the board as generated.
    #[instrument(skip(self), fields(rows = self.rows, cols = self.cols))]
    pub fn generate(&mut self) {
        self.ready = true;
        info!(squares = self.square_count(), "Board generated");
    }

    /// Marks the board as not generated.
    pub fn clear(&mut self) {
        self.ready = false;
        debug!("Board cleared");
    }

    /// Returns true once the board has been generated.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of rows.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Total number of squares.
    pub fn square_count(&self) -> Square {
        Square::from(self.rows) * Square::from(self.cols)
    }

    /// Returns true if `square` is on the board (`1..=N`).
    pub fn contains(&self, square: Square) -> bool {
        (1..=self.square_count()).contains(&square)
    }

    /// Maps a square to `(row, col)`, row 0 being the bottom row.
    ///
    /// Even rows run left to right, odd rows right to left.
    pub fn coordinates(&self, square: Square) -> Option<(u16, u16)> {
        if !self.contains(square) {
            return None;
        }
        let cols = Square::from(self.cols);
        let index = square - 1;
        let row = u16::try_from(index / cols).ok()?;
        let offset = u16::try_from(index % cols).ok()?;
        let col = if row % 2 == 0 {
            offset
        } else {
            self.cols - 1 - offset
        };
        Some((row, col))
    }

    /// Inverse of [`BoardTopology::coordinates`].
    pub fn square_at(&self, row: u16, col: u16) -> Option<Square> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let offset = if row % 2 == 0 { col } else { self.cols - 1 - col };
        Some(Square::from(row) * Square::from(self.cols) + Square::from(offset) + 1)
    }

    /// Rejects shortcut entries with an end off the board.
    pub fn validate_shortcut(&self, entry: &ShortcutEntry) -> Result<(), ShortcutError> {
        for square in [entry.start(), entry.end()] {
            if !self.contains(square) {
                return Err(ShortcutError::OffBoard {
                    square,
                    square_count: self.square_count(),
                });
            }
        }
        Ok(())
    }
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self::standard()
    }
}
