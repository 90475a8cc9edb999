//! Board module - the transactional game grid
//!
//! The board is a `width x height` grid of boolean occupancy with `y = 0` at
//! the bottom. Alongside the raw grid it maintains derived statistics
//! (per-column heights, per-row fill counts, overall max height) that are
//! updated incrementally on every mutation, never by rescanning the whole
//! grid on the hot path.
//!
//! Mutations are transactional with a depth of exactly one: the first
//! mutation after a `commit()`/`undo()` snapshots the full state into a
//! pre-sized shadow buffer, and `undo()` restores that snapshot verbatim.
//! `place` followed by `clear_rows` stacks into the same transaction, so the
//! pair reverts as one unit.
//!
//! A failed placement (`OutOfBounds`/`Bad`) deliberately leaves the board
//! partially mutated; the recovery path is `undo()`, not an automatic
//! rollback inside `place`.

use std::fmt;

use crate::core::pieces::Piece;
use crate::types::{BoardError, PlaceResult};

/// The game board with one-level undo
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat occupancy grid, row-major (`y * width + x`)
    grid: Vec<bool>,
    /// `col_heights[x]` = highest occupied row in column x, plus one (0 if empty)
    col_heights: Vec<usize>,
    /// `row_widths[y]` = number of occupied cells in row y
    row_widths: Vec<usize>,
    /// `max(col_heights)`, cached
    max_height: usize,
    /// Transaction flag: true = stable, safe to start a new mutation
    committed: bool,

    // Shadow copy taken at the start of the current transaction.
    // Buffers are sized once here and reused; no allocation mid-transaction.
    saved_grid: Vec<bool>,
    saved_col_heights: Vec<usize>,
    saved_row_widths: Vec<usize>,
    saved_max_height: usize,
}

impl Board {
    /// Create an empty committed board of the given dimensions in blocks.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Self {
            width,
            height,
            grid: vec![false; width * height],
            col_heights: vec![0; width],
            row_widths: vec![0; height],
            max_height: 0,
            committed: true,
            saved_grid: vec![false; width * height],
            saved_col_heights: vec![0; width],
            saved_row_widths: vec![0; height],
            saved_max_height: 0,
        }
    }

    /// Width of the board in blocks
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the board in blocks
    pub fn height(&self) -> usize {
        self.height
    }

    /// Max column height present in the board, 0 when empty. O(1).
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// True when no transaction is open
    pub fn committed(&self) -> bool {
        self.committed
    }

    /// Height of column `x`: the y of its highest block, plus one. O(1).
    pub fn column_height(&self, x: usize) -> Result<usize, BoardError> {
        if x >= self.width {
            return Err(BoardError::ColumnOutOfRange {
                x,
                width: self.width,
            });
        }
        Ok(self.col_heights[x])
    }

    /// Number of filled blocks in row `y`. O(1).
    pub fn row_width(&self, y: usize) -> Result<usize, BoardError> {
        if y >= self.height {
            return Err(BoardError::RowOutOfRange {
                y,
                height: self.height,
            });
        }
        Ok(self.row_widths[y])
    }

    /// Occupancy of cell `(x, y)`.
    ///
    /// Out-of-bounds coordinates return `false` by contract rather than an
    /// error, so collision and skirt logic can probe past the edges without
    /// special cases.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }
        self.grid[y * self.width + x]
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// The y where `piece` comes to rest if dropped straight down with its
    /// leftmost column at `x`.
    ///
    /// Computed from the cached column heights and the piece's skirt in
    /// O(piece width), independent of the board height. Errs when the piece
    /// does not fit horizontally at `x`.
    pub fn drop_height(&self, piece: &Piece, x: i32) -> Result<i32, BoardError> {
        let piece_width = piece.width();
        if x < 0 || x as usize + piece_width > self.width {
            return Err(BoardError::DropOutOfRange {
                x,
                piece_width,
                width: self.width,
            });
        }
        let mut y = 0i32;
        for (i, &skirt) in piece.skirt().iter().enumerate() {
            y = y.max(self.col_heights[x as usize + i] as i32 - skirt);
        }
        Ok(y)
    }

    /// Copy the live state into the shadow buffers.
    fn backup(&mut self) {
        self.saved_grid.copy_from_slice(&self.grid);
        self.saved_col_heights.copy_from_slice(&self.col_heights);
        self.saved_row_widths.copy_from_slice(&self.row_widths);
        self.saved_max_height = self.max_height;
    }

    /// Attempt to add the body of a piece to the board with its origin at
    /// `(x, y)`.
    ///
    /// Requires a committed board; placing while a change is pending is a
    /// caller bug and returns [`BoardError::NotCommitted`]. On entry the
    /// current state is snapshotted and the transaction opened, so every
    /// outcome below is revertable with [`Board::undo`].
    ///
    /// Returns [`PlaceResult::RowFilled`] when a fully successful placement
    /// completed at least one row, [`PlaceResult::Ok`] otherwise. A cell
    /// outside the grid stops the placement with [`PlaceResult::OutOfBounds`];
    /// a cell already occupied stops it with [`PlaceResult::Bad`]. In both
    /// failure cases the board keeps the cells filled so far - call `undo()`
    /// to recover the pre-place state.
    pub fn place(&mut self, piece: &Piece, x: i32, y: i32) -> Result<PlaceResult, BoardError> {
        if !self.committed {
            return Err(BoardError::NotCommitted);
        }
        self.backup();
        self.committed = false;

        let mut result = PlaceResult::Ok;
        for &(dx, dy) in piece.body() {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || py < 0 || px as usize >= self.width || py as usize >= self.height {
                return Ok(PlaceResult::OutOfBounds);
            }
            let (px, py) = (px as usize, py as usize);
            let idx = self.idx(px, py);
            if self.grid[idx] {
                return Ok(PlaceResult::Bad);
            }

            self.grid[idx] = true;
            self.row_widths[py] += 1;
            if self.col_heights[px] < py + 1 {
                self.col_heights[px] = py + 1;
            }
            if self.max_height < py + 1 {
                self.max_height = py + 1;
            }
            if self.row_widths[py] == self.width {
                result = PlaceResult::RowFilled;
            }
        }

        self.sanity_check();
        Ok(result)
    }

    /// Delete every row that is filled all the way across, compacting the
    /// rows above downward. Returns the number of rows cleared (0 is valid).
    ///
    /// May be called with a transaction already open (it stacks onto the
    /// same snapshot, so a following `undo()` reverts the place and the
    /// clear together) or on a committed board (it opens one first). Either
    /// way the board is left uncommitted.
    pub fn clear_rows(&mut self) -> usize {
        if self.committed {
            self.backup();
            self.committed = false;
        }

        let old_max = self.max_height;
        let mut cleared = 0;
        let mut to = 0;

        // Two pointers: `from` reads every row up to the stack top, skipping
        // full ones; `to` receives each retained row.
        for from in 0..old_max {
            if self.row_widths[from] == self.width {
                cleared += 1;
                continue;
            }
            if from != to {
                self.row_widths[to] = self.row_widths[from];
                let src = from * self.width;
                let dst = to * self.width;
                self.grid.copy_within(src..src + self.width, dst);
            }
            to += 1;
        }

        if cleared > 0 {
            // Vacated band between the new top and the old stack top.
            for y in to..old_max {
                self.row_widths[y] = 0;
                let start = y * self.width;
                self.grid[start..start + self.width].fill(false);
            }
            // Compaction moved arbitrary rows, so column heights must be
            // refound by scanning down from the new top.
            for x in 0..self.width {
                self.col_heights[x] = 0;
                for y in (0..to).rev() {
                    if self.grid[self.idx(x, y)] {
                        self.col_heights[x] = y + 1;
                        break;
                    }
                }
            }
            self.max_height = old_max - cleared;
        }

        self.sanity_check();
        cleared
    }

    /// Revert the board to its state before the current transaction (up to
    /// one `place` plus one `clear_rows`) and mark it committed.
    ///
    /// Unconditional: with no transaction open this restores the last-taken
    /// snapshot again, which makes repeated calls without an intervening
    /// mutation idempotent.
    pub fn undo(&mut self) {
        self.grid.copy_from_slice(&self.saved_grid);
        self.col_heights.copy_from_slice(&self.saved_col_heights);
        self.row_widths.copy_from_slice(&self.saved_row_widths);
        self.max_height = self.saved_max_height;
        self.committed = true;
        self.sanity_check();
    }

    /// Finalize the current change; the board's state is untouched.
    pub fn commit(&mut self) {
        self.committed = true;
    }

    /// Recompute every statistic from the raw grid and assert it matches the
    /// cached values. Debug builds only; a mismatch is a bug in the
    /// incremental maintenance and panics.
    fn sanity_check(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let mut row_widths = vec![0usize; self.height];
        let mut col_heights = vec![0usize; self.width];
        let mut max_height = 0usize;
        for x in 0..self.width {
            for y in 0..self.height {
                if self.grid[self.idx(x, y)] {
                    row_widths[y] += 1;
                    col_heights[x] = y + 1;
                    if y + 1 > max_height {
                        max_height = y + 1;
                    }
                }
            }
        }

        assert_eq!(max_height, self.max_height, "sanity: max height is wrong");
        assert_eq!(row_widths, self.row_widths, "sanity: row widths are wrong");
        assert_eq!(
            col_heights, self.col_heights,
            "sanity: column heights are wrong"
        );
    }
}

impl fmt::Display for Board {
    /// Plain text dump: rows top to bottom, `+` filled, space empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            write!(f, "|")?;
            for x in 0..self.width {
                let c = if self.grid[self.idx(x, y)] { '+' } else { ' ' };
                write!(f, "{}", c)?;
            }
            writeln!(f, "|")?;
        }
        for _ in 0..self.width + 2 {
            write!(f, "-")?;
        }
        Ok(())
    }
}
