//! Shared types - piece kinds, rotations, placement results, and errors
//!
//! These are pure data structures with no dependencies on the board or the
//! autoplay loop, usable from any layer (core logic, strategies, tooling).
//!
//! # Coordinates
//!
//! The board is indexed as `(x, y)` with `x` growing left to right and `y`
//! growing **bottom to top**: `y = 0` is the floor row. Piece bodies use the
//! same convention, relative to the piece's bottom-left bounding corner.

/// Default playfield width in columns (standard Tetris)
pub const BOARD_WIDTH: usize = 10;

/// Default playfield height in rows (standard Tetris)
pub const BOARD_HEIGHT: usize = 20;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order (used by the bag generator)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states, clockwise cycle: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Outcome of [`Board::place`](crate::core::Board::place)
///
/// These are the only four outcomes of a placement attempt. The two failure
/// variants are expected gameplay results (e.g. game-over detection), not
/// errors: after either, the board is left partially mutated and the caller
/// recovers with `undo()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceResult {
    /// Regular placement, all cells filled
    Ok,
    /// Regular placement that filled at least one row completely
    RowFilled,
    /// Some cell of the piece fell outside the grid; placement stopped there
    OutOfBounds,
    /// Some cell of the piece collided with an existing block; placement
    /// stopped there
    Bad,
}

impl PlaceResult {
    /// True for the two success outcomes (`Ok`, `RowFilled`)
    pub fn is_success(&self) -> bool {
        matches!(self, PlaceResult::Ok | PlaceResult::RowFilled)
    }
}

/// Precondition violations - caller bugs, distinct from gameplay outcomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A fresh transaction was required but one is already open
    #[error("board has an uncommitted change; commit() or undo() first")]
    NotCommitted,

    /// Column index outside `[0, width)`
    #[error("column {x} out of range (width {width})")]
    ColumnOutOfRange { x: usize, width: usize },

    /// Row index outside `[0, height)`
    #[error("row {y} out of range (height {height})")]
    RowOutOfRange { y: usize, height: usize },

    /// Piece dropped at an x where it does not fit horizontally
    #[error("drop at x={x} puts a piece of width {piece_width} outside width {width}")]
    DropOutOfRange {
        x: i32,
        piece_width: usize,
        width: usize,
    },
}
