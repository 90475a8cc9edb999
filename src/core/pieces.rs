//! Pieces module - piece bodies, bounding boxes, and skirts
//!
//! A [`Piece`] is a small set of occupied cell offsets in bottom-origin
//! coordinates, plus everything the board needs to test and land it fast:
//! the bounding width/height and the **skirt** - for each column of the
//! piece, the lowest occupied row offset. `Board::drop_height` rests the
//! skirt on the cached column heights in O(piece width).
//!
//! The seven tetromino spawn shapes are built in; rotation is a coordinate
//! transform of the body, so custom bodies rotate the same way.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Max cells in a piece body
pub const MAX_PIECE_CELLS: usize = 8;

/// Max columns a piece may span
pub const MAX_PIECE_SPAN: usize = 8;

/// Occupied cell offset relative to the piece origin, `(dx, dy)` with `dy`
/// growing upward
pub type CellOffset = (i32, i32);

/// Spawn (North) bodies for the seven tetrominoes
fn spawn_body(kind: PieceKind) -> &'static [CellOffset] {
    match kind {
        PieceKind::I => &[(0, 0), (1, 0), (2, 0), (3, 0)],
        PieceKind::O => &[(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::T => &[(0, 0), (1, 0), (2, 0), (1, 1)],
        PieceKind::S => &[(0, 0), (1, 0), (1, 1), (2, 1)],
        PieceKind::Z => &[(1, 0), (2, 0), (0, 1), (1, 1)],
        PieceKind::J => &[(0, 0), (1, 0), (2, 0), (0, 1)],
        PieceKind::L => &[(0, 0), (1, 0), (2, 0), (2, 1)],
    }
}

/// A piece body with derived placement data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: Option<PieceKind>,
    rotation: Rotation,
    /// Normalized body, sorted for canonical equality
    body: ArrayVec<CellOffset, MAX_PIECE_CELLS>,
    width: usize,
    height: usize,
    /// Lowest occupied row offset per column of the bounding box
    skirt: ArrayVec<i32, MAX_PIECE_SPAN>,
}

impl Piece {
    /// Create the spawn-orientation piece for a tetromino kind
    pub fn new(kind: PieceKind) -> Self {
        Self::build(Some(kind), Rotation::North, spawn_body(kind))
    }

    /// Create a piece from an arbitrary body.
    ///
    /// The body is normalized so its bounding box touches both axes.
    ///
    /// # Panics
    ///
    /// Panics on an empty body, a body larger than [`MAX_PIECE_CELLS`] cells
    /// or [`MAX_PIECE_SPAN`] columns, or one that leaves a bounding-box
    /// column unoccupied (the skirt would be undefined there).
    pub fn from_body(body: &[CellOffset]) -> Self {
        Self::build(None, Rotation::North, body)
    }

    fn build(kind: Option<PieceKind>, rotation: Rotation, cells: &[CellOffset]) -> Self {
        assert!(!cells.is_empty(), "piece body must not be empty");
        assert!(
            cells.len() <= MAX_PIECE_CELLS,
            "piece body exceeds {} cells",
            MAX_PIECE_CELLS
        );

        let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let mut body: ArrayVec<CellOffset, MAX_PIECE_CELLS> =
            cells.iter().map(|&(x, y)| (x - min_x, y - min_y)).collect();
        body.sort_unstable();

        let width = body.iter().map(|&(x, _)| x as usize + 1).max().unwrap_or(0);
        let height = body.iter().map(|&(_, y)| y as usize + 1).max().unwrap_or(0);
        assert!(width <= MAX_PIECE_SPAN, "piece spans more than {} columns", MAX_PIECE_SPAN);

        let mut skirt: ArrayVec<i32, MAX_PIECE_SPAN> = (0..width).map(|_| i32::MAX).collect();
        for &(x, y) in &body {
            let col = x as usize;
            if y < skirt[col] {
                skirt[col] = y;
            }
        }
        assert!(
            skirt.iter().all(|&s| s != i32::MAX),
            "piece must occupy every column of its bounding box"
        );

        Self {
            kind,
            rotation,
            body,
            width,
            height,
            skirt,
        }
    }

    /// The piece rotated 90° clockwise, normalized to the origin.
    ///
    /// Four rotations return a piece equal to the original; symmetric bodies
    /// repeat earlier.
    pub fn rotated(&self) -> Self {
        let max_x = self.width as i32 - 1;
        let rotated: ArrayVec<CellOffset, MAX_PIECE_CELLS> =
            self.body.iter().map(|&(x, y)| (y, max_x - x)).collect();
        Self::build(self.kind, self.rotation.rotate_cw(), &rotated)
    }

    /// Tetromino kind, when this piece came from the built-in set
    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    /// Rotation state relative to the body this piece was built from
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Occupied cell offsets, normalized and sorted
    pub fn body(&self) -> &[CellOffset] {
        &self.body
    }

    /// Bounding width in columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bounding height in rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Lowest occupied row offset per column, one entry per column
    pub fn skirt(&self) -> &[i32] {
        &self.skirt
    }

    /// True when the two pieces have the same cells (placement targets
    /// compare shapes, not rotation labels)
    pub fn same_shape(&self, other: &Piece) -> bool {
        self.body == other.body
    }
}

/// Source of falling pieces for a game loop.
///
/// Implementations must be queryable in O(piece size); the built-in
/// [`PieceBag`](crate::core::rng::PieceBag) draws from a shuffled
/// seven-piece bag.
pub trait PieceProvider {
    fn next_piece(&mut self) -> Piece;
}
