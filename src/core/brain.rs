//! Brain module - move selection for autoplay
//!
//! A [`Brain`] is consulted once per downward tick when autoplay is active.
//! It is a pure query: it reads the board only through the board's query
//! interface and never mutates it, so it can safely be called against a
//! board whose pending piece has just been undone.

use crate::core::board::Board;
use crate::core::pieces::{Piece, MAX_PIECE_SPAN};

use arrayvec::ArrayVec;

/// A chosen placement: the piece in its target orientation, the target
/// leftmost column, and the heuristic score it was picked on (lower is
/// better).
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub piece: Piece,
    pub x: i32,
    pub score: f64,
}

/// Move-selection strategy.
///
/// `height_limit` caps the landing position: placements whose top would
/// cross it are not considered. `previous` is the move chosen on the last
/// tick, offered as a hint; strategies are free to ignore it. Returning
/// `None` means "no move this tick" and the caller does nothing.
pub trait Brain {
    fn best_move(
        &self,
        board: &Board,
        piece: &Piece,
        height_limit: usize,
        previous: Option<&Move>,
    ) -> Option<Move>;
}

/// Weight of a newly sealed hole in the default rating
const HOLE_WEIGHT: f64 = 8.0;

/// Weight of the tallest resulting column in the default rating
const MAX_HEIGHT_WEIGHT: f64 = 2.0;

/// Default heuristic brain.
///
/// Tries every distinct rotation at every legal column, lands each candidate
/// with [`Board::drop_height`], and rates the resulting column profile
/// without touching the board: the new heights are derived from the piece's
/// skirt and per-column tops, and a candidate is charged for every hole it
/// seals underneath itself. The lowest-rated candidate wins.
#[derive(Debug, Default)]
pub struct DefaultBrain;

impl DefaultBrain {
    /// Highest occupied row offset per column of the piece, plus one.
    fn tops(piece: &Piece) -> ArrayVec<i32, MAX_PIECE_SPAN> {
        let mut tops: ArrayVec<i32, MAX_PIECE_SPAN> = (0..piece.width()).map(|_| 0).collect();
        for &(dx, dy) in piece.body() {
            let col = dx as usize;
            if dy + 1 > tops[col] {
                tops[col] = dy + 1;
            }
        }
        tops
    }

    /// Rate landing `piece` with its bottom-left corner at `(x, y)`.
    fn rate(board: &Board, piece: &Piece, x: i32, y: i32) -> f64 {
        let tops = Self::tops(piece);
        let skirt = piece.skirt();

        let mut sum_heights = 0.0;
        let mut max_height = 0usize;
        let mut holes = 0i32;

        for col in 0..board.width() {
            // column_height cannot fail for col < width
            let old = board.column_height(col).unwrap_or(0);
            let mut new = old;
            let rel = col as i32 - x;
            if rel >= 0 && (rel as usize) < piece.width() {
                let i = rel as usize;
                new = new.max((y + tops[i]) as usize);
                // Gap between the old surface and the piece's underside
                // becomes unreachable.
                holes += (y + skirt[i] - old as i32).max(0);
            }
            sum_heights += new as f64;
            max_height = max_height.max(new);
        }

        sum_heights + MAX_HEIGHT_WEIGHT * max_height as f64 + HOLE_WEIGHT * holes as f64
    }
}

impl Brain for DefaultBrain {
    fn best_move(
        &self,
        board: &Board,
        piece: &Piece,
        height_limit: usize,
        _previous: Option<&Move>,
    ) -> Option<Move> {
        let mut best: Option<Move> = None;

        let mut rotations: ArrayVec<Piece, 4> = ArrayVec::new();
        let mut current = piece.clone();
        for _ in 0..4 {
            if rotations.iter().any(|p| p.same_shape(&current)) {
                break;
            }
            rotations.push(current.clone());
            current = current.rotated();
        }

        for rotation in &rotations {
            if rotation.width() > board.width() {
                continue;
            }
            for x in 0..=(board.width() - rotation.width()) as i32 {
                let Ok(y) = board.drop_height(rotation, x) else {
                    continue;
                };
                if y as usize + rotation.height() > height_limit {
                    continue;
                }
                let score = Self::rate(board, rotation, x, y);
                if best.as_ref().map_or(true, |b| score < b.score) {
                    best = Some(Move {
                        piece: rotation.clone(),
                        x,
                        score,
                    });
                }
            }
        }

        best
    }
}
