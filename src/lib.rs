//! Transactional Tetris board core
//!
//! The abstract state of a falling-block puzzle board: a grid of
//! filled/empty cells with operations to test where a piece would land,
//! commit a placement, clear completed rows, and roll back the most recent
//! uncommitted change. No pixels, no input handling, no frame clock.
//!
//! The board keeps derived statistics (per-column heights, per-row fill
//! counts, overall max height) consistent with the raw grid under every
//! mutation, updating them incrementally instead of rescanning the grid.
//! Mutations form one-level transactions: a snapshot is taken at the first
//! mutation after a commit and [`Board::undo`](core::Board::undo) restores
//! it exactly.
//!
//! # Example
//!
//! ```
//! use tetris_board::core::{Board, Piece};
//! use tetris_board::types::{PieceKind, PlaceResult};
//!
//! let mut board = Board::new(10, 20);
//! let piece = Piece::new(PieceKind::L);
//!
//! // Land the piece at column 3 and keep it.
//! let y = board.drop_height(&piece, 3).unwrap();
//! assert_eq!(board.place(&piece, 3, y), Ok(PlaceResult::Ok));
//! board.commit();
//!
//! // Speculate a second placement, then roll it back.
//! let y = board.drop_height(&piece, 3).unwrap();
//! board.place(&piece, 3, y).unwrap();
//! board.undo();
//! assert_eq!(board.max_height(), 2);
//! ```
//!
//! The [`core::Game`] loop drives a falling piece over the board using the
//! same undo contract, optionally steered by a [`core::Brain`] strategy one
//! rotation or column step per tick.

pub mod core;
pub mod types;

pub use crate::core::{Action, Board, Brain, DefaultBrain, Game, Move, Piece, PieceBag};
pub use crate::types::{BoardError, PlaceResult};
