//! Core module - pure game logic with no external dependencies
//!
//! This module contains the board state machine, the piece provider, the
//! move-selection strategies, and the autoplay loop. It has zero
//! dependencies on UI, networking, or I/O.

pub mod autoplay;
pub mod board;
pub mod brain;
pub mod pieces;
pub mod rng;

// Re-export commonly used types
pub use autoplay::{Action, Game};
pub use board::Board;
pub use brain::{Brain, DefaultBrain, Move};
pub use pieces::{Piece, PieceProvider};
pub use rng::{PieceBag, SimpleRng};
