//! Autoplay module - the tick-driven game loop with brain integration
//!
//! [`Game`] owns a [`Board`] and the currently falling piece. Between ticks
//! the piece is provisionally placed on the board inside an open
//! transaction; every movement tick lifts it with `undo()`, re-places it at
//! the candidate position, and only commits once the piece lands.
//!
//! With brain mode on, each downward tick first consults the
//! [`Brain`] strategy against the lifted board and nudges the piece at most
//! one rotation and one column toward the chosen target, converging over
//! several ticks rather than teleporting.

use crate::core::board::Board;
use crate::core::brain::{Brain, DefaultBrain, Move};
use crate::core::pieces::{Piece, PieceProvider};

/// One movement command applied on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Rotate,
    Down,
}

/// The falling piece and its board position (origin = bottom-left corner)
#[derive(Debug, Clone)]
struct ActivePiece {
    piece: Piece,
    x: i32,
    y: i32,
}

/// Tick-driven game over one board, with optional autoplay.
///
/// The piece source is injected so tests and drivers control the sequence;
/// the brain defaults to [`DefaultBrain`] and stays idle until
/// [`Game::set_brain_mode`] turns it on.
pub struct Game<P: PieceProvider> {
    board: Board,
    pieces: P,
    active: Option<ActivePiece>,
    brain: Box<dyn Brain>,
    brain_mode: bool,
    /// Best move remembered from the previous consultation
    best_move: Option<Move>,
    pieces_played: u32,
    rows_cleared: u32,
    game_over: bool,
}

impl<P: PieceProvider> Game<P> {
    /// Create a game over an empty board with the given piece source
    pub fn new(width: usize, height: usize, pieces: P) -> Self {
        Self {
            board: Board::new(width, height),
            pieces,
            active: None,
            brain: Box::new(DefaultBrain),
            brain_mode: false,
            best_move: None,
            pieces_played: 0,
            rows_cleared: 0,
            game_over: false,
        }
    }

    /// Replace the move-selection strategy
    pub fn set_brain(&mut self, brain: Box<dyn Brain>) {
        self.brain = brain;
        self.best_move = None;
    }

    /// Toggle autoplay
    pub fn set_brain_mode(&mut self, on: bool) {
        self.brain_mode = on;
    }

    pub fn brain_mode(&self) -> bool {
        self.brain_mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_played(&self) -> u32 {
        self.pieces_played
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// The falling piece, when one is active
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref().map(|a| &a.piece)
    }

    /// Position of the falling piece's bottom-left corner
    pub fn active_position(&self) -> Option<(i32, i32)> {
        self.active.as_ref().map(|a| (a.x, a.y))
    }

    /// The move chosen on the last brain consultation
    pub fn best_move(&self) -> Option<&Move> {
        self.best_move.as_ref()
    }

    /// Advance the game by one action.
    ///
    /// With no piece active, any tick spawns the next piece. A `Down` tick
    /// that cannot move the piece further lands it: rows are cleared, the
    /// transaction committed, and the next tick spawns again.
    pub fn tick(&mut self, action: Action) {
        if self.game_over {
            return;
        }
        if self.active.is_none() {
            self.spawn();
            return;
        }
        if action == Action::Down && self.brain_mode {
            self.consult_brain();
        }
        self.step(action);
    }

    /// Lift the pending piece, ask the strategy for a target, and issue at
    /// most one rotate and one shift toward it.
    ///
    /// The board is left lifted (committed); the movement steps that follow
    /// re-open the transaction via their own `undo()`/`place` pair, which is
    /// a no-op `undo()` on an already-restored board.
    fn consult_brain(&mut self) {
        let Some(active) = self.active.clone() else {
            return;
        };

        self.board.undo();
        self.best_move = self.brain.best_move(
            &self.board,
            &active.piece,
            self.board.height(),
            self.best_move.as_ref(),
        );

        let target = self.best_move.as_ref().map(|m| (m.piece.clone(), m.x));
        if let Some((piece, x)) = target {
            if !piece.same_shape(&active.piece) {
                self.step(Action::Rotate);
            }
            if x > active.x {
                self.step(Action::Right);
            } else if x < active.x {
                self.step(Action::Left);
            }
        }
    }

    /// Apply one movement: lift the provisional placement, re-place at the
    /// candidate position, and on failure restore the prior placement. A
    /// failed `Down` means the piece landed.
    fn step(&mut self, action: Action) {
        let Some(active) = self.active.clone() else {
            return;
        };

        let mut piece = active.piece.clone();
        let mut x = active.x;
        let mut y = active.y;
        match action {
            Action::Left => x -= 1,
            Action::Right => x += 1,
            Action::Rotate => piece = piece.rotated(),
            Action::Down => y -= 1,
        }

        self.board.undo();
        match self.board.place(&piece, x, y) {
            Ok(result) if result.is_success() => {
                self.active = Some(ActivePiece { piece, x, y });
            }
            _ => {
                // Candidate rejected: put the piece back where it was.
                self.board.undo();
                let restored = self.board.place(&active.piece, active.x, active.y);
                debug_assert!(matches!(restored, Ok(r) if r.is_success()));
                if action == Action::Down {
                    self.land();
                }
            }
        }
    }

    /// The piece came to rest: clear rows inside the same transaction,
    /// commit, and hand over to the next spawn.
    fn land(&mut self) {
        self.rows_cleared += self.board.clear_rows() as u32;
        self.board.commit();
        self.active = None;
    }

    /// Place the next piece top-center in a fresh transaction. A placement
    /// that does not succeed is game over.
    fn spawn(&mut self) {
        let piece = self.pieces.next_piece();
        if piece.width() > self.board.width() || piece.height() > self.board.height() {
            self.game_over = true;
            return;
        }
        let x = ((self.board.width() - piece.width()) / 2) as i32;
        let y = (self.board.height() - piece.height()) as i32;

        match self.board.place(&piece, x, y) {
            Ok(result) if result.is_success() => {
                self.active = Some(ActivePiece { piece, x, y });
                self.best_move = None;
                self.pieces_played += 1;
            }
            _ => {
                // Spawn area blocked; restore the clean board and stop.
                self.board.undo();
                self.game_over = true;
            }
        }
    }
}
