use std::error::Error;
use std::fmt::Debug;
use chess_core::{Board, Move, MoveError};

/// The rules engine as seen by the search: enumerate moves, apply them to a
/// copy, and tell when the game has ended.
pub trait GameState: Clone {
    type Move: Clone + Debug;
    type Error: Error + Send + Sync + 'static;

    /// Legal moves for the side to move, in a deterministic order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// The state after `mv`; `self` is left as it was.
    fn apply_move(&self, mv: &Self::Move) -> Result<Self, Self::Error>;

    fn is_game_over(&self) -> bool;
}

impl GameState for Board {
    type Move = Move;
    type Error = MoveError;

    fn legal_moves(&self) -> Vec<Move> {
        Board::legal_moves(self)
    }

    fn apply_move(&self, mv: &Move) -> Result<Board, MoveError> {
        Board::apply_move(self, *mv)
    }

    fn is_game_over(&self) -> bool {
        Board::is_game_over(self)
    }
}
