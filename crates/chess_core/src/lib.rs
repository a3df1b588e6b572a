// Chess rules: board state, legal moves, and game termination
pub mod board;
pub mod error;
pub mod fen;
pub mod piece;
pub mod position;
pub mod moves;

// Re-export main types for convenience
pub use board::{Board, CastlingRights, GameStatus, Grid};
pub use error::{FenError, MoveError, PieceError};
pub use fen::STARTING_FEN;
pub use piece::{Piece, Color, PieceType};
pub use position::Position;
pub use moves::{Move, MoveType};
