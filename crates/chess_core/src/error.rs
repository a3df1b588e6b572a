use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("unknown piece kind '{0}'")]
    UnknownKind(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 space-separated fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 squares")]
    RankLength { rank: u8 },
    #[error(transparent)]
    Piece(#[from] PieceError),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("{0} king count must be exactly one")]
    KingCount(crate::Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("malformed move notation '{0}'")]
    Notation(String),
    #[error("no piece at {0}")]
    EmptySquare(crate::Position),
    #[error("it is not {0}'s turn")]
    WrongTurn(crate::Color),
    #[error("illegal move {0}")]
    Illegal(crate::Move),
}
