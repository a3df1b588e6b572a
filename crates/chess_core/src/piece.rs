use std::fmt;
use crate::error::PieceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    // Direction pawns of this color advance in, measured in ranks
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    // Pieces a pawn may promote to, strongest first
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase letter used by FEN and coordinate notation.
    pub fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Result<Self, PieceError> {
        match c.to_ascii_lowercase() {
            'p' => Ok(PieceType::Pawn),
            'n' => Ok(PieceType::Knight),
            'b' => Ok(PieceType::Bishop),
            'r' => Ok(PieceType::Rook),
            'q' => Ok(PieceType::Queen),
            'k' => Ok(PieceType::King),
            _ => {
                log::debug!("Unknown piece kind {:?}", c);
                Err(PieceError::UnknownKind(c))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn to_fen_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_fen_char(c: char) -> Result<Self, PieceError> {
        let piece_type = PieceType::from_char(c).map_err(|err| {
            log::error!("Position data holds an unknown piece kind {:?}", c);
            err
        })?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Ok(Self::new(piece_type, color))
    }

    // Same kind, other side
    pub fn flipped(self) -> Self {
        Self::new(self.piece_type, self.color.opposite())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_letters_carry_color() {
        let white_knight = Piece::from_fen_char('N').unwrap();
        assert_eq!(white_knight, Piece::new(PieceType::Knight, Color::White));
        assert_eq!(Piece::from_fen_char('q').unwrap().color, Color::Black);
        assert_eq!(white_knight.to_fen_char(), 'N');
        assert_eq!(white_knight.flipped().to_fen_char(), 'n');
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(Piece::from_fen_char('x'), Err(PieceError::UnknownKind('x')));
    }
}
