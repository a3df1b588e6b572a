use std::fmt;
use crate::{Position, piece::PieceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub move_type: MoveType,
    pub promotion: Option<PieceType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Normal,
    Capture,
    EnPassant,
    Castle,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
            move_type: MoveType::Normal,
        }
    }

    pub fn capture(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
            move_type: MoveType::Capture,
        }
    }

    pub fn with_promotion(from: Position, to: Position, promotion: PieceType) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
            move_type: MoveType::Normal,
        }
    }

    pub fn en_passant(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
            move_type: MoveType::EnPassant,
        }
    }

    pub fn castle(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
            move_type: MoveType::Castle,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self.move_type, MoveType::Capture | MoveType::EnPassant)
    }

    /// Coordinate notation without the move type, e.g. `e7e8q`.
    pub fn to_coordinate(&self) -> String {
        self.to_string()
    }

    /// Splits `e2e4` / `e7e8q` into its squares and optional promotion.
    /// The move type is only known once matched against a board.
    pub fn parse_coordinate(text: &str) -> Option<(Position, Position, Option<PieceType>)> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return None;
        }

        let from = Position::from_algebraic(&text[0..2])?;
        let to = Position::from_algebraic(&text[2..4])?;
        let promotion = match text[4..].chars().next() {
            Some(c) => match PieceType::from_char(c).ok()? {
                PieceType::Pawn | PieceType::King => return None,
                kind => Some(kind),
            },
            None => None,
        };

        Some((from, to, promotion))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_notation() {
        let (from, to, promotion) = Move::parse_coordinate("e7e8q").unwrap();
        let mv = Move::with_promotion(from, to, promotion.unwrap());
        assert_eq!(mv.to_coordinate(), "e7e8q");
        assert_eq!(Move::parse_coordinate(" g1f3\n").unwrap().2, None);
    }

    #[test]
    fn rejects_bad_notation() {
        assert!(Move::parse_coordinate("e2").is_none());
        assert!(Move::parse_coordinate("e2e9").is_none());
        assert!(Move::parse_coordinate("e7e8k").is_none());
        assert!(Move::parse_coordinate("e7e8x").is_none());
    }
}
