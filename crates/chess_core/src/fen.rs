use crate::{Board, Piece, Position, board::CastlingRights, piece::{Color, PieceType}};
use crate::error::FenError;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parses Forsyth-Edwards Notation. The two move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingFields(fields.len()));
        }

        let mut board = Board::empty();
        parse_placement(&mut board, fields[0])?;

        for color in [Color::White, Color::Black] {
            let kings = board
                .pieces()
                .filter(|(_, piece)| *piece == Piece::new(PieceType::King, color))
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(color));
            }
        }

        let turn = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };
        let castling_rights = parse_castling(fields[2])?;
        let en_passant = match fields[3] {
            "-" => None,
            square => Some(Position::from_algebraic(square).ok_or_else(|| FenError::EnPassant(square.to_string()))?),
        };
        let halfmove_clock = parse_counter(fields.get(4).copied().unwrap_or("0"))?;
        let fullmove_number = parse_counter(fields.get(5).copied().unwrap_or("1"))?.max(1);

        board.set_state(turn, castling_rights, en_passant, halfmove_clock, fullmove_number);
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for (row, squares) in self.squares().iter().enumerate() {
            let mut empty = 0;
            for square in squares {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if row < 7 {
                placement.push('/');
            }
        }

        let turn = match self.current_turn() {
            Color::White => "w",
            Color::Black => "b",
        };

        let rights = self.castling_rights();
        let mut castling: String = [
            (rights.white_kingside, 'K'),
            (rights.white_queenside, 'Q'),
            (rights.black_kingside, 'k'),
            (rights.black_queenside, 'q'),
        ]
        .iter()
        .filter(|(allowed, _)| *allowed)
        .map(|(_, c)| *c)
        .collect();
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant_square()
            .map_or_else(|| "-".to_string(), |pos| pos.to_string());

        format!(
            "{} {} {} {} {} {}",
            placement,
            turn,
            castling,
            en_passant,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (row, rank_text) in ranks.iter().enumerate() {
        let rank = 8 - row as u8;
        let mut col = 0usize;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
            } else {
                let piece = Piece::from_fen_char(c)?;
                let pos = Position::from_grid(row, col).ok_or(FenError::RankLength { rank })?;
                board.set_piece(pos, Some(piece));
                col += 1;
            }
            if col > 8 {
                return Err(FenError::RankLength { rank });
            }
        }
        if col != 8 {
            return Err(FenError::RankLength { rank });
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => return Err(FenError::Castling(field.to_string())),
        }
    }
    Ok(rights)
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field.parse().map_err(|_| FenError::Counter(field.to_string()))
}
