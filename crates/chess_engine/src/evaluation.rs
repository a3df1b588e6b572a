use chess_core::{Board, Piece, piece::{PieceType, Color}};
use once_cell::sync::Lazy;

// Material values, one pawn being worth 10 units
const PAWN_VALUE: f64 = 10.0;
const KNIGHT_VALUE: f64 = 30.0;
const BISHOP_VALUE: f64 = 30.0;
const ROOK_VALUE: f64 = 50.0;
const QUEEN_VALUE: f64 = 90.0;
const KING_VALUE: f64 = 900.0;   // Outweighs any combination of other material

/// Positional bonuses indexed `[row][col]`, row 0 being rank 8.
pub type Table = [[f64; 8]; 8];

// Piece-square tables from White's point of view, written top-down so that
// the first row is the 8th rank. Black uses the rank-mirrored copy.

// Pawns: push towards promotion, occupy the center, keep the king shield
const PAWN_TABLE: Table = [
    [0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0],
    [5.0,  5.0,  5.0,  5.0,  5.0,  5.0,  5.0,  5.0],
    [1.0,  1.0,  2.0,  3.0,  3.0,  2.0,  1.0,  1.0],
    [0.5,  0.5,  1.0,  2.5,  2.5,  1.0,  0.5,  0.5],
    [0.0,  0.0,  0.0,  2.0,  2.0,  0.0,  0.0,  0.0],
    [0.5, -0.5, -1.0,  0.0,  0.0, -1.0, -0.5,  0.5],
    [0.5,  1.0,  1.0, -2.0, -2.0,  1.0,  1.0,  0.5],
    [0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0],
];

// Knights: strong in the center, poor on the rim
const KNIGHT_TABLE: Table = [
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
    [-4.0, -2.0,  0.0,  0.0,  0.0,  0.0, -2.0, -4.0],
    [-3.0,  0.0,  1.0,  1.5,  1.5,  1.0,  0.0, -3.0],
    [-3.0,  0.5,  1.5,  2.0,  2.0,  1.5,  0.5, -3.0],
    [-3.0,  0.0,  1.5,  2.0,  2.0,  1.5,  0.0, -3.0],
    [-3.0,  0.5,  1.0,  1.5,  1.5,  1.0,  0.5, -3.0],
    [-4.0, -2.0,  0.0,  0.5,  0.5,  0.0, -2.0, -4.0],
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
];

const BISHOP_TABLE: Table = [
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
    [-1.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -1.0],
    [-1.0,  0.0,  0.5,  1.0,  1.0,  0.5,  0.0, -1.0],
    [-1.0,  0.5,  0.5,  1.0,  1.0,  0.5,  0.5, -1.0],
    [-1.0,  0.0,  1.0,  1.0,  1.0,  1.0,  0.0, -1.0],
    [-1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0, -1.0],
    [-1.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.5, -1.0],
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
];

// Rooks: the 7th rank, and central files on the back rank
const ROOK_TABLE: Table = [
    [ 0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0],
    [ 0.5,  1.0,  1.0,  1.0,  1.0,  1.0,  1.0,  0.5],
    [-0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5],
    [-0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5],
    [-0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5],
    [-0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5],
    [-0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5],
    [ 0.0,  0.0,  0.0,  0.5,  0.5,  0.0,  0.0,  0.0],
];

const QUEEN_TABLE: Table = [
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
    [-1.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -1.0],
    [-1.0,  0.0,  0.5,  0.5,  0.5,  0.5,  0.0, -1.0],
    [-0.5,  0.0,  0.5,  0.5,  0.5,  0.5,  0.0, -0.5],
    [ 0.0,  0.0,  0.5,  0.5,  0.5,  0.5,  0.0, -0.5],
    [-1.0,  0.5,  0.5,  0.5,  0.5,  0.5,  0.0, -1.0],
    [-1.0,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0, -1.0],
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
];

// King (middle game): stay home behind the pawns, castled if possible
const KING_TABLE: Table = [
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-2.0, -3.0, -3.0, -4.0, -4.0, -3.0, -3.0, -2.0],
    [-1.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -1.0],
    [ 2.0,  2.0,  0.0,  0.0,  0.0,  0.0,  2.0,  2.0],
    [ 2.0,  3.0,  1.0,  0.0,  0.0,  1.0,  3.0,  2.0],
];

static STANDARD_TABLES: Lazy<PieceSquareTables> = Lazy::new(|| {
    PieceSquareTables::from_white([
        PAWN_TABLE,
        KNIGHT_TABLE,
        BISHOP_TABLE,
        ROOK_TABLE,
        QUEEN_TABLE,
        KING_TABLE,
    ])
});

/// Scores a game state. Higher is better for White.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Flips the sign of the wrapped evaluator.
#[derive(Debug, Clone, Copy)]
pub struct Negated<E>(pub E);

impl<S, E: Evaluator<S>> Evaluator<S> for Negated<E> {
    fn evaluate(&self, state: &S) -> f64 {
        -self.0.evaluate(state)
    }
}

/// Piece-square tables for both sides, indexed by `PieceType::index`.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceSquareTables {
    white: [Table; 6],
    black: [Table; 6],
}

impl PieceSquareTables {
    /// The built-in tables, built once for the life of the process.
    pub fn standard() -> &'static PieceSquareTables {
        &STANDARD_TABLES
    }

    /// Builds both sides from White's tables; Black's are the rank-mirrored copies.
    pub fn from_white(white: [Table; 6]) -> Self {
        let black = white.map(mirror_ranks);
        Self { white, black }
    }

    pub fn table(&self, piece: Piece) -> &Table {
        let tables = match piece.color {
            Color::White => &self.white,
            Color::Black => &self.black,
        };
        &tables[piece.piece_type.index()]
    }
}

fn mirror_ranks(table: Table) -> Table {
    let mut mirrored = table;
    mirrored.reverse();
    mirrored
}

/// Material plus piece-square evaluation over a fixed set of tables.
#[derive(Debug, Clone, Copy)]
pub struct PositionEvaluator<'t> {
    tables: &'t PieceSquareTables,
}

impl Default for PositionEvaluator<'static> {
    fn default() -> Self {
        Self::new(PieceSquareTables::standard())
    }
}

impl<'t> PositionEvaluator<'t> {
    pub fn new(tables: &'t PieceSquareTables) -> Self {
        Self { tables }
    }

    /// Sum over all 64 squares of each piece's value, positive for White.
    pub fn evaluate_board(&self, board: &Board) -> f64 {
        let mut score = 0.0;
        for (row, squares) in board.squares().iter().enumerate() {
            for (col, square) in squares.iter().enumerate() {
                if let Some(piece) = square {
                    let value = self.absolute_value(*piece, row, col);
                    match piece.color {
                        Color::White => score += value,
                        Color::Black => score -= value,
                    }
                }
            }
        }
        score
    }

    fn absolute_value(&self, piece: Piece, row: usize, col: usize) -> f64 {
        piece_value(piece.piece_type) + self.tables.table(piece)[row][col]
    }
}

impl Evaluator<Board> for PositionEvaluator<'_> {
    fn evaluate(&self, board: &Board) -> f64 {
        self.evaluate_board(board)
    }
}

/// Evaluates a position with the standard tables, from White's perspective.
pub fn evaluate_position(board: &Board) -> f64 {
    PositionEvaluator::default().evaluate_board(board)
}

/// Returns the base material value of a piece
pub fn piece_value(piece_type: PieceType) -> f64 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate_position(&Board::new()), 0.0);
    }

    #[test]
    fn extra_queen_counts_material_and_square() {
        // Queen on d1 sits on a -0.5 square; both kings sit on 0.0 squares
        assert_eq!(evaluate_position(&board("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")), 89.5);
        assert_eq!(evaluate_position(&board("3qk3/8/8/8/8/8/8/4K3 w - - 0 1")), -89.5);
    }

    #[test]
    fn central_pawn_push_is_rewarded() {
        let start = Board::new();
        let e4 = start.apply_move(start.parse_move("e2e4").unwrap()).unwrap();
        // e2 is worth -2.0 and e4 is worth +2.0
        assert_eq!(evaluate_position(&e4), 4.0);
    }

    #[test]
    fn black_tables_mirror_white_tables() {
        let tables = PieceSquareTables::standard();
        let white_pawn = Piece::new(PieceType::Pawn, Color::White);
        let black_pawn = Piece::new(PieceType::Pawn, Color::Black);
        for row in 0..8 {
            assert_eq!(tables.table(white_pawn)[row], tables.table(black_pawn)[7 - row]);
        }
    }

    #[test]
    fn injected_tables_replace_positional_bonuses() {
        let flat = PieceSquareTables::from_white([[[0.0; 8]; 8]; 6]);
        let evaluator = PositionEvaluator::new(&flat);
        let position = board("4k3/8/8/8/8/8/4P3/3QK3 w - - 0 1");
        assert_eq!(evaluator.evaluate_board(&position), QUEEN_VALUE + PAWN_VALUE);
        assert_eq!(Negated(evaluator).evaluate(&position), -(QUEEN_VALUE + PAWN_VALUE));
    }

    #[test]
    fn evaluation_is_antisymmetric_under_color_flip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..40 {
            let mut position = Board::new();
            for _ in 0..30 {
                let moves = position.legal_moves();
                let Some(&mv) = moves.choose(&mut rng) else { break };
                position = position.apply_move(mv).unwrap();
                let score = evaluate_position(&position);
                assert_eq!(score, -evaluate_position(&position.mirrored()), "{}", position.to_fen());
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let position = board("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
        let first = evaluate_position(&position);
        assert_eq!(first, evaluate_position(&position.clone()));
    }
}
