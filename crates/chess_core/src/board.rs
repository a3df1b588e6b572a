use std::fmt;
use crate::{Piece, Position, piece::{PieceType, Color}, Move, MoveType};
use crate::error::MoveError;

/// Square contents indexed `[row][col]`, row 0 being rank 8.
pub type Grid = [[Option<Piece>; 8]; 8];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
const KING_OFFSETS: [(i8, i8); 8] = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

// Halfmoves without a capture or pawn move before the fifty-move rule applies
const FIFTY_MOVE_HALFMOVES: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
}

impl CastlingRights {
    pub fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    fn clear(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    // A move touching a corner square either moves or captures that rook
    fn touch(&mut self, pos: Position) {
        match (pos.file, pos.rank) {
            (1, 1) => self.white_queenside = false,
            (8, 1) => self.white_kingside = false,
            (1, 8) => self.black_queenside = false,
            (8, 8) => self.black_kingside = false,
            _ => {}
        }
    }

    pub(crate) fn swapped(self) -> Self {
        Self {
            white_kingside: self.black_kingside,
            white_queenside: self.black_queenside,
            black_kingside: self.white_kingside,
            black_queenside: self.white_queenside,
        }
    }
}

/// Where a game stands after the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl GameStatus {
    pub fn is_game_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::InsufficientMaterial
                | GameStatus::ThreefoldRepetition
                | GameStatus::FiftyMoveRule
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "in progress"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "draw by stalemate"),
            GameStatus::InsufficientMaterial => write!(f, "draw by insufficient material"),
            GameStatus::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            GameStatus::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
        }
    }
}

// Everything two positions must share to count as a repetition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RepetitionKey {
    squares: Grid,
    turn: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Position>,
}

#[derive(Debug, Clone)]
pub struct Board {
    squares: Grid,
    current_turn: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Position>,
    halfmove_clock: u32,
    fullmove_number: u32,
    last_move: Option<Move>,
    // Positions since the last irreversible move, current one included
    history: Vec<RepetitionKey>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.castling_rights = CastlingRights::default();
        board.setup_initial_position();
        board.record_position();
        board
    }

    pub(crate) fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            current_turn: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            last_move: None,
            history: Vec::new(),
        }
    }

    fn setup_initial_position(&mut self) {
        // Setup pawns
        for file in 1..=8 {
            self.set_piece(Position { file, rank: 2 }, Some(Piece::new(PieceType::Pawn, Color::White)));
            self.set_piece(Position { file, rank: 7 }, Some(Piece::new(PieceType::Pawn, Color::Black)));
        }

        // Setup other pieces
        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &piece_type) in (1..=8).zip(piece_order.iter()) {
            self.set_piece(Position { file, rank: 1 }, Some(Piece::new(piece_type, Color::White)));
            self.set_piece(Position { file, rank: 8 }, Some(Piece::new(piece_type, Color::Black)));
        }
    }

    pub(crate) fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.row()][pos.col()] = piece;
    }

    pub(crate) fn set_state(
        &mut self,
        turn: Color,
        castling_rights: CastlingRights,
        en_passant: Option<Position>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) {
        self.current_turn = turn;
        self.castling_rights = castling_rights;
        self.en_passant = en_passant;
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
        self.history.clear();
        self.record_position();
    }

    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        self.squares[pos.row()][pos.col()].as_ref()
    }

    /// The 8x8 grid, row 0 being rank 8 and column 0 the a-file.
    pub fn squares(&self) -> &Grid {
        &self.squares
    }

    /// Occupied squares in grid order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get_piece(pos).map(|piece| (pos, *piece)))
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_square(&self) -> Option<Position> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.piece_type == PieceType::King && piece.color == color)
            .map(|(pos, _)| pos)
    }

    pub fn is_position_under_attack(&self, pos: Position, defending_color: Color) -> bool {
        is_attacked(&self.squares, pos, defending_color.opposite())
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_position(color) {
            Some(king_pos) => self.is_position_under_attack(king_pos, color),
            None => false,
        }
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.current_turn)
    }

    /// All legal moves for the side to move, in grid order of the moving piece.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, piece) in self.pieces() {
            if piece.color == self.current_turn {
                self.pseudo_legal_moves(from, piece, &mut moves);
            }
        }
        moves.retain(|&mv| self.keeps_king_safe(mv));
        moves
    }

    /// Legal moves of the piece standing on `pos`.
    pub fn get_valid_moves(&self, pos: Position) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(&piece) = self.get_piece(pos) {
            if piece.color == self.current_turn {
                self.pseudo_legal_moves(pos, piece, &mut moves);
                moves.retain(|&mv| self.keeps_king_safe(mv));
            }
        }
        moves
    }

    fn has_legal_moves(&self) -> bool {
        self.pieces()
            .filter(|(_, piece)| piece.color == self.current_turn)
            .any(|(from, piece)| {
                let mut moves = Vec::new();
                self.pseudo_legal_moves(from, piece, &mut moves);
                moves.into_iter().any(|mv| self.keeps_king_safe(mv))
            })
    }

    /// Finds the legal move written in coordinate notation (`e2e4`, `e7e8q`).
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveError> {
        let (from, to, promotion) = Move::parse_coordinate(text)
            .ok_or_else(|| MoveError::Notation(text.trim().to_string()))?;
        let requested = match promotion {
            Some(kind) => Move::with_promotion(from, to, kind),
            None => Move::new(from, to),
        };
        self.resolve(requested)
    }

    // Matches a move on squares and promotion against the legal moves,
    // filling in the move type the board knows about
    fn resolve(&self, requested: Move) -> Result<Move, MoveError> {
        let piece = *self.get_piece(requested.from).ok_or(MoveError::EmptySquare(requested.from))?;
        if piece.color != self.current_turn {
            return Err(MoveError::WrongTurn(piece.color));
        }

        self.get_valid_moves(requested.from)
            .into_iter()
            .find(|mv| mv.to == requested.to && mv.promotion == requested.promotion)
            .ok_or_else(|| {
                log::debug!("Rejected move {} on {}", requested, self.to_fen());
                MoveError::Illegal(requested)
            })
    }

    /// Validates and plays a move in place.
    pub fn make_move(&mut self, chess_move: Move) -> Result<(), MoveError> {
        let legal = self.resolve(chess_move)?;
        self.make_move_without_validation(legal);
        Ok(())
    }

    /// Returns the board after `chess_move`, leaving `self` untouched.
    pub fn apply_move(&self, chess_move: Move) -> Result<Board, MoveError> {
        let mut next = self.clone();
        next.make_move(chess_move)?;
        Ok(next)
    }

    fn make_move_without_validation(&mut self, chess_move: Move) {
        let piece = match self.get_piece(chess_move.from) {
            Some(&piece) => piece,
            None => return,
        };
        let is_capture = chess_move.move_type == MoveType::EnPassant || self.get_piece(chess_move.to).is_some();

        let rights_before = self.castling_rights;
        if piece.piece_type == PieceType::King {
            self.castling_rights.clear(piece.color);
        }
        self.castling_rights.touch(chess_move.from);
        self.castling_rights.touch(chess_move.to);

        place_move(&mut self.squares, chess_move);

        self.en_passant = None;
        if piece.piece_type == PieceType::Pawn && chess_move.from.rank.abs_diff(chess_move.to.rank) == 2 {
            self.en_passant = self.capturable_en_passant(chess_move.to, piece.color);
        }

        if piece.piece_type == PieceType::Pawn || is_capture {
            self.halfmove_clock = 0;
            self.history.clear();
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
            // Earlier positions had other castling rights and can never recur
            if self.castling_rights != rights_before {
                self.history.clear();
            }
        }
        if piece.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.current_turn = self.current_turn.opposite();
        self.last_move = Some(chess_move);
        self.record_position();
    }

    // The square behind a double-pushed pawn, kept only when an enemy pawn
    // stands ready to take it
    fn capturable_en_passant(&self, pawn_to: Position, pawn_color: Color) -> Option<Position> {
        let enemy_adjacent = [-1, 1].iter().any(|&df| {
            pawn_to
                .offset(df, 0)
                .and_then(|pos| self.get_piece(pos))
                .map_or(false, |p| p.piece_type == PieceType::Pawn && p.color != pawn_color)
        });
        if enemy_adjacent {
            pawn_to.offset(0, -pawn_color.pawn_direction())
        } else {
            None
        }
    }

    fn record_position(&mut self) {
        let key = self.repetition_key();
        self.history.push(key);
    }

    fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            squares: self.squares,
            turn: self.current_turn,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
        }
    }

    fn keeps_king_safe(&self, chess_move: Move) -> bool {
        let mut grid = self.squares;
        place_move(&mut grid, chess_move);
        let color = self.current_turn;
        match find_king(&grid, color) {
            Some(king_pos) => !is_attacked(&grid, king_pos, color.opposite()),
            None => true,
        }
    }

    fn pseudo_legal_moves(&self, from: Position, piece: Piece, moves: &mut Vec<Move>) {
        match piece.piece_type {
            PieceType::Pawn => self.pawn_moves(from, piece.color, moves),
            PieceType::Knight => self.step_moves(from, piece.color, &KNIGHT_OFFSETS, moves),
            PieceType::Bishop => self.slide_moves(from, piece.color, &BISHOP_DIRECTIONS, moves),
            PieceType::Rook => self.slide_moves(from, piece.color, &ROOK_DIRECTIONS, moves),
            PieceType::Queen => {
                self.slide_moves(from, piece.color, &ROOK_DIRECTIONS, moves);
                self.slide_moves(from, piece.color, &BISHOP_DIRECTIONS, moves);
            }
            PieceType::King => {
                self.step_moves(from, piece.color, &KING_OFFSETS, moves);
                self.castling_moves(from, piece.color, moves);
            }
        }
    }

    fn pawn_moves(&self, from: Position, color: Color, moves: &mut Vec<Move>) {
        let direction = color.pawn_direction();
        let start_rank = if color == Color::White { 2 } else { 7 };

        // Forward pushes
        if let Some(one) = from.offset(0, direction) {
            if self.get_piece(one).is_none() {
                push_pawn_move(Move::new(from, one), color, moves);
                if from.rank == start_rank {
                    if let Some(two) = from.offset(0, 2 * direction) {
                        if self.get_piece(two).is_none() {
                            moves.push(Move::new(from, two));
                        }
                    }
                }
            }
        }

        // Diagonal captures, en passant included
        for df in [-1, 1] {
            let Some(target) = from.offset(df, direction) else { continue };
            match self.get_piece(target) {
                Some(victim) if victim.color != color => {
                    push_pawn_move(Move::capture(from, target), color, moves);
                }
                Some(_) => {}
                None if self.en_passant == Some(target) => moves.push(Move::en_passant(from, target)),
                None => {}
            }
        }
    }

    fn step_moves(&self, from: Position, color: Color, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in offsets {
            let Some(to) = from.offset(df, dr) else { continue };
            match self.get_piece(to) {
                None => moves.push(Move::new(from, to)),
                Some(other) if other.color != color => moves.push(Move::capture(from, to)),
                Some(_) => {}
            }
        }
    }

    fn slide_moves(&self, from: Position, color: Color, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in directions {
            let mut current = from;
            while let Some(to) = current.offset(df, dr) {
                match self.get_piece(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(other) => {
                        if other.color != color {
                            moves.push(Move::capture(from, to));
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }

    fn castling_moves(&self, from: Position, color: Color, moves: &mut Vec<Move>) {
        let rank = color.back_rank();
        if from != (Position { file: 5, rank }) || self.is_in_check(color) {
            return;
        }
        let rook = Piece::new(PieceType::Rook, color);

        if self.castling_rights.kingside(color)
            && self.get_piece(Position { file: 8, rank }) == Some(&rook)
            && self.path_is_safe(color, rank, &[6, 7], &[6, 7])
        {
            moves.push(Move::castle(from, Position { file: 7, rank }));
        }

        if self.castling_rights.queenside(color)
            && self.get_piece(Position { file: 1, rank }) == Some(&rook)
            && self.path_is_safe(color, rank, &[2, 3, 4], &[3, 4])
        {
            moves.push(Move::castle(from, Position { file: 3, rank }));
        }
    }

    // Squares between king and rook must be empty; the ones the king
    // crosses must not be attacked
    fn path_is_safe(&self, color: Color, rank: u8, empty_files: &[u8], safe_files: &[u8]) -> bool {
        empty_files.iter().all(|&file| self.get_piece(Position { file, rank }).is_none())
            && safe_files
                .iter()
                .all(|&file| !self.is_position_under_attack(Position { file, rank }, color))
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }

    pub fn has_insufficient_material(&self) -> bool {
        let minor_pieces: Vec<(Position, Piece)> = self
            .pieces()
            .filter(|(_, piece)| piece.piece_type != PieceType::King)
            .collect();

        if minor_pieces.iter().any(|(_, piece)| {
            matches!(piece.piece_type, PieceType::Pawn | PieceType::Rook | PieceType::Queen)
        }) {
            return false;
        }

        // King vs King, or a single minor piece
        if minor_pieces.len() <= 1 {
            return true;
        }

        // Only bishops left, all on squares of one color
        let all_bishops = minor_pieces.iter().all(|(_, piece)| piece.piece_type == PieceType::Bishop);
        let first_shade = minor_pieces[0].0.is_light();
        all_bishops && minor_pieces.iter().all(|(pos, _)| pos.is_light() == first_shade)
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.repetition_key();
        self.history.iter().filter(|key| **key == current).count() >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    pub fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.has_insufficient_material()
            || self.is_threefold_repetition()
            || self.is_fifty_move_draw()
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_legal_moves()
            || self.has_insufficient_material()
            || self.is_threefold_repetition()
            || self.is_fifty_move_draw()
    }

    pub fn status(&self) -> GameStatus {
        let in_check = self.is_check();
        if !self.has_legal_moves() {
            return if in_check {
                GameStatus::Checkmate { winner: self.current_turn.opposite() }
            } else {
                GameStatus::Stalemate
            };
        }

        if self.has_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if self.is_threefold_repetition() {
            GameStatus::ThreefoldRepetition
        } else if self.is_fifty_move_draw() {
            GameStatus::FiftyMoveRule
        } else if in_check {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }

    /// Colors swapped and ranks reversed: the same game seen from the other side.
    pub fn mirrored(&self) -> Board {
        let mut mirrored = Board::empty();
        for (pos, piece) in self.pieces() {
            mirrored.set_piece(pos.mirrored(), Some(piece.flipped()));
        }
        mirrored.set_state(
            self.current_turn.opposite(),
            self.castling_rights.swapped(),
            self.en_passant.map(Position::mirrored),
            self.halfmove_clock,
            self.fullmove_number,
        );
        mirrored
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for square in squares {
                match square {
                    Some(piece) => write!(f, " {}", piece)?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

fn push_pawn_move(chess_move: Move, color: Color, moves: &mut Vec<Move>) {
    let last_rank = color.opposite().back_rank();
    if chess_move.to.rank != last_rank {
        moves.push(chess_move);
        return;
    }
    for promotion in PieceType::PROMOTIONS {
        moves.push(Move { promotion: Some(promotion), ..chess_move });
    }
}

fn grid_piece(grid: &Grid, pos: Position) -> Option<Piece> {
    grid[pos.row()][pos.col()]
}

fn find_king(grid: &Grid, color: Color) -> Option<Position> {
    Position::all().find(|&pos| grid_piece(grid, pos) == Some(Piece::new(PieceType::King, color)))
}

// Moves the pieces of `chess_move` on a bare grid: the captured en passant
// pawn is removed, the castling rook follows the king, promotions swap kind
fn place_move(grid: &mut Grid, chess_move: Move) {
    let Some(piece) = grid[chess_move.from.row()][chess_move.from.col()].take() else { return };

    match chess_move.move_type {
        MoveType::EnPassant => {
            grid[chess_move.from.row()][chess_move.to.col()] = None;
        }
        MoveType::Castle => {
            let rank = chess_move.from.rank;
            let (rook_from, rook_to) = if chess_move.to.file == 7 { (8, 6) } else { (1, 4) };
            let rook_from = Position { file: rook_from, rank };
            let rook_to = Position { file: rook_to, rank };
            let rook = grid[rook_from.row()][rook_from.col()].take();
            grid[rook_to.row()][rook_to.col()] = rook;
        }
        MoveType::Normal | MoveType::Capture => {}
    }

    let final_piece = match chess_move.promotion {
        Some(promotion_type) => Piece::new(promotion_type, piece.color),
        None => piece,
    };
    grid[chess_move.to.row()][chess_move.to.col()] = Some(final_piece);
}

fn is_attacked(grid: &Grid, target: Position, by: Color) -> bool {
    let holds = |pos: Position, kinds: &[PieceType]| {
        grid_piece(grid, pos).map_or(false, |p| p.color == by && kinds.contains(&p.piece_type))
    };

    // Pawns attack diagonally forward, so look one rank behind the target
    let pawn_rank = -by.pawn_direction();
    if [-1, 1]
        .iter()
        .filter_map(|&df| target.offset(df, pawn_rank))
        .any(|pos| holds(pos, &[PieceType::Pawn]))
    {
        return true;
    }

    let steps = |offsets: &[(i8, i8)], kind: PieceType| {
        offsets
            .iter()
            .filter_map(|&(df, dr)| target.offset(df, dr))
            .any(|pos| holds(pos, &[kind]))
    };
    if steps(&KNIGHT_OFFSETS, PieceType::Knight) || steps(&KING_OFFSETS, PieceType::King) {
        return true;
    }

    let rays = |directions: &[(i8, i8)], kinds: &[PieceType]| {
        directions.iter().any(|&(df, dr)| {
            let mut current = target;
            while let Some(pos) = current.offset(df, dr) {
                if let Some(piece) = grid_piece(grid, pos) {
                    return piece.color == by && kinds.contains(&piece.piece_type);
                }
                current = pos;
            }
            false
        })
    };
    rays(&ROOK_DIRECTIONS, &[PieceType::Rook, PieceType::Queen])
        || rays(&BISHOP_DIRECTIONS, &[PieceType::Bishop, PieceType::Queen])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_fen(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    fn play(board: &mut Board, moves: &[&str]) {
        for text in moves {
            let mv = board.parse_move(text).unwrap();
            board.make_move(mv).unwrap();
        }
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = Board::new();
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.status(), GameStatus::Ongoing);
    }

    #[test]
    fn apply_move_leaves_original_untouched() {
        let board = Board::new();
        let mv = board.parse_move("e2e4").unwrap();
        let next = board.apply_move(mv).unwrap();

        assert!(board.get_piece(Position::from_algebraic("e2").unwrap()).is_some());
        assert!(next.get_piece(Position::from_algebraic("e4").unwrap()).is_some());
        assert_eq!(next.current_turn(), Color::Black);
        assert_eq!(board.current_turn(), Color::White);
    }

    #[test]
    fn rejects_moves_out_of_turn_and_illegal_moves() {
        let mut board = Board::new();
        assert_eq!(board.parse_move("e7e5"), Err(MoveError::WrongTurn(Color::Black)));
        assert!(matches!(board.parse_move("e2e5"), Err(MoveError::Illegal(_))));
        assert!(matches!(board.parse_move("e3e4"), Err(MoveError::EmptySquare(_))));
        assert!(matches!(board.parse_move("nonsense"), Err(MoveError::Notation(_))));
        let illegal = Move::new(Position::from_algebraic("a1").unwrap(), Position::from_algebraic("a5").unwrap());
        assert!(board.make_move(illegal).is_err());
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::new();
        play(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(board.is_checkmate());
        assert!(board.is_game_over());
        assert_eq!(board.status(), GameStatus::Checkmate { winner: Color::Black });
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn stalemate_is_a_draw() {
        let board = from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(board.is_stalemate());
        assert!(board.is_draw());
        assert_eq!(board.status(), GameStatus::Stalemate);
    }

    #[test]
    fn castling_moves_the_rook() {
        let mut board = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        play(&mut board, &["e1g1"]);
        assert_eq!(board.get_piece(Position::from_algebraic("f1").unwrap()).map(|p| p.piece_type), Some(PieceType::Rook));
        assert!(!board.castling_rights().white_kingside);
        assert!(!board.castling_rights().white_queenside);

        play(&mut board, &["e8c8"]);
        assert_eq!(board.get_piece(Position::from_algebraic("d8").unwrap()).map(|p| p.piece_type), Some(PieceType::Rook));
        assert!(board.get_piece(Position::from_algebraic("a8").unwrap()).is_none());
    }

    #[test]
    fn cannot_castle_through_attacked_square() {
        // Black rook on f8 covers f1
        let board = from_fen("5r1k/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(board.parse_move("e1g1").is_err());
    }

    #[test]
    fn en_passant_capture_removes_the_pawn() {
        let mut board = Board::new();
        play(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(board.en_passant_square(), Position::from_algebraic("d6"));
        let mv = board.parse_move("e5d6").unwrap();
        assert_eq!(mv.move_type, MoveType::EnPassant);
        board.make_move(mv).unwrap();
        assert!(board.get_piece(Position::from_algebraic("d5").unwrap()).is_none());
    }

    #[test]
    fn promotion_offers_four_pieces() {
        let board = from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
        let promotions = board.get_valid_moves(Position::from_algebraic("a7").unwrap());
        assert_eq!(promotions.len(), 4);
        let next = board.apply_move(board.parse_move("a7a8n").unwrap()).unwrap();
        assert_eq!(
            next.get_piece(Position::from_algebraic("a8").unwrap()),
            Some(&Piece::new(PieceType::Knight, Color::White))
        );
    }

    #[test]
    fn mistyped_promotion_is_a_notation_error() {
        let board = from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(board.parse_move("a7a8x"), Err(MoveError::Notation("a7a8x".to_string())));
        assert_eq!(board.parse_move("a7a8k"), Err(MoveError::Notation("a7a8k".to_string())));
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // Knight on e2 is pinned by the rook on e8
        let board = from_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(board.get_valid_moves(Position::from_algebraic("e2").unwrap()).is_empty());
    }

    #[test]
    fn insufficient_material_cases() {
        assert!(from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").has_insufficient_material());
        assert!(from_fen("8/8/8/4k3/8/8/8/2B1K3 w - - 0 1").has_insufficient_material());
        // Bishops on same colored squares
        assert!(from_fen("8/8/8/2b1k3/8/8/8/2B1K3 w - - 0 1").has_insufficient_material());
        assert!(!from_fen("8/8/8/3bk3/8/8/8/2B1K3 w - - 0 1").has_insufficient_material());
        assert!(!from_fen("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1").has_insufficient_material());
        assert_eq!(from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").status(), GameStatus::InsufficientMaterial);
    }

    #[test]
    fn knight_shuffle_repeats_three_times() {
        let mut board = Board::new();
        play(&mut board, &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"]);
        assert!(!board.is_threefold_repetition());
        play(&mut board, &["f6g8"]);
        assert!(board.is_threefold_repetition());
        assert!(board.is_game_over());
        assert_eq!(board.status(), GameStatus::ThreefoldRepetition);
    }

    #[test]
    fn fifty_move_rule() {
        let board = from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 100 80");
        assert!(board.is_fifty_move_draw());
        assert_eq!(board.status(), GameStatus::FiftyMoveRule);
        assert!(!from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 99 80").is_fifty_move_draw());
    }

    #[test]
    fn counters_saturate_instead_of_overflowing() {
        let mut board = from_fen(&format!("4k3/8/8/8/8/8/8/R3K3 b - - {} {}", u32::MAX, u32::MAX));
        let mv = board.parse_move("e8d7").unwrap();
        board.make_move(mv).unwrap();
        assert_eq!(board.halfmove_clock(), u32::MAX);
        assert_eq!(board.fullmove_number(), u32::MAX);
        assert!(board.is_fifty_move_draw());
    }

    #[test]
    fn losing_castling_rights_resets_repetition_history() {
        let mut board = Board::new();
        for text in ["g1f3", "g8f6", "h1g1", "h8g8"] {
            let mv = board.parse_move(text).unwrap();
            board.make_move(mv).unwrap();
        }
        assert_eq!(board.history.len(), 1);

        for text in ["g1h1", "g8h8", "h1g1", "h8g8", "g1h1", "g8h8"] {
            let mv = board.parse_move(text).unwrap();
            board.make_move(mv).unwrap();
        }
        // This placement also occurred before h1g1, when both sides could still castle
        assert!(!board.is_threefold_repetition());
    }

    #[test]
    fn mirrored_board_swaps_sides() {
        let mut board = Board::new();
        play(&mut board, &["e2e4"]);
        let mirrored = board.mirrored();
        assert_eq!(mirrored.current_turn(), Color::White);
        assert_eq!(
            mirrored.get_piece(Position::from_algebraic("e5").unwrap()),
            Some(&Piece::new(PieceType::Pawn, Color::Black))
        );
        assert_eq!(mirrored.mirrored().to_fen(), board.to_fen());
    }
}
