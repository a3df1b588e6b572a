use std::time::Duration;
use chess_core::{Board, Color, GameStatus, Move, MoveError};
use chess_engine::{ChessAI, EngineError, SearchResult};
use log::{debug, info, warn};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("it is not your turn, {0} is to move")]
    NotYourTurn(Color),
    #[error("the game is over: {0}")]
    GameOver(GameStatus),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// A game between a human on one side and the engine on the other.
pub struct GameSession {
    board: Board,
    ai: ChessAI,
    human: Color,
}

impl GameSession {
    pub fn new(board: Board, ai: ChessAI, human: Color) -> Self {
        Self { board, ai, human }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    pub fn is_computer_turn(&self) -> bool {
        self.board.current_turn() != self.human && !self.status().is_game_over()
    }

    /// The human's legal moves in coordinate notation, or nothing when it is
    /// the computer's turn.
    pub fn human_moves(&self) -> Vec<String> {
        if self.board.current_turn() != self.human {
            return Vec::new();
        }
        self.board.legal_moves().iter().map(Move::to_coordinate).collect()
    }

    /// Parses and plays the human's move.
    pub fn play_human(&mut self, text: &str) -> Result<Move, SessionError> {
        self.ensure_ongoing()?;
        if self.board.current_turn() != self.human {
            return Err(SessionError::NotYourTurn(self.board.current_turn()));
        }

        let chess_move = self.board.parse_move(text).map_err(|err| {
            warn!("Rejected human move {:?}: {}", text.trim(), err);
            err
        })?;
        self.board.make_move(chess_move)?;
        info!("Human plays {}", chess_move);
        Ok(chess_move)
    }

    /// Lets the engine think in the background, then plays its move.
    pub fn play_computer(&mut self) -> Result<SearchResult<Move>, SessionError> {
        self.ensure_ongoing()?;
        if self.board.current_turn() == self.human {
            return Err(SessionError::NotYourTurn(self.human));
        }

        let task = self.ai.spawn_search(self.board.clone());
        let result = loop {
            match task.wait_timeout(POLL_INTERVAL) {
                Some(result) => break result?,
                None => debug!("Engine still searching at depth {}", self.ai.config().depth),
            }
        };

        self.board.make_move(result.best_move)?;
        Ok(result)
    }

    fn ensure_ongoing(&self) -> Result<(), SessionError> {
        let status = self.status();
        if status.is_game_over() {
            return Err(SessionError::GameOver(status));
        }
        Ok(())
    }
}
