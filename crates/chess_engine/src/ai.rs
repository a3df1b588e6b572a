use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use chess_core::{Board, Move, piece::Color};
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::{debug, info};
use crate::config::EngineConfig;
use crate::error::{EngineError, SearchError};
use crate::evaluation::{Evaluator, Negated, PieceSquareTables, PositionEvaluator};
use crate::search::{SearchResult, Searcher};

type TaskResult = Result<SearchResult<Move>, EngineError>;

/// The computer opponent: picks a move for whichever side is to move.
#[derive(Clone)]
pub struct ChessAI {
    config: EngineConfig,
    tables: &'static PieceSquareTables,
}

impl ChessAI {
    pub fn new(depth: u8) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::new(depth)?)
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(ChessAI {
            config,
            tables: PieceSquareTables::standard(),
        })
    }

    pub fn with_tables(mut self, tables: &'static PieceSquareTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Searches the position and returns the move to play, scored from the
    /// mover's point of view. A finished game is a caller error.
    pub fn get_move(&self, board: &Board) -> Result<SearchResult<Move>, EngineError> {
        self.search(board, None)
    }

    /// Runs [`ChessAI::get_move`] on the rayon pool so the caller's thread
    /// stays free. The result arrives through the returned task.
    pub fn spawn_search(&self, board: Board) -> SearchTask {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        let stop = Arc::new(AtomicBool::new(false));
        let ai = self.clone();
        let task_stop = Arc::clone(&stop);

        rayon::spawn(move || {
            let result = ai.search(&board, Some(task_stop));
            if sender.send(result).is_err() {
                debug!("Search finished after its task handle was dropped");
            }
        });

        SearchTask { receiver, stop }
    }

    fn search(&self, board: &Board, stop: Option<Arc<AtomicBool>>) -> TaskResult {
        let status = board.status();
        if status.is_game_over() {
            return Err(EngineError::GameOver(status));
        }

        // Leaves are scored as the negated evaluation, which already favors
        // Black; White searches with the evaluator flipped
        let evaluator = PositionEvaluator::new(self.tables);
        let result = match board.current_turn() {
            Color::Black => self.run(evaluator, board, stop)?,
            Color::White => self.run(Negated(evaluator), board, stop)?,
        };

        let result = result.ok_or(EngineError::GameOver(status))?;
        info!(
            "{} plays {} (depth {}, score {})",
            board.current_turn(),
            result.best_move,
            self.config.depth,
            result.score
        );
        Ok(result)
    }

    fn run<E>(
        &self,
        evaluator: E,
        board: &Board,
        stop: Option<Arc<AtomicBool>>,
    ) -> Result<Option<SearchResult<Move>>, SearchError>
    where
        E: Evaluator<Board> + Sync,
    {
        let mut searcher = Searcher::new(evaluator);
        if let Some(stop) = stop {
            searcher = searcher.with_stop_flag(stop);
        }

        if self.config.parallel_root {
            searcher.find_best_move_parallel(self.config.depth, board, true)
        } else {
            searcher.find_best_move(self.config.depth, board, true)
        }
    }
}

impl Default for ChessAI {
    fn default() -> Self {
        ChessAI {
            config: EngineConfig::default(),
            tables: PieceSquareTables::standard(),
        }
    }
}

/// A search running in the background.
pub struct SearchTask {
    receiver: Receiver<TaskResult>,
    stop: Arc<AtomicBool>,
}

impl SearchTask {
    /// Asks the search to stop. A stopped search reports
    /// [`EngineError::Cancelled`], never a half-searched move.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// The result, if the search has finished.
    pub fn try_result(&self) -> Option<TaskResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(EngineError::Disconnected)),
        }
    }

    /// Waits up to `timeout` for the result.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<TaskResult> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(EngineError::Disconnected)),
        }
    }

    /// Blocks until the search finishes.
    pub fn wait(self) -> TaskResult {
        self.receiver.recv().map_err(|_| EngineError::Disconnected)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::GameStatus;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn white_takes_a_hanging_queen() {
        let position = board("3q3k/8/8/8/8/8/8/3RK3 w - - 0 1");
        let ai = ChessAI::new(2).unwrap();
        let result = ai.get_move(&position).unwrap();
        assert_eq!(result.best_move.to_string(), "d1d8");
        assert!(result.score > 0.0);
    }

    #[test]
    fn black_takes_a_hanging_queen() {
        let position = board("3r3k/8/8/8/8/8/8/3Q3K b - - 0 1");
        let ai = ChessAI::new(2).unwrap();
        let result = ai.get_move(&position).unwrap();
        assert_eq!(result.best_move.to_string(), "d8d1");
        assert!(result.score > 0.0);
    }

    #[test]
    fn extreme_move_counters_are_searchable() {
        let position = board("4k3/8/8/8/8/8/8/R3K3 b - - 0 4294967295");
        let result = ChessAI::new(1).unwrap().get_move(&position).unwrap();
        let after = position.apply_move(result.best_move).unwrap();
        assert_eq!(after.fullmove_number(), u32::MAX);
    }

    #[test]
    fn finished_game_is_rejected() {
        let mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let result = ChessAI::default().get_move(&mated);
        assert!(matches!(
            result,
            Err(EngineError::GameOver(GameStatus::Checkmate { winner: Color::Black }))
        ));
    }

    #[test]
    fn invalid_depth_is_rejected() {
        assert!(ChessAI::new(0).is_err());
        let config = EngineConfig { depth: 9, parallel_root: true };
        assert!(ChessAI::with_config(config).is_err());
    }

    #[test]
    fn background_search_matches_direct_search() {
        let ai = ChessAI::new(2).unwrap();
        let position = Board::new();
        let direct = ai.get_move(&position).unwrap();
        let background = ai.spawn_search(position).wait().unwrap();
        assert_eq!(direct, background);
    }

    #[test]
    fn cancelled_background_search_reports_no_move() {
        let ai = ChessAI::new(5).unwrap();
        let task = ai.spawn_search(Board::new());
        task.cancel();
        assert!(matches!(task.wait(), Err(EngineError::Cancelled)));
    }
}
