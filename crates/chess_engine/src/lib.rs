pub mod ai;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod rules;
pub mod search;

pub use ai::{ChessAI, SearchTask};
pub use config::EngineConfig;
pub use error::{EngineError, SearchError};
pub use evaluation::{evaluate_position, piece_value, Evaluator, Negated, PieceSquareTables, PositionEvaluator};
pub use rules::GameState;
pub use search::{search_best_move, SearchResult, Searcher, SCORE_BOUND};
