use std::error::Error;
use chess_core::GameStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u8),
    #[error("search was cancelled")]
    Cancelled,
    #[error("rules engine rejected a move it generated")]
    RulesEngine(#[source] Box<dyn Error + Send + Sync>),
}

impl SearchError {
    pub(crate) fn rules_engine<E: Error + Send + Sync + 'static>(err: E) -> Self {
        SearchError::RulesEngine(Box::new(err))
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("search depth must be between {min} and {max}, got {depth}")]
    InvalidDepth { depth: u8, min: u8, max: u8 },
    #[error("the game is already over: {0}")]
    GameOver(GameStatus),
    #[error("search was cancelled")]
    Cancelled,
    #[error("search task stopped without reporting a result")]
    Disconnected,
    #[error(transparent)]
    Search(SearchError),
}

impl From<SearchError> for EngineError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Cancelled => EngineError::Cancelled,
            other => EngineError::Search(other),
        }
    }
}
