// Fixed-depth minimax with alpha-beta pruning over any rules engine
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use log::{debug, trace};
use rayon::prelude::*;
use crate::error::SearchError;
use crate::evaluation::Evaluator;
use crate::rules::GameState;

// Initial alpha-beta window; no evaluation reaches these bounds
pub const SCORE_BOUND: f64 = 10_000.0;

/// The chosen root move and its backed-up score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    pub best_move: M,
    pub score: f64,
}

/// Minimax search driven by an evaluator.
///
/// Leaves are scored as the *negated* evaluation. With an evaluator that
/// favors White, that makes the maximizing side the one Black's advantage is
/// good for; wrap the evaluator in [`crate::Negated`] to flip it.
pub struct Searcher<E> {
    evaluator: E,
    stop: Option<Arc<AtomicBool>>,
    nodes: AtomicU64,
}

impl<E> Searcher<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            stop: None,
            nodes: AtomicU64::new(0),
        }
    }

    /// Checks `stop` at every node; once set, the search ends with
    /// [`SearchError::Cancelled`] and reports no move.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Nodes visited by the most recent root search.
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    fn is_stopped(&self) -> bool {
        self.stop
            .as_ref()
            .map_or(false, |stop| stop.load(Ordering::Relaxed))
    }

    /// Searches every root move to `depth` plies and returns the best one,
    /// or `None` when there are no legal moves.
    ///
    /// Ties keep the move generated first.
    pub fn find_best_move<S>(
        &self,
        depth: u8,
        state: &S,
        maximizing_player: bool,
    ) -> Result<Option<SearchResult<S::Move>>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        if depth == 0 {
            return Err(SearchError::InvalidDepth(depth));
        }
        self.nodes.store(0, Ordering::Relaxed);

        let mut scored = Vec::new();
        for mv in state.legal_moves() {
            let score = self.score_root_move(depth, state, &mv, maximizing_player)?;
            scored.push((mv, score));
        }

        Ok(self.pick_best(depth, scored))
    }

    /// Same result as [`Searcher::find_best_move`], with root moves scored
    /// on the rayon thread pool.
    pub fn find_best_move_parallel<S>(
        &self,
        depth: u8,
        state: &S,
        maximizing_player: bool,
    ) -> Result<Option<SearchResult<S::Move>>, SearchError>
    where
        S: GameState + Sync,
        S::Move: Send,
        E: Evaluator<S> + Sync,
    {
        if depth == 0 {
            return Err(SearchError::InvalidDepth(depth));
        }
        self.nodes.store(0, Ordering::Relaxed);

        // Root children each get the full window, so they are independent
        let scored = state
            .legal_moves()
            .into_par_iter()
            .map(|mv| {
                let score = self.score_root_move(depth, state, &mv, maximizing_player)?;
                Ok((mv, score))
            })
            .collect::<Result<Vec<_>, SearchError>>()?;

        Ok(self.pick_best(depth, scored))
    }

    fn score_root_move<S>(
        &self,
        depth: u8,
        state: &S,
        mv: &S::Move,
        maximizing_player: bool,
    ) -> Result<f64, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let child = state.apply_move(mv).map_err(SearchError::rules_engine)?;
        let score = self.minimax(depth - 1, &child, -SCORE_BOUND, SCORE_BOUND, !maximizing_player)?;
        trace!("Root move {:?} scored {}", mv, score);
        Ok(score)
    }

    // Strict comparison: the first of equally scored moves wins
    fn pick_best<M>(&self, depth: u8, scored: Vec<(M, f64)>) -> Option<SearchResult<M>> {
        let mut best: Option<SearchResult<M>> = None;
        for (mv, score) in scored {
            if best.as_ref().map_or(true, |current| score > current.score) {
                best = Some(SearchResult { best_move: mv, score });
            }
        }

        match &best {
            Some(result) => debug!(
                "Depth {} search visited {} nodes, best score {}",
                depth,
                self.nodes(),
                result.score
            ),
            None => debug!("No legal moves to search"),
        }
        best
    }

    /// Backed-up score of `state` searched `depth` plies deep.
    ///
    /// Leaves (depth 0 or game over) score `-evaluate(state)`. A maximizing
    /// node raises alpha, a minimizing node lowers beta, and remaining
    /// siblings are skipped as soon as `beta <= alpha`.
    pub fn minimax<S>(
        &self,
        depth: u8,
        state: &S,
        mut alpha: f64,
        mut beta: f64,
        maximizing_player: bool,
    ) -> Result<f64, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        if self.is_stopped() {
            return Err(SearchError::Cancelled);
        }
        self.nodes.fetch_add(1, Ordering::Relaxed);

        if depth == 0 || state.is_game_over() {
            return Ok(-self.evaluator.evaluate(state));
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            // The rules engine did not call it game over, but nothing can move
            return Ok(-self.evaluator.evaluate(state));
        }

        if maximizing_player {
            let mut best = f64::NEG_INFINITY;
            for mv in &moves {
                let child = state.apply_move(mv).map_err(SearchError::rules_engine)?;
                best = best.max(self.minimax(depth - 1, &child, alpha, beta, false)?);
                alpha = alpha.max(best);
                if beta <= alpha {
                    return Ok(best);
                }
            }
            Ok(best)
        } else {
            let mut best = f64::INFINITY;
            for mv in &moves {
                let child = state.apply_move(mv).map_err(SearchError::rules_engine)?;
                best = best.min(self.minimax(depth - 1, &child, alpha, beta, true)?);
                beta = beta.min(best);
                if beta <= alpha {
                    return Ok(best);
                }
            }
            Ok(best)
        }
    }
}

/// Best move for `state` using `evaluator`, without cancellation.
pub fn search_best_move<S, E>(
    evaluator: E,
    depth: u8,
    state: &S,
    maximizing_player: bool,
) -> Result<Option<SearchResult<S::Move>>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    Searcher::new(evaluator).find_best_move(depth, state, maximizing_player)
}
