use chess_core::{Board, GameStatus};
use chess_engine::{ChessAI, EngineConfig, PositionEvaluator, Searcher};

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

#[test]
fn back_rank_capture_mates() {
    // Re8xe1 wins the rook and mates the king boxed in on h1
    let position = board("4r1k1/5ppp/8/8/8/8/6PP/4R2K b - - 0 1");
    let searcher = Searcher::new(PositionEvaluator::default());

    for depth in 1..=3 {
        let result = searcher.find_best_move(depth, &position, true).unwrap().unwrap();
        assert_eq!(result.best_move.to_string(), "e8e1", "depth {depth}");

        let after = position.apply_move(result.best_move).unwrap();
        assert!(after.is_checkmate());
    }
}

#[test]
fn white_removes_the_back_rank_threat() {
    let position = board("6k1/5ppp/8/8/8/8/5PPP/3r2RK w - - 0 1");
    // White is the one boxed in; the loose rook on d1 should be taken
    let result = ChessAI::new(2).unwrap().get_move(&position).unwrap();
    assert_eq!(result.best_move.to_string(), "g1d1");
}

#[test]
fn opening_move_develops_a_knight_or_center_pawn() {
    let start = Board::new();
    let result = ChessAI::new(2).unwrap().get_move(&start).unwrap();

    assert!(start.legal_moves().contains(&result.best_move));
    let chosen = result.best_move.to_string();
    assert!(["e2e4", "d2d4", "b1c3", "g1f3"].contains(&chosen.as_str()), "chose {chosen}");
    assert!(result.score.abs() <= 10.0);
}

#[test]
fn repeated_searches_agree() {
    let position = board("r2qkb1r/ppp2ppp/2np1n2/4p3/2B1P1b1/2NP1N2/PPP2PPP/R1BQK2R w KQkq - 1 6");
    let ai = ChessAI::new(3).unwrap();
    let first = ai.get_move(&position).unwrap();
    for _ in 0..3 {
        assert_eq!(ai.get_move(&position).unwrap(), first);
    }

    let parallel = ChessAI::with_config(EngineConfig::new(3).unwrap().with_parallel_root(true)).unwrap();
    assert_eq!(parallel.get_move(&position).unwrap(), first);
}

#[test]
fn self_play_only_makes_legal_moves() {
    let ai = ChessAI::new(1).unwrap();
    let mut position = Board::new();

    for _ in 0..40 {
        if position.status().is_game_over() {
            break;
        }
        let result = ai.get_move(&position).unwrap();
        assert!(position.legal_moves().contains(&result.best_move));
        position.make_move(result.best_move).unwrap();
    }

    assert_ne!(position.to_fen(), Board::new().to_fen());
    if position.status().is_game_over() {
        assert!(matches!(
            ai.get_move(&position),
            Err(chess_engine::EngineError::GameOver(status)) if status != GameStatus::Ongoing
        ));
    }
}
