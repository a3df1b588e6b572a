mod cli;
mod session;

use std::io::{self, BufRead, Write};
use anyhow::Context;
use chess_core::{Board, GameStatus};
use chess_engine::{ChessAI, EngineConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Input, HELP};
use crate::session::GameSession;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let board = match &args.fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("invalid FEN {fen:?}"))?,
        None => Board::new(),
    };
    let config = EngineConfig::new(args.depth)?.with_parallel_root(args.parallel);
    let ai = ChessAI::with_config(config)?;

    let mut session = GameSession::new(board, ai, args.human_color.into());
    let stdin = io::stdin();
    run(&mut session, stdin.lock(), io::stdout().lock())
}

fn run(session: &mut GameSession, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    writeln!(out, "You play {}. Type `help` for commands.", session.human())?;
    writeln!(out, "{}", session.board())?;

    let mut lines = input.lines();
    loop {
        let status = session.status();
        if status.is_game_over() {
            writeln!(out, "Game over: {}", status)?;
            return Ok(());
        }

        if session.is_computer_turn() {
            let result = session.play_computer()?;
            writeln!(out, "Computer plays {} (score {:.1})", result.best_move, result.score)?;
            writeln!(out, "{}", session.board())?;
            if session.status() == GameStatus::Check {
                writeln!(out, "Check!")?;
            }
            continue;
        }

        write!(out, "{} to move> ", session.board().current_turn())?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;

        match Input::parse(&line) {
            Input::Empty => {}
            Input::Quit => return Ok(()),
            Input::Help => writeln!(out, "{}", HELP)?,
            Input::Board => writeln!(out, "{}", session.board())?,
            Input::Fen => writeln!(out, "{}", session.board().to_fen())?,
            Input::Moves => writeln!(out, "{}", session.human_moves().join(" "))?,
            Input::Move(text) => match session.play_human(text) {
                Ok(_) => writeln!(out, "{}", session.board())?,
                Err(err) => writeln!(out, "{}", err)?,
            },
        }
    }
}
