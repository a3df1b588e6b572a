use chess_core::Color;
use chess_engine::config::DEFAULT_DEPTH;
use clap::{Parser, ValueEnum};

/// Play a game of chess against the computer from the terminal.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Plies the computer searches before moving.
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u8,

    /// Start from this position instead of the initial one.
    #[arg(short, long)]
    pub fen: Option<String>,

    /// The side you play.
    #[arg(long, value_enum, default_value_t = Side::White)]
    pub human_color: Side,

    /// Score the computer's candidate moves on all cores.
    #[arg(short, long, default_value = "false")]
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Empty,
    Quit,
    Moves,
    Fen,
    Board,
    Help,
    Move(&'a str),
}

impl<'a> Input<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Input::Empty,
            "quit" | "exit" | "q" => Input::Quit,
            "moves" => Input::Moves,
            "fen" => Input::Fen,
            "board" | "d" => Input::Board,
            "help" | "?" => Input::Help,
            text => Input::Move(text),
        }
    }
}

pub const HELP: &str = "\
Enter moves in coordinate notation, e.g. e2e4 or e7e8q.
Commands:
  moves   list your legal moves
  fen     print the position as FEN
  board   print the board
  quit    leave the game";
