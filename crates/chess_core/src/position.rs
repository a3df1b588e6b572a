use std::fmt;

/// A square on the board, 1-based in both coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub rank: u8,  // 1-8
    pub file: u8,  // a-h (1-8)
}

impl Position {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return None,
        };

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        Some(Self {
            file: (file as u8) - b'a' + 1,
            rank: (rank as u8) - b'0',
        })
    }

    /// Grid coordinates: row 0 is rank 8, column 0 is the a-file.
    pub fn from_grid(row: usize, col: usize) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { file: col as u8 + 1, rank: 8 - row as u8 })
        } else {
            None
        }
    }

    pub fn row(self) -> usize {
        8 - self.rank as usize
    }

    pub fn col(self) -> usize {
        self.file as usize - 1
    }

    /// The square `(df, dr)` away, if it is still on the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Some(Self { file: file as u8, rank: rank as u8 })
        } else {
            None
        }
    }

    // Same file, rank reversed
    pub fn mirrored(self) -> Self {
        Self { file: self.file, rank: 9 - self.rank }
    }

    pub fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }

    /// All 64 squares in grid order: rank 8 first, a-file to h-file.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|row| (0..8).map(move |col| Position { file: col as u8 + 1, rank: 8 - row as u8 }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file - 1) as char, self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_round_trip() {
        let e4 = Position::from_algebraic("e4").unwrap();
        assert_eq!(e4, Position { file: 5, rank: 4 });
        assert_eq!(e4.to_string(), "e4");
        assert!(Position::from_algebraic("i1").is_none());
        assert!(Position::from_algebraic("a9").is_none());
        assert!(Position::from_algebraic("a10").is_none());
    }

    #[test]
    fn grid_orientation_puts_rank_eight_first() {
        let a8 = Position::from_grid(0, 0).unwrap();
        assert_eq!(a8.to_string(), "a8");
        assert_eq!(Position::from_algebraic("h1").unwrap().row(), 7);
        assert_eq!(Position::all().next(), Some(a8));
        assert_eq!(Position::all().count(), 64);
    }

    #[test]
    fn offsets_stay_on_board() {
        let h8 = Position::from_algebraic("h8").unwrap();
        assert!(h8.offset(1, 0).is_none());
        assert_eq!(h8.offset(-1, -2).unwrap().to_string(), "g6");
        assert_eq!(h8.mirrored().to_string(), "h1");
    }
}
