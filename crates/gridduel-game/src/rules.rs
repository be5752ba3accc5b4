//! Movement rules: direction symbols, row/column deltas, and bounds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Kind, Position, BOARD_SIZE};

/// One of the eight symbolic move directions.
///
/// Directions are absolute: `F` always points toward row 0, for both
/// owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    L,
    R,
    F,
    B,
    FL,
    FR,
    BL,
    BR,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Self::L,
        Self::R,
        Self::F,
        Self::B,
        Self::FL,
        Self::FR,
        Self::BL,
        Self::BR,
    ];

    /// Row/column delta for a piece of `kind` moving this way.
    ///
    /// `F` and `B` only move the straight-mover; for every other kind they
    /// yield `(0, 0)`, leaving the piece where it is.
    pub fn delta(self, kind: Kind) -> (isize, isize) {
        let straight = isize::from(kind.is_straight_mover());
        match self {
            Self::L => (0, -1),
            Self::R => (0, 1),
            Self::F => (-straight, 0),
            Self::B => (straight, 0),
            Self::FL => (-1, -1),
            Self::FR => (-1, 1),
            Self::BL => (1, -1),
            Self::BR => (1, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::L => "L",
            Self::R => "R",
            Self::F => "F",
            Self::B => "B",
            Self::FL => "FL",
            Self::FR => "FR",
            Self::BL => "BL",
            Self::BR => "BR",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.to_string() == s)
            .ok_or_else(|| format!("unknown direction: {s}"))
    }
}

/// Computes where a piece of `kind` at `from` lands when moving `direction`.
///
/// Returns `None` if the result falls outside the board.
pub fn destination(
    from: Position,
    direction: Direction,
    kind: Kind,
) -> Option<Position> {
    let (dr, dc) = direction.delta(kind);
    let row = from.row.checked_add_signed(dr)?;
    let col = from.col.checked_add_signed(dc)?;
    (row < BOARD_SIZE && col < BOARD_SIZE).then(|| Position::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Position = Position::new(2, 2);

    #[test]
    fn test_pawn_uses_every_delta() {
        let expected = [
            (Direction::L, (2, 1)),
            (Direction::R, (2, 3)),
            (Direction::F, (1, 2)),
            (Direction::B, (3, 2)),
            (Direction::FL, (1, 1)),
            (Direction::FR, (1, 3)),
            (Direction::BL, (3, 1)),
            (Direction::BR, (3, 3)),
        ];
        for (dir, (row, col)) in expected {
            assert_eq!(
                destination(CENTER, dir, Kind::Pawn),
                Some(Position::new(row, col)),
                "direction {dir}"
            );
        }
    }

    #[test]
    fn test_heroes_do_not_move_straight() {
        for kind in [Kind::Hero1, Kind::Hero2] {
            assert_eq!(destination(CENTER, Direction::F, kind), Some(CENTER));
            assert_eq!(destination(CENTER, Direction::B, kind), Some(CENTER));
            assert_eq!(
                destination(CENTER, Direction::FR, kind),
                Some(Position::new(1, 3))
            );
            assert_eq!(
                destination(CENTER, Direction::L, kind),
                Some(Position::new(2, 1))
            );
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let corner = Position::new(0, 0);
        assert_eq!(destination(corner, Direction::F, Kind::Pawn), None);
        assert_eq!(destination(corner, Direction::L, Kind::Pawn), None);
        assert_eq!(destination(corner, Direction::FL, Kind::Hero1), None);

        let far = Position::new(4, 4);
        assert_eq!(destination(far, Direction::B, Kind::Pawn), None);
        assert_eq!(destination(far, Direction::R, Kind::Hero2), None);
        assert_eq!(destination(far, Direction::BR, Kind::Hero2), None);
        assert_eq!(
            destination(far, Direction::FL, Kind::Hero2),
            Some(Position::new(3, 3))
        );
    }

    #[test]
    fn test_direction_parse_and_display() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
        assert!("UP".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }
}
