//! Board model: slots, piece kinds, pieces, positions, and the grid itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One of the two player identities.
///
/// Serializes as the bare strings `"A"` and `"B"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// Returns the opposing slot.
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            other => Err(format!("unknown slot: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// The character type of a piece. Governs which directions it may use.
///
/// On the wire a kind is its short code: `P1`, `H1`, `H2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "P1")]
    Pawn,
    #[serde(rename = "H1")]
    Hero1,
    #[serde(rename = "H2")]
    Hero2,
}

impl Kind {
    /// Returns the wire code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            Self::Pawn => "P1",
            Self::Hero1 => "H1",
            Self::Hero2 => "H2",
        }
    }

    /// Only the pawn may move straight forward or backward.
    pub fn is_straight_mover(self) -> bool {
        matches!(self, Self::Pawn)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P1" => Ok(Self::Pawn),
            "H1" => Ok(Self::Hero1),
            "H2" => Ok(Self::Hero2),
            other => Err(format!("unknown kind: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece on the board, identified by its owner and kind.
///
/// Serializes as the flat string `"<owner>-<kind>"` (e.g. `"A-P1"`).
/// Clients depend on this exact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Piece {
    pub owner: Slot,
    pub kind: Kind,
}

impl Piece {
    pub const fn new(owner: Slot, kind: Kind) -> Self {
        Self { owner, kind }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.owner, self.kind)
    }
}

impl FromStr for Piece {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, kind) = s
            .split_once('-')
            .ok_or_else(|| format!("malformed piece: {s}"))?;
        Ok(Self {
            owner: owner.parse()?,
            kind: kind.parse()?,
        })
    }
}

impl From<Piece> for String {
    fn from(piece: Piece) -> Self {
        piece.to_string()
    }
}

impl TryFrom<String> for Piece {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell coordinate. Row 0 is B's home edge, row `BOARD_SIZE - 1` is A's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if this position lies on row 0 or the last row.
    pub fn is_edge_row(self) -> bool {
        self.row == 0 || self.row == BOARD_SIZE - 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The square grid. Each cell is empty or holds exactly one piece.
///
/// Serializes as an array of rows, each an array of `null` or piece strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// An empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fixed starting layout: B's pieces on row 0 at the three
    /// right-most columns, A's pieces on the last row at the three
    /// left-most columns.
    pub fn starting() -> Self {
        use Kind::{Hero1, Hero2, Pawn};

        let mut board = Self::empty();
        let last = BOARD_SIZE - 1;

        board.set(Position::new(last, 0), Some(Piece::new(Slot::A, Pawn)));
        board.set(Position::new(last, 1), Some(Piece::new(Slot::A, Hero1)));
        board.set(Position::new(last, 2), Some(Piece::new(Slot::A, Hero2)));

        board.set(Position::new(0, 2), Some(Piece::new(Slot::B, Hero2)));
        board.set(Position::new(0, 3), Some(Piece::new(Slot::B, Hero1)));
        board.set(Position::new(0, 4), Some(Piece::new(Slot::B, Pawn)));

        board
    }

    /// Returns the piece at `pos`, if any.
    ///
    /// Panics if `pos` is off the board; positions come from the movement
    /// rules, which only produce in-bounds cells.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.row][pos.col]
    }

    /// Overwrites the cell at `pos`.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.cells[pos.row][pos.col] = piece;
    }

    /// Finds the first cell (row-major) holding `owner`'s piece of `kind`.
    pub fn find_piece(&self, owner: Slot, kind: Kind) -> Option<Position> {
        let target = Piece::new(owner, kind);
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|cell| *cell == Some(target))
                .map(|col| Position::new(row, col))
        })
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_layout() {
        let board = Board::starting();
        assert_eq!(board.piece_count(), 6);

        assert_eq!(board.get(Position::new(4, 0)), Some(Piece::new(Slot::A, Kind::Pawn)));
        assert_eq!(board.get(Position::new(4, 1)), Some(Piece::new(Slot::A, Kind::Hero1)));
        assert_eq!(board.get(Position::new(4, 2)), Some(Piece::new(Slot::A, Kind::Hero2)));
        assert_eq!(board.get(Position::new(0, 2)), Some(Piece::new(Slot::B, Kind::Hero2)));
        assert_eq!(board.get(Position::new(0, 3)), Some(Piece::new(Slot::B, Kind::Hero1)));
        assert_eq!(board.get(Position::new(0, 4)), Some(Piece::new(Slot::B, Kind::Pawn)));
        assert_eq!(board.get(Position::new(2, 2)), None);
    }

    #[test]
    fn test_find_piece() {
        let board = Board::starting();
        assert_eq!(board.find_piece(Slot::B, Kind::Pawn), Some(Position::new(0, 4)));
        assert_eq!(board.find_piece(Slot::A, Kind::Hero2), Some(Position::new(4, 2)));

        let empty = Board::empty();
        assert_eq!(empty.find_piece(Slot::A, Kind::Pawn), None);
    }

    #[test]
    fn test_find_piece_returns_first_in_row_major_order() {
        let mut board = Board::empty();
        let pawn = Some(Piece::new(Slot::A, Kind::Pawn));
        board.set(Position::new(3, 0), pawn);
        board.set(Position::new(1, 4), pawn);
        assert_eq!(board.find_piece(Slot::A, Kind::Pawn), Some(Position::new(1, 4)));
    }

    #[test]
    fn test_piece_wire_format() {
        let piece = Piece::new(Slot::B, Kind::Hero1);
        assert_eq!(piece.to_string(), "B-H1");
        assert_eq!("A-P1".parse::<Piece>(), Ok(Piece::new(Slot::A, Kind::Pawn)));
        assert!("C-P1".parse::<Piece>().is_err());
        assert!("AP1".parse::<Piece>().is_err());
        assert!("A-X9".parse::<Piece>().is_err());
    }

    #[test]
    fn test_board_serializes_as_grid_of_strings() {
        let json = serde_json::to_value(Board::starting()).unwrap();
        assert_eq!(json[4][0], "A-P1");
        assert_eq!(json[0][4], "B-P1");
        assert!(json[2][2].is_null());
        assert_eq!(json.as_array().unwrap().len(), BOARD_SIZE);

        let back: Board = serde_json::from_value(json).unwrap();
        assert_eq!(back, Board::starting());
    }

    #[test]
    fn test_slot_other_and_edge_rows() {
        assert_eq!(Slot::A.other(), Slot::B);
        assert_eq!(Slot::B.other(), Slot::A);
        assert!(Position::new(0, 3).is_edge_row());
        assert!(Position::new(4, 0).is_edge_row());
        assert!(!Position::new(2, 0).is_edge_row());
    }
}
