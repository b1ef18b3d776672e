use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};
use std::fmt::{Display, Formatter};

/// A piece standing on the board.
///
/// `has_moved` only carries meaning for pawns (double push eligibility),
/// rooks and kings (castling). A promoted pawn is replaced by a fresh piece.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub has_moved: bool,
}
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceType {
    /// Promotion choices, best first
    pub const PROMOTIONS: [PieceType; 4] = [Queen, Rook, Bishop, Knight];

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(Pawn),
            'n' => Some(Knight),
            'b' => Some(Bishop),
            'r' => Some(Rook),
            'q' => Some(Queen),
            'k' => Some(King),
            _ => None,
        }
    }
    pub fn is_bishop_like(&self) -> bool {
        matches!(self, Bishop | Queen)
    }
    pub fn is_rook_like(&self) -> bool {
        matches!(self, Queen | Rook)
    }
    /// Upper case letter used by algebraic notation, empty for pawns
    pub fn san_letter(&self) -> &'static str {
        match self {
            Pawn => "",
            Knight => "N",
            Bishop => "B",
            Rook => "R",
            Queen => "Q",
            King => "K",
        }
    }
}
impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Pawn => "p",
                Knight => "n",
                Bishop => "b",
                Rook => "r",
                Queen => "q",
                King => "k",
            }
        )
    }
}
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}
impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            White => Black,
            Black => White,
        }
    }
    /// Rank direction in which this side's pawns advance
    pub fn forward(&self) -> i32 {
        match self {
            White => 1,
            Black => -1,
        }
    }
    /// Rank (0-7) holding this side's pieces at the start of the game
    pub fn back_rank(&self) -> usize {
        match self {
            White => 0,
            Black => 7,
        }
    }
    /// Rank (0-7) holding this side's pawns at the start of the game
    pub fn pawn_rank(&self) -> usize {
        match self {
            White => 1,
            Black => 6,
        }
    }
}
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self == &Black { "b" } else { "w" })
    }
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece {
            piece_type,
            color,
            has_moved: false,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_lowercase() { Black } else { White };
        Some(Piece::new(piece_type, color))
    }

    pub fn is(&self, piece_type: PieceType, color: Color) -> bool {
        self.piece_type == piece_type && self.color == color
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.piece_type.to_string();
        write!(
            f,
            "{}",
            if self.color == White {
                s.to_uppercase()
            } else {
                s
            }
        )
    }
}
