use crate::board::Board;
use crate::piece::PieceType;
use crate::square::{self, file_of, rank_of, square_representation, Square};
use std::fmt::{Display, Formatter};

/// A move from one square to another.
///
/// Castling and en passant are not stored: they are derived from the board
/// the move is played on, so they can never disagree with it.
/// A promoting move without an explicit piece promotes to a queen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    origin: Square,
    target: Square,
    promotion: Option<PieceType>,
}

impl Move {
    pub fn new(origin: Square, target: Square) -> Move {
        Move {
            origin,
            target,
            promotion: None,
        }
    }
    pub fn new_promotion(origin: Square, target: Square, promote_to: PieceType) -> Move {
        Move {
            origin,
            target,
            promotion: Some(promote_to),
        }
    }
    pub fn all_promotions(origin: Square, target: Square) -> [Move; 4] {
        PieceType::PROMOTIONS.map(|p| Self::new_promotion(origin, target, p))
    }

    pub fn origin(&self) -> Square {
        self.origin
    }
    pub fn target(&self) -> Square {
        self.target
    }
    pub fn promotion_target(&self) -> Option<PieceType> {
        self.promotion
    }

    /// A king travelling two files
    pub fn is_castling(&self, board: &Board) -> bool {
        board.piece_type_on(self.origin) == Some(PieceType::King)
            && file_of(self.origin).abs_diff(file_of(self.target)) == 2
    }

    /// A diagonal pawn move onto the empty en passant target square
    pub fn is_en_passant(&self, board: &Board) -> bool {
        board.piece_type_on(self.origin) == Some(PieceType::Pawn)
            && file_of(self.origin) != file_of(self.target)
            && board.piece_on(self.target).is_none()
            && board.en_passant_target() == Some(self.target)
    }

    pub fn is_capture(&self, board: &Board) -> bool {
        board.piece_on(self.target).is_some() || self.is_en_passant(board)
    }

    /// A pawn reaching the last rank
    pub fn is_promotion(&self, board: &Board) -> bool {
        board.piece_type_on(self.origin) == Some(PieceType::Pawn)
            && (rank_of(self.target) == 0 || rank_of(self.target) == 7)
    }

    /// The same move, promoting to a queen if it promotes without naming a piece
    pub fn or_queen_promotion(self, board: &Board) -> Move {
        match self.promotion {
            None if self.is_promotion(board) => Move::new_promotion(self.origin, self.target, PieceType::Queen),
            _ => self,
        }
    }

    /// Square of the pawn removed by an en passant capture: behind the target
    pub fn en_passant_victim(&self) -> Square {
        rank_of(self.origin) * 8 + file_of(self.target)
    }

    /// (origin, target) of the rook moved along with a castling king
    pub fn castling_rook_squares(&self) -> (Square, Square) {
        let back_rank = rank_of(self.origin) * 8;
        if file_of(self.target) > file_of(self.origin) {
            (back_rank + 7, back_rank + 5)
        } else {
            (back_rank, back_rank + 3)
        }
    }

    /// Parses a move formatted in coordinate notation (`e2e4`, `e7e8q`)
    pub fn parse(mv: &str) -> Option<Move> {
        if !mv.is_ascii() || !(4..=5).contains(&mv.len()) {
            return None;
        }
        let origin = square::parse_square(&mv[0..2])?;
        let target = square::parse_square(&mv[2..4])?;
        let promotion = if mv.len() == 5 {
            match &mv[4..] {
                "b" => Some(PieceType::Bishop),
                "n" => Some(PieceType::Knight),
                "r" => Some(PieceType::Rook),
                "q" => Some(PieceType::Queen),
                _ => return None,
            }
        } else {
            None
        };
        Some(Move {
            origin,
            target,
            promotion,
        })
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let o = square_representation(self.origin()).unwrap_or_else(|| String::from("**"));
        let t = square_representation(self.target()).unwrap_or_else(|| String::from("**"));
        if let Some(p) = self.promotion {
            write!(f, "{}{}{}", o, t, p)
        } else {
            write!(f, "{}{}", o, t)
        }
    }
}
