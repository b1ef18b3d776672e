use crate::piece::{Color, Piece};
use crate::r#move::Move;
use crate::square::Square;

/// Everything `Board::unmake` needs to restore the position preceding a move
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub move_played: Move,
    /// The moving piece as it stood on the origin square, flags included
    pub moved_piece: Piece,
    /// Captured piece and the square it was taken on (differs from the target for en passant)
    pub captured: Option<(Piece, Square)>,
    /// The castling rook as it stood before the move
    pub castled_rook: Option<Piece>,
    pub ep_target: Option<Square>,
    pub side_to_move: Color,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}
