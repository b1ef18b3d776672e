use crate::board::Board;
use crate::move_generator::{has_legal_move, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use crate::piece::{Color, PieceType};
use crate::square::{self, Square};

impl Board {
    /// Whether any piece of `attacking_color` threatens `target`.
    /// Looks outwards from the target, so pinned pieces still count as attackers.
    pub fn is_attacked(&self, target: Square, attacking_color: Color) -> bool {
        let holds = |sq: Option<Square>, piece_type: PieceType| {
            matches!(sq.and_then(|s| self.piece_on(s)), Some(p) if p.is(piece_type, attacking_color))
        };

        // A pawn attacks diagonally forwards, so look diagonally backwards from the target
        let behind = -attacking_color.forward();
        if holds(square::offset(target, -1, behind), PieceType::Pawn)
            || holds(square::offset(target, 1, behind), PieceType::Pawn)
        {
            return true;
        }
        if KNIGHT_OFFSETS.iter().any(|&(f, r)| holds(square::offset(target, f, r), PieceType::Knight)) {
            return true;
        }
        if KING_OFFSETS.iter().any(|&(f, r)| holds(square::offset(target, f, r), PieceType::King)) {
            return true;
        }
        self.slider_attacks(target, attacking_color, &BISHOP_DIRECTIONS, PieceType::is_bishop_like)
            || self.slider_attacks(target, attacking_color, &ROOK_DIRECTIONS, PieceType::is_rook_like)
    }

    fn slider_attacks(
        &self,
        target: Square,
        attacking_color: Color,
        directions: &[(i32, i32)],
        moves_along: fn(&PieceType) -> bool,
    ) -> bool {
        for &(file_step, rank_step) in directions {
            let mut current = target;
            while let Some(sq) = square::offset(current, file_step, rank_step) {
                if let Some(p) = self.piece_on(sq) {
                    if p.color == attacking_color && moves_along(&p.piece_type) {
                        return true;
                    }
                    break;
                }
                current = sq;
            }
        }
        false
    }

    /// A side without a king is considered in check
    pub fn in_check(&self, side: Color) -> bool {
        let king_square = if let Some(sq) = self.king_square(side) { sq } else { return true };
        self.is_attacked(king_square, side.opposite())
    }

    pub fn is_checkmate(&mut self, side: Color) -> bool {
        self.in_check(side) && !has_legal_move(self, side)
    }

    pub fn is_stalemate(&mut self, side: Color) -> bool {
        !self.in_check(side) && !has_legal_move(self, side)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::piece::Color::{Black, White};
    use crate::square::parse_square;

    fn sq(s: &str) -> usize {
        parse_square(s).unwrap()
    }

    #[test]
    fn quiet_opening_is_not_check() {
        let mut board = Board::default();
        board.make_from_str("e2e4").unwrap();
        board.make_from_str("e7e5").unwrap();
        assert!(!board.in_check(White));
        assert!(!board.in_check(Black));
        assert!(!board.is_checkmate(White) && !board.is_stalemate(White));
    }

    #[test]
    fn fools_mate() {
        let mut board = Board::default();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            board.make_from_str(mv).unwrap();
        }
        assert!(board.in_check(White));
        assert!(board.is_checkmate(White));
        assert!(!board.is_stalemate(White));
        assert!(!board.is_checkmate(Black));
    }

    #[test]
    fn stalemate() {
        let mut board = Board::new("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!board.in_check(Black));
        assert!(board.is_stalemate(Black));
        assert!(!board.is_checkmate(Black));
    }

    #[test]
    fn pawns_attack_diagonally_forwards() {
        let board = Board::new("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(board.is_attacked(sq("d5"), White));
        assert!(board.is_attacked(sq("f5"), White));
        assert!(!board.is_attacked(sq("e5"), White));
        assert!(board.is_attacked(sq("e4"), Black));
        assert!(board.is_attacked(sq("c4"), Black));
        assert!(!board.is_attacked(sq("d4"), Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let board = Board::new("4k3/8/8/8/8/2P5/8/Q3K2R w K - 0 1").unwrap();
        assert!(board.is_attacked(sq("b2"), White));
        assert!(board.is_attacked(sq("c3"), White));
        assert!(!board.is_attacked(sq("e5"), White));
        assert!(board.is_attacked(sq("a8"), White));
        assert!(board.is_attacked(sq("h8"), White));
        assert!(board.is_attacked(sq("f1"), White));
    }

    #[test]
    fn pinned_pieces_still_give_check() {
        // The e6 knight cannot move without exposing its king, yet it attacks f4
        let board = Board::new("4k3/8/4n3/8/5K2/8/8/4R3 w - - 0 1").unwrap();
        assert!(board.is_attacked(sq("f4"), Black));
        assert!(board.in_check(White));
    }

    #[test]
    fn missing_king_counts_as_check() {
        let mut board = Board::new("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        board.remove_piece(sq("e8"));
        assert!(board.in_check(Black));
    }
}
