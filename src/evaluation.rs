use crate::board::Board;
use crate::piece::{Color, PieceType};
use crate::r#move::Move;
use crate::square::{rank_of, vertical_symmetry, Square};

pub type Score = i32;

// Pawn placement from white's point of view, a1 first.
// Black pawns read it through a vertical flip.
#[rustfmt::skip]
const PAWN_SQUARE_TABLE: [Score; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
     5, 10,  10, -20, -20,  10, 10,  5,
     5, -5, -10,   0,   0, -10, -5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5,  5,  10,  25,  25,  10,  5,  5,
    10, 10,  20,  30,  30,  20, 10, 10,
    50, 50,  50,  50,  50,  50, 50, 50,
     0,  0,   0,   0,   0,   0,  0,  0,
];

const CENTER: [Square; 4] = [27, 28, 35, 36];
#[rustfmt::skip]
const LARGE_CENTER: [Square; 12] = [
    18, 19, 20, 21,
    26, 29,
    34, 37,
    42, 43, 44, 45,
];

/// Static evaluation of a position.
///
/// Scores are signed from the point of view of whoever asks:
/// positive is good for `perspective`.
pub struct Evaluation;
impl Evaluation {
    pub const PIECE_TYPE_VALUE: [Score; 6] = [100, 320, 330, 500, 900, 20000];
    pub const MATE_SCORE: Score = i32::MAX / 2;
    pub const DRAW_SCORE: Score = 0;
    pub const CENTER_BONUS: Score = 15;
    pub const LARGE_CENTER_BONUS: Score = 5;
    pub const UNDEVELOPED_PENALTY: Score = 15;

    /// Material, pawn placement, centre occupancy and minor piece development
    pub fn evaluate(board: &Board, perspective: Color) -> Score {
        let mut scores: [Score; 2] = [0; 2];
        for (sq, piece) in board.pieces() {
            let mut score = Self::PIECE_TYPE_VALUE[piece.piece_type as usize];
            let relative_sq = match piece.color {
                Color::White => sq,
                Color::Black => vertical_symmetry(sq),
            };

            match piece.piece_type {
                PieceType::Pawn => score += PAWN_SQUARE_TABLE[relative_sq],
                PieceType::Knight | PieceType::Bishop if rank_of(relative_sq) == 0 => {
                    score -= Self::UNDEVELOPED_PENALTY
                }
                _ => (),
            }
            if piece.piece_type != PieceType::King {
                if CENTER.contains(&sq) {
                    score += Self::CENTER_BONUS
                } else if LARGE_CENTER.contains(&sq) {
                    score += Self::LARGE_CENTER_BONUS
                }
            }

            scores[piece.color as usize] += score;
        }
        scores[perspective as usize] - scores[perspective.opposite() as usize]
    }

    /// Score of a position where the side to move has no legal move, `ply` plies from the root.
    /// Closer mates score further from zero so the search prefers them.
    pub fn terminal(board: &Board, perspective: Color, ply: u32) -> Score {
        let side = board.side_to_move();
        if !board.in_check(side) {
            return Self::DRAW_SCORE;
        }
        let mate = Self::MATE_SCORE - ply as Score;
        if side == perspective {
            -mate
        } else {
            mate
        }
    }

    pub fn is_mate_score(score: Score) -> bool {
        score.abs() > Self::MATE_SCORE - 1000
    }

    /// Most valuable victim, least valuable attacker. Quiet moves score 0,
    /// promotions count as capturing the piece promoted to.
    pub fn mvv_lva(board: &Board, m: &Move) -> Score {
        let attacker = match board.piece_type_on(m.origin()) {
            Some(p) => p,
            None => return 0,
        };
        let mut score = 0;
        if m.is_en_passant(board) {
            score += 10 * Self::PIECE_TYPE_VALUE[PieceType::Pawn as usize]
        } else if let Some(victim) = board.piece_type_on(m.target()) {
            score += 10 * Self::PIECE_TYPE_VALUE[victim as usize]
        }
        if score != 0 {
            score -= Self::PIECE_TYPE_VALUE[attacker as usize] / 10
        }
        if let Some(promotion) = m.promotion_target() {
            score += 10 * Self::PIECE_TYPE_VALUE[promotion as usize]
        }
        score
    }
}
