use regex::Regex;

use crate::board::Board;
use crate::error::{ChessError, Result};
use crate::move_generator::generate;
use crate::piece::PieceType;
use crate::r#move::Move;
use crate::square::{file_of, parse_square, rank_of, square_representation};

/// Writes a legal move in standard algebraic notation (`Nf3`, `exd5`, `O-O`, `e8=Q+`).
/// The board is left as it was.
pub fn to_algebraic(board: &mut Board, mv: Move) -> Result<String> {
    let mv = mv.or_queen_promotion(board);
    let legal_moves = generate(board);
    if !legal_moves.contains(&mv) {
        return Err(ChessError::IllegalMove(mv.to_string()));
    }
    let piece_type = board
        .piece_type_on(mv.origin())
        .ok_or_else(|| ChessError::IllegalMove(mv.to_string()))?;
    let target = square_representation(mv.target()).ok_or_else(|| ChessError::IllegalMove(mv.to_string()))?;

    let mut san = String::new();
    if mv.is_castling(board) {
        san.push_str(if file_of(mv.target()) > file_of(mv.origin()) { "O-O" } else { "O-O-O" });
    } else if piece_type == PieceType::Pawn {
        if mv.is_capture(board) {
            san.push(file_char(mv.origin()));
            san.push('x');
        }
        san.push_str(&target);
        if let Some(promotion) = mv.promotion_target() {
            san.push('=');
            san.push_str(promotion.san_letter());
        }
    } else {
        san.push_str(piece_type.san_letter());
        // Other pieces of the same kind that could reach the same square
        let rivals: Vec<Move> = legal_moves
            .iter()
            .filter(|m| {
                m.target() == mv.target()
                    && m.origin() != mv.origin()
                    && board.piece_type_on(m.origin()) == Some(piece_type)
            })
            .copied()
            .collect();
        if !rivals.is_empty() {
            let shares_file = rivals.iter().any(|m| file_of(m.origin()) == file_of(mv.origin()));
            let shares_rank = rivals.iter().any(|m| rank_of(m.origin()) == rank_of(mv.origin()));
            if !shares_file {
                san.push(file_char(mv.origin()));
            } else if !shares_rank {
                san.push(rank_char(mv.origin()));
            } else {
                san.push(file_char(mv.origin()));
                san.push(rank_char(mv.origin()));
            }
        }
        if mv.is_capture(board) {
            san.push('x');
        }
        san.push_str(&target);
    }

    board.make_unchecked(mv);
    let opponent = board.side_to_move();
    if board.is_checkmate(opponent) {
        san.push('#')
    } else if board.in_check(opponent) {
        san.push('+')
    }
    board.unmake();
    Ok(san)
}

/// Reads a move written in standard algebraic notation, resolving it against
/// the legal moves of the side to move. Check and annotation suffixes are ignored.
pub fn parse_algebraic(board: &mut Board, san: &str) -> Result<Move> {
    let notation_error = || ChessError::NotationError(san.to_string());
    let trimmed = san.trim().trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
    let legal_moves = generate(board);

    let castling_side = match trimmed {
        "O-O" | "0-0" => Some(2i32),
        "O-O-O" | "0-0-0" => Some(-2i32),
        _ => None,
    };
    if let Some(direction) = castling_side {
        let side = board.side_to_move();
        let king = board.king_square(side).ok_or_else(notation_error)?;
        return legal_moves
            .iter()
            .copied()
            .find(|m| m.origin() == king && m.target() as i32 == king as i32 + direction && m.is_castling(board))
            .ok_or_else(|| ChessError::IllegalMove(san.to_string()));
    }

    let caps = san_regex().captures(trimmed).ok_or_else(notation_error)?;
    let piece_type = match caps.get(1) {
        Some(p) => p.as_str().chars().next().and_then(PieceType::from_char).ok_or_else(notation_error)?,
        None => PieceType::Pawn,
    };
    let from_file = caps.get(2).and_then(|f| f.as_str().chars().next()).map(|c| c as usize - 'a' as usize);
    let from_rank = caps.get(3).and_then(|r| r.as_str().chars().next()).map(|c| c as usize - '1' as usize);
    let is_capture = caps.get(4).is_some();
    let target = caps.get(5).and_then(|t| parse_square(t.as_str())).ok_or_else(notation_error)?;
    let promotion = match caps.get(6) {
        Some(p) => Some(p.as_str().chars().next().and_then(PieceType::from_char).ok_or_else(notation_error)?),
        None => None,
    };

    let candidates: Vec<Move> = legal_moves
        .iter()
        .filter(|m| {
            m.target() == target
                && board.piece_type_on(m.origin()) == Some(piece_type)
                && from_file.map_or(true, |f| file_of(m.origin()) == f)
                && from_rank.map_or(true, |r| rank_of(m.origin()) == r)
                && (!is_capture || m.is_capture(board))
                && match (promotion, m.promotion_target()) {
                    (Some(wanted), Some(p)) => wanted == p,
                    (None, Some(p)) => p == PieceType::Queen,
                    (None, None) => true,
                    (Some(_), None) => false,
                }
        })
        .copied()
        .collect();

    match candidates.as_slice() {
        [mv] => Ok(*mv),
        [] => Err(ChessError::IllegalMove(san.to_string())),
        _ => Err(ChessError::NotationError(format!("{} is ambiguous", san))),
    }
}

/// Accepts coordinate notation (`g1f3`) or algebraic notation (`Nf3`)
pub fn parse_move(board: &mut Board, text: &str) -> Result<Move> {
    let text = text.trim();
    match Move::parse(text) {
        Some(mv) => {
            let mv = mv.or_queen_promotion(board);
            if generate(board).contains(&mv) {
                Ok(mv)
            } else {
                Err(ChessError::IllegalMove(text.to_string()))
            }
        }
        None => parse_algebraic(board, text),
    }
}

fn file_char(sq: usize) -> char {
    (b'a' + file_of(sq) as u8) as char
}

fn rank_char(sq: usize) -> char {
    (b'1' + rank_of(sq) as u8) as char
}

fn san_regex() -> Regex {
    Regex::new(r"^([NBRQK])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=?([NBRQ]))?$").unwrap()
}
