use crate::{
    r#move::Move,
    board::Board,
    piece::{Color, Piece, PieceType},
    square::{self, rank_of, Square},
    movelist::MoveList
};

pub(crate) const KNIGHT_OFFSETS: [(i32, i32); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
pub(crate) const KING_OFFSETS: [(i32, i32); 8] = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub(crate) const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Squares the piece on `origin` could move to by geometry alone, ignoring
/// whose turn it is and whether its own king would be left in check.
/// Castling destinations are included when the king, rook, path and
/// transit squares allow it.
pub fn pseudo_legal_targets(board: &Board, origin: Square) -> Vec<Square> {
    let mut targets = Vec::with_capacity(28);
    let piece = if let Some(p) = board.piece_on(origin) { p } else { return targets };
    match piece.piece_type {
        PieceType::Pawn => pawn_targets(board, origin, piece, &mut targets),
        PieceType::Knight => leaper_targets(board, origin, piece.color, &KNIGHT_OFFSETS, &mut targets),
        PieceType::Bishop => slider_targets(board, origin, piece.color, &BISHOP_DIRECTIONS, &mut targets),
        PieceType::Rook => slider_targets(board, origin, piece.color, &ROOK_DIRECTIONS, &mut targets),
        PieceType::Queen => {
            slider_targets(board, origin, piece.color, &BISHOP_DIRECTIONS, &mut targets);
            slider_targets(board, origin, piece.color, &ROOK_DIRECTIONS, &mut targets);
        }
        PieceType::King => {
            leaper_targets(board, origin, piece.color, &KING_OFFSETS, &mut targets);
            castling_targets(board, origin, piece, &mut targets);
        }
    }
    targets
}

/// Pseudo-legal targets that do not leave the mover's own king in check.
/// Each candidate is tried on the board and taken back.
pub fn legal_targets(board: &mut Board, origin: Square) -> Vec<Square> {
    let mover = if let Some(c) = board.color_on(origin) { c } else { return vec![] };
    pseudo_legal_targets(board, origin)
        .into_iter()
        .filter(|target| is_safe(board, Move::new(origin, *target), mover))
        .collect()
}

/// Every legal move of the side to move
pub fn generate(board: &mut Board) -> MoveList {
    let side = board.side_to_move();
    generate_for(board, side)
}

/// Every legal move of the pieces of `color`, promotions expanded to the four choices
pub fn generate_for(board: &mut Board, color: Color) -> MoveList {
    let mut move_list = MoveList::default();
    let origins: Vec<Square> = board.pieces_of(color).map(|(sq, _)| sq).collect();
    for origin in origins {
        push_moves_from(board, origin, &mut move_list);
    }
    move_list
}


/// Stops at the first legal move found
pub fn has_legal_move(board: &mut Board, color: Color) -> bool {
    let origins: Vec<Square> = board.pieces_of(color).map(|(sq, _)| sq).collect();
    origins.into_iter().any(|origin| {
        pseudo_legal_targets(board, origin)
            .into_iter()
            .any(|target| is_safe(board, Move::new(origin, target), color))
    })
}

fn push_moves_from(board: &mut Board, origin: Square, move_list: &mut MoveList) {
    let is_pawn = board.piece_type_on(origin) == Some(PieceType::Pawn);
    for target in legal_targets(board, origin) {
        if is_pawn && (rank_of(target) == 0 || rank_of(target) == 7) {
            for prom in Move::all_promotions(origin, target) {
                move_list.push(prom)
            }
        } else {
            move_list.push(Move::new(origin, target))
        }
    }
}

fn is_safe(board: &mut Board, mv: Move, mover: Color) -> bool {
    board.make_unchecked(mv);
    let safe = !board.in_check(mover);
    board.unmake();
    safe
}

fn pawn_targets(board: &Board, origin: Square, pawn: Piece, targets: &mut Vec<Square>) {
    let forward = pawn.color.forward();
    if let Some(one_step) = square::offset(origin, 0, forward) {
        if board.piece_on(one_step).is_none() {
            targets.push(one_step);
            if !pawn.has_moved {
                if let Some(two_steps) = square::offset(origin, 0, 2 * forward) {
                    if board.piece_on(two_steps).is_none() {
                        targets.push(two_steps)
                    }
                }
            }
        }
    }
    for side in [-1, 1] {
        let target = if let Some(sq) = square::offset(origin, side, forward) { sq } else { continue };
        match board.piece_on(target) {
            Some(p) if p.color != pawn.color => targets.push(target),
            None if board.en_passant_target() == Some(target) => {
                // The pushed pawn stands beside us, on the en passant file
                let victim = Move::new(origin, target).en_passant_victim();
                if matches!(board.piece_on(victim), Some(p) if p.is(PieceType::Pawn, pawn.color.opposite())) {
                    targets.push(target)
                }
            }
            _ => (),
        }
    }
}

fn leaper_targets(board: &Board, origin: Square, color: Color, offsets: &[(i32, i32)], targets: &mut Vec<Square>) {
    for &(file_step, rank_step) in offsets {
        if let Some(target) = square::offset(origin, file_step, rank_step) {
            if board.color_on(target) != Some(color) {
                targets.push(target)
            }
        }
    }
}

fn slider_targets(board: &Board, origin: Square, color: Color, directions: &[(i32, i32)], targets: &mut Vec<Square>) {
    for &(file_step, rank_step) in directions {
        let mut current = origin;
        while let Some(target) = square::offset(current, file_step, rank_step) {
            match board.color_on(target) {
                None => targets.push(target),
                Some(c) => {
                    if c != color { targets.push(target) }
                    break
                }
            }
            current = target;
        }
    }
}

fn castling_targets(board: &Board, origin: Square, king: Piece, targets: &mut Vec<Square>) {
    if king.has_moved {
        return;
    }
    let enemy = king.color.opposite();
    // Castling out of check is never allowed
    if board.is_attacked(origin, enemy) {
        return;
    }
    let back_rank = rank_of(origin) * 8;
    for (rook_square, direction) in [(back_rank + 7, 1i32), (back_rank, -1)] {
        let rook_ready = matches!(board.piece_on(rook_square), Some(p) if p.is(PieceType::Rook, king.color) && !p.has_moved);
        if !rook_ready {
            continue;
        }
        let (low, high) = if rook_square > origin { (origin + 1, rook_square) } else { (rook_square + 1, origin) };
        if (low..high).any(|sq| board.piece_on(sq).is_some()) {
            continue;
        }
        let transit = (origin as i32 + direction) as Square;
        let destination = (origin as i32 + 2 * direction) as Square;
        if board.is_attacked(transit, enemy) || board.is_attacked(destination, enemy) {
            continue;
        }
        targets.push(destination)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, STARTING_POSITION};
    use crate::square::parse_square;
    use super::*;

    fn sq(s: &str) -> Square {
        parse_square(s).unwrap()
    }

    fn sorted(mut v: Vec<Square>) -> Vec<Square> {
        v.sort_unstable();
        v
    }

    #[test]
    fn twenty_moves_each_side_from_the_start() {
        let mut board = Board::default();
        let white = generate(&mut board);
        assert_eq!(white.len(), 20);
        let pawn_moves = white.iter().filter(|m| board.piece_type_on(m.origin()) == Some(PieceType::Pawn)).count();
        assert_eq!(pawn_moves, 16);
        for mv in &white {
            board.make(*mv).unwrap();
            assert_eq!(generate(&mut board).len(), 20, "after {}", mv);
            board.unmake();
        }
    }

    #[test]
    fn sliders_stop_on_the_first_piece() {
        let board = Board::new("4k3/8/8/1p6/8/3B4/8/4K3 w - - 0 1").unwrap();
        let targets = sorted(pseudo_legal_targets(&board, sq("d3")));
        let expected = sorted(vec![
            sq("c4"), sq("b5"),
            sq("e4"), sq("f5"), sq("g6"), sq("h7"),
            sq("c2"), sq("b1"),
            sq("e2"), sq("f1"),
        ]);
        assert_eq!(targets, expected);
    }

    #[test]
    fn knights_jump_from_the_corner() {
        let board = Board::new("4k3/8/8/8/8/8/2P5/N3K3 w - - 0 1").unwrap();
        assert_eq!(pseudo_legal_targets(&board, sq("a1")), vec![sq("b3")]);
    }

    #[test]
    fn pawns_push_and_capture() {
        let board = Board::new("4k3/8/8/8/8/2n1p3/3P4/4K3 w - - 0 1").unwrap();
        let targets = sorted(pseudo_legal_targets(&board, sq("d2")));
        assert_eq!(targets, sorted(vec![sq("d3"), sq("d4"), sq("c3"), sq("e3")]));

        let blocked = Board::new("4k3/8/8/8/8/3n4/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(pseudo_legal_targets(&blocked, sq("d2")), vec![]);
        let half_blocked = Board::new("4k3/8/8/8/3n4/8/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(pseudo_legal_targets(&half_blocked, sq("d2")), vec![sq("d3")]);
    }

    #[test]
    fn moved_pawns_cannot_double_push() {
        let board = Board::new("4k3/8/8/8/8/3P4/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pseudo_legal_targets(&board, sq("d3")), vec![sq("d4")]);
    }

    #[test]
    fn pinned_pieces_stay_on_the_pin_line() {
        let mut board = Board::new("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(!pseudo_legal_targets(&board, sq("e2")).is_empty());
        assert!(legal_targets(&mut board, sq("e2")).is_empty());

        let mut rook_pin = Board::new("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        assert_eq!(
            sorted(legal_targets(&mut rook_pin, sq("e2"))),
            sorted(vec![sq("e3"), sq("e4"), sq("e5"), sq("e6"), sq("e7"), sq("e8")])
        );
    }

    #[test]
    fn kings_do_not_walk_into_attacks() {
        let mut board = Board::new("3rk3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(sorted(legal_targets(&mut board, sq("e1"))), sorted(vec![sq("e2"), sq("f1"), sq("f2")]));
    }

    #[test]
    fn never_leaves_own_king_in_check() {
        for fen in [
            STARTING_POSITION,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        ] {
            let mut board = Board::new(fen).unwrap();
            let mover = board.side_to_move();
            for mv in &generate(&mut board) {
                board.make(*mv).unwrap();
                assert!(!board.in_check(mover), "{} leaves the king in check in {}", mv, fen);
                board.unmake();
            }
        }
    }

    #[test]
    fn en_passant_needs_an_enemy_pawn_beside() {
        let board = Board::new("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
        let targets = pseudo_legal_targets(&board, sq("e5"));
        assert!(targets.contains(&sq("f6")));
        assert!(!targets.contains(&sq("d6")));
    }

    #[test]
    fn en_passant_cannot_expose_the_king() {
        // Capturing would clear the fifth rank between the rook and the king
        let mut board = Board::new("8/8/8/KPp4r/8/8/8/7k w - c6 0 2").unwrap();
        assert!(pseudo_legal_targets(&board, sq("b5")).contains(&sq("c6")));
        assert!(!legal_targets(&mut board, sq("b5")).contains(&sq("c6")));
    }

    #[test]
    fn castling_conditions() {
        let mut board = Board::new("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let king_targets = legal_targets(&mut board, sq("e1"));
        assert!(king_targets.contains(&sq("g1")) && king_targets.contains(&sq("c1")));

        // In check
        let mut checked = Board::new("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1").unwrap();
        let king_targets = legal_targets(&mut checked, sq("e1"));
        assert!(!king_targets.contains(&sq("g1")) && !king_targets.contains(&sq("c1")));

        // Through an attacked square
        let mut transit = Board::new("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1").unwrap();
        let king_targets = legal_targets(&mut transit, sq("e1"));
        assert!(!king_targets.contains(&sq("g1")) && king_targets.contains(&sq("c1")));

        // Through an occupied square
        let mut blocked = Board::new("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1").unwrap();
        let king_targets = legal_targets(&mut blocked, sq("e1"));
        assert!(!king_targets.contains(&sq("g1")) && !king_targets.contains(&sq("c1")));

        // The b-file only has to be empty, not safe
        let mut b_file = Board::new("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(legal_targets(&mut b_file, sq("e1")).contains(&sq("c1")));
    }

    #[test]
    fn castling_after_king_or_rook_moved() {
        let mut board = Board::new("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        for mv in ["e1f1", "e8f8", "f1e1", "f8e8"] {
            board.make_from_str(mv).unwrap();
        }
        assert!(!legal_targets(&mut board, sq("e1")).contains(&sq("g1")));

        let mut rook_moved = Board::new("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        for mv in ["h1h2", "a8a7", "h2h1", "a7a8"] {
            rook_moved.make_from_str(mv).unwrap();
        }
        let targets = legal_targets(&mut rook_moved, sq("e1"));
        assert!(!targets.contains(&sq("g1")) && targets.contains(&sq("c1")));
    }

    #[test]
    fn promotions_expand_to_four_moves() {
        let mut board = Board::new("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let from_pawn: Vec<Move> = generate(&mut board).iter().copied().filter(|m| m.origin() == sq("a7")).collect();
        assert_eq!(from_pawn.len(), 4);
        assert_eq!(from_pawn[0].promotion_target(), Some(PieceType::Queen));
    }

    #[test]
    fn empty_square_has_no_moves() {
        let mut board = Board::default();
        assert!(pseudo_legal_targets(&board, sq("e4")).is_empty());
        assert!(legal_targets(&mut board, sq("e4")).is_empty());
    }
}
