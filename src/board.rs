use std::fmt::{Display, Formatter};
use crate::castling::CastlingRights;
use crate::error::{ChessError, Result};
use crate::history::HistoryEntry;
use crate::move_generator::generate;
use crate::piece::{Color, Piece, PieceType};
use crate::piece::Color::{Black, White};
use crate::r#move::Move;
use crate::square::{parse_square, rank_of, square_representation, Square};

pub const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK_LAYOUT: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

// Mailbox representation, a1 = 0 and h8 = 63.
// The undo stack lives on the board so that a position and the moves that
// led to it can never drift apart.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pieces: [Option<Piece>; 64],
    side_to_move: Color,
    ep_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,

    history_entries: Vec<HistoryEntry>,
}

impl Board {
    /// Creates a new board given its FEN representation
    pub fn new(fen: &str) -> Result<Board> {
        let mut b = Board::empty();
        b.set_fen(fen)?;
        Ok(b)
    }

    /// The standard initial setup, white to move
    pub fn starting_position() -> Board {
        let mut b = Board::empty();
        for (file, piece_type) in BACK_RANK_LAYOUT.iter().enumerate() {
            for color in [White, Black] {
                b.add_piece(Piece::new(*piece_type, color), color.back_rank() * 8 + file);
                b.add_piece(Piece::new(PieceType::Pawn, color), color.pawn_rank() * 8 + file);
            }
        }
        b
    }

    fn empty() -> Board {
        Board {
            pieces: [None; 64],
            side_to_move: White,
            ep_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,

            history_entries: Vec::with_capacity(128),
        }
    }

    /// Makes a move on the board if it is legal for the side to move,
    /// returning the record pushed on the undo stack.
    /// A promoting move that names no piece promotes to a queen.
    pub fn make(&mut self, mv: Move) -> Result<HistoryEntry> {
        let mv = mv.or_queen_promotion(self);
        match self.pieces.get(mv.origin()).copied().flatten() {
            None => return Err(ChessError::IllegalMove(format!("{}: no piece on the origin square", mv))),
            Some(p) if p.color != self.side_to_move => {
                return Err(ChessError::IllegalMove(format!("{}: it is not {}'s turn", mv, p.color)))
            }
            _ => (),
        }
        if !generate(self).iter().any(|m| *m == mv) {
            return Err(ChessError::IllegalMove(mv.to_string()));
        }
        Ok(self.make_unchecked(mv))
    }

    /// Given a string in coordinate notation, makes the move if it is legal
    pub fn make_from_str(&mut self, move_str: &str) -> Result<Move> {
        let mv = Move::parse(move_str).ok_or_else(|| ChessError::NotationError(move_str.to_string()))?;
        Ok(self.make(mv)?.move_played)
    }

    /// Makes a move without checking it against the legal move set.
    /// Move generation and search only feed it generated moves.
    pub(crate) fn make_unchecked(&mut self, mv: Move) -> HistoryEntry {
        let origin = mv.origin();
        let target = mv.target();

        let is_en_passant = mv.is_en_passant(self);
        let is_castling = mv.is_castling(self);
        let promotion = if mv.is_promotion(self) {
            Some(mv.promotion_target().unwrap_or(PieceType::Queen))
        } else {
            None
        };

        let moved_piece = self
            .remove_piece(origin)
            .expect("generated moves always start on an occupied square");
        let captured = if is_en_passant {
            let victim_square = mv.en_passant_victim();
            self.remove_piece(victim_square).map(|p| (p, victim_square))
        } else {
            self.remove_piece(target).map(|p| (p, target))
        };

        let castled_rook = if is_castling {
            let (rook_origin, rook_target) = mv.castling_rook_squares();
            let rook = self.remove_piece(rook_origin);
            if let Some(r) = rook {
                self.add_piece(Piece { has_moved: true, ..r }, rook_target);
            }
            rook
        } else {
            None
        };

        let placed = match promotion {
            Some(p) => Piece { piece_type: p, color: moved_piece.color, has_moved: true },
            None => Piece { has_moved: Self::tracks_movement(moved_piece.piece_type) || moved_piece.has_moved, ..moved_piece },
        };
        self.add_piece(placed, target);

        let history_entry = HistoryEntry {
            move_played: mv,
            moved_piece,
            captured,
            castled_rook,
            ep_target: self.ep_target,
            side_to_move: self.side_to_move,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        };

        let is_pawn = moved_piece.piece_type == PieceType::Pawn;
        self.ep_target = if is_pawn && rank_of(origin).abs_diff(rank_of(target)) == 2 {
            Some((origin + target) / 2)
        } else {
            None
        };
        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0
        } else {
            self.halfmove_clock += 1
        }
        if self.side_to_move == Black {
            self.fullmove_number += 1
        }
        self.side_to_move = self.side_to_move.opposite();

        self.history_entries.push(history_entry);
        history_entry
    }

    /// Only pawns, rooks and kings care about having moved
    fn tracks_movement(piece_type: PieceType) -> bool {
        matches!(piece_type, PieceType::Pawn | PieceType::Rook | PieceType::King)
    }

    /// Unmakes the move on the top of the history stack, returning its record
    pub fn unmake(&mut self) -> Option<HistoryEntry> {
        let entry = self.history_entries.pop()?;
        let mv = entry.move_played;

        self.remove_piece(mv.target());
        self.add_piece(entry.moved_piece, mv.origin());
        if let Some(rook) = entry.castled_rook {
            let (rook_origin, rook_target) = mv.castling_rook_squares();
            self.remove_piece(rook_target);
            self.add_piece(rook, rook_origin);
        }
        if let Some((captured, sq)) = entry.captured {
            self.add_piece(captured, sq)
        }

        self.ep_target = entry.ep_target;
        self.side_to_move = entry.side_to_move;
        self.halfmove_clock = entry.halfmove_clock;
        self.fullmove_number = entry.fullmove_number;
        Some(entry)
    }

    /// Places a new piece on a given square
    pub fn add_piece(&mut self, piece: Piece, sq: Square) {
        self.pieces[sq] = Some(piece);
    }

    /// Clears the given square, returning the piece that has been removed if any
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.pieces[sq].take()
    }

    /*
    INTERESTING GETTERS
     */
    pub fn side_to_move(&self) -> Color { self.side_to_move }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.ep_target
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.pieces.get(sq).copied().flatten()
    }

    pub fn piece_type_on(&self, sq: Square) -> Option<PieceType> {
        self.piece_on(sq).map(|p| p.piece_type)
    }

    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_on(sq).map(|p| p.color)
    }

    /// Every occupied square with its piece, from a1 to h8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(sq, p)| p.map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.piece_type == PieceType::King)
            .map(|(sq, _)| sq)
    }

    /// Castling availability as derived from the king and corner rook flags.
    /// This says nothing about attacked or occupied squares.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::NONE;
        for color in [White, Black] {
            let back_rank = color.back_rank() * 8;
            let unmoved = |sq: Square, piece_type: PieceType| {
                matches!(self.pieces[sq], Some(p) if p.is(piece_type, color) && !p.has_moved)
            };
            if !unmoved(back_rank + 4, PieceType::King) {
                continue;
            }
            if unmoved(back_rank + 7, PieceType::Rook) {
                rights.grant_kingside(color)
            }
            if unmoved(back_rank, PieceType::Rook) {
                rights.grant_queenside(color)
            }
        }
        rights
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history_entries.last().map(|h| h.move_played)
    }

    /*
    FEN STRING OPERATIONS
     */
    fn set_fen(&mut self, fen: &str) -> Result<()> {
        let malformed = |reason: &str| ChessError::MalformedPosition(format!("{} in \"{}\"", reason, fen));
        let mut sections = fen.split_whitespace();
        let piece_placement = sections.next().ok_or_else(|| malformed("empty position"))?;
        let side = sections.next().ok_or_else(|| malformed("missing side to move"))?;
        let castling = sections.next().ok_or_else(|| malformed("missing castling rights"))?;
        let ep_target = sections.next().ok_or_else(|| malformed("missing en passant target"))?;
        let halfmove = sections.next().unwrap_or("0");
        let fullmove = sections.next().unwrap_or("1");
        if sections.next().is_some() {
            return Err(malformed("trailing fields"));
        }

        self.side_to_move = match side {
            "w" => White,
            "b" => Black,
            _ => return Err(malformed("side to move must be w or b")),
        };
        self.halfmove_clock = halfmove.parse::<u32>().map_err(|_| malformed("bad halfmove clock"))?;
        self.fullmove_number = fullmove.parse::<u32>().map_err(|_| malformed("bad fullmove number"))?;
        if self.fullmove_number == 0 {
            return Err(malformed("fullmove number starts at 1"));
        }

        let ranks: Vec<&str> = piece_placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(malformed("expected 8 ranks"));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(malformed("bad empty square count"));
                    }
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or_else(|| malformed("unknown piece character"))?;
                    if file >= 8 {
                        return Err(malformed("rank overflows 8 files"));
                    }
                    self.add_piece(piece, rank * 8 + file);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(malformed("rank does not cover 8 files"));
            }
        }

        for color in [White, Black] {
            let kings = self.pieces_of(color).filter(|(_, p)| p.piece_type == PieceType::King).count();
            if kings != 1 {
                return Err(malformed("each side needs exactly one king"));
            }
        }
        if self.pieces().any(|(sq, p)| p.piece_type == PieceType::Pawn && (rank_of(sq) == 0 || rank_of(sq) == 7)) {
            return Err(malformed("pawn on a back rank"));
        }

        if castling != "-" && (castling.is_empty() || !castling.chars().all(|c| "KQkq".contains(c))) {
            return Err(malformed("castling rights must be a subset of KQkq or -"));
        }
        self.apply_movement_flags(CastlingRights::from_str(castling))
            .map_err(|reason| malformed(reason))?;

        self.ep_target = match ep_target {
            "-" => None,
            s => {
                let sq = parse_square(s).filter(|_| s.len() == 2).ok_or_else(|| malformed("bad en passant square"))?;
                let (expected_rank, pusher) = match self.side_to_move {
                    White => (5, Black),
                    Black => (2, White),
                };
                let pushed_pawn = (sq as i32 + 8 * pusher.forward()) as Square;
                let pawn_start = (sq as i32 - 8 * pusher.forward()) as Square;
                if rank_of(sq) != expected_rank
                    || self.pieces[sq].is_some()
                    || self.pieces[pawn_start].is_some()
                    || !matches!(self.pieces[pushed_pawn], Some(p) if p.is(PieceType::Pawn, pusher))
                {
                    return Err(malformed("en passant square is not behind a freshly pushed pawn"));
                }
                Some(sq)
            }
        };

        if self.in_check(self.side_to_move.opposite()) {
            return Err(malformed("the side not to move is in check"));
        }

        self.history_entries = Vec::with_capacity(128);
        Ok(())
    }

    /// FEN carries no per-piece flags: pawns off their starting rank have moved,
    /// kings and corner rooks are unmoved exactly when a castling right needs them
    fn apply_movement_flags(&mut self, rights: CastlingRights) -> std::result::Result<(), &'static str> {
        for sq in 0..64 {
            let Some(mut piece) = self.pieces[sq] else { continue };
            let back_rank = piece.color.back_rank();
            let (kingside, queenside) = rights.get(piece.color);
            piece.has_moved = match piece.piece_type {
                PieceType::Pawn => rank_of(sq) != piece.color.pawn_rank(),
                PieceType::King => !((kingside || queenside) && sq == back_rank * 8 + 4),
                PieceType::Rook => {
                    !((kingside && sq == back_rank * 8 + 7) || (queenside && sq == back_rank * 8))
                }
                _ => false,
            };
            self.pieces[sq] = Some(piece);
        }
        if self.castling_rights() != rights {
            return Err("castling rights need an unmoved king and rook on their home squares");
        }
        Ok(())
    }

    pub fn get_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_counter = 0;
            for file in 0..8 {
                match self.pieces[rank * 8 + file] {
                    Some(p) => {
                        if empty_counter != 0 { fen.push_str(&empty_counter.to_string()) }
                        empty_counter = 0;
                        fen.push_str(&p.to_string())
                    }
                    None => empty_counter += 1,
                }
            }
            if empty_counter != 0 { fen.push_str(&empty_counter.to_string()) }
            if rank != 0 { fen.push('/') }
        }

        fen.push_str(if self.side_to_move == White { " w " } else { " b " });
        fen.push_str(&self.castling_rights().to_string());
        match self.ep_target.and_then(square_representation) {
            Some(sq) => fen.push_str(&format!(" {} ", sq)),
            None => fen.push_str(" - "),
        }
        fen.push_str(&format!("{} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let side_info = [
            String::new(),
            format!("  side to move: {}", self.side_to_move),
            format!("  castling rights: {}", self.castling_rights()),
            format!(
                "  en passant: {}",
                self.ep_target.and_then(square_representation).unwrap_or_else(|| String::from("-"))
            ),
            format!("  halfmove clock: {} (move {})", self.halfmove_clock, self.fullmove_number),
            format!("  fen: {}", self.get_fen()),
            String::new(),
            String::new(),
        ];
        for (row, info) in side_info.iter().enumerate() {
            let rank = 7 - row;
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.pieces[rank * 8 + file] {
                    None => write!(f, ". ")?,
                    Some(p) => write!(f, "{} ", p)?,
                }
            }
            writeln!(f, "{}", info)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut Board, moves: &[&str]) {
        for mv in moves {
            board.make_from_str(mv).unwrap();
        }
    }

    #[test]
    fn starting_position_matches_fen() {
        let built = Board::starting_position();
        let parsed = Board::new(STARTING_POSITION).unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.get_fen(), STARTING_POSITION);
    }

    #[test]
    fn fen_round_trips() {
        for fen in [
            STARTING_POSITION,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "4k3/8/8/8/8/8/8/4K2R b K - 12 40",
        ] {
            assert_eq!(Board::new(fen).unwrap().get_fen(), fen);
        }
    }

    #[test]
    fn malformed_positions_are_rejected() {
        for fen in [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - zero 1",
            "rnbqqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN1 w KQkq - 0 1",
            "Pnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPPBPPP/RNBQK1NR b KQkq e3 0 1",
            "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1",
        ] {
            assert!(
                matches!(Board::new(fen), Err(ChessError::MalformedPosition(_))),
                "accepted {:?}",
                fen
            );
        }
        assert!(Board::new("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").is_ok());
    }

    #[test]
    fn kings_cannot_be_captured() {
        let mut board = Board::new("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
        assert!(board.in_check(Black));
        assert!(generate(&mut board).iter().all(|m| board.piece_type_on(m.target()) != Some(PieceType::King)));
        assert!(board.make_from_str("e8e7").is_err());
        board.make_from_str("e8d7").unwrap();
        assert!(Board::new(&board.get_fen()).is_ok());
    }

    #[test]
    fn make_then_unmake_restores_every_field() {
        for fen in [
            STARTING_POSITION,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        ] {
            let mut board = Board::new(fen).unwrap();
            let before = board.clone();
            for mv in &generate(&mut board) {
                board.make(*mv).unwrap();
                assert_ne!(board, before);
                board.unmake();
                assert_eq!(board, before, "{} did not unmake cleanly in {}", mv, fen);
            }
        }
    }

    #[test]
    fn clocks_and_side_to_move() {
        let mut board = Board::default();
        play(&mut board, &["g1f3"]);
        assert_eq!((board.halfmove_clock(), board.fullmove_number(), board.side_to_move()), (1, 1, Black));
        play(&mut board, &["b8c6"]);
        assert_eq!((board.halfmove_clock(), board.fullmove_number(), board.side_to_move()), (2, 2, White));
        play(&mut board, &["e2e4"]);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.en_passant_target(), parse_square("e3"));
        play(&mut board, &["c6d4", "f3d4"]);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(board.fullmove_number(), 3);
    }

    #[test]
    fn en_passant_capture_and_expiry() {
        let mut board = Board::default();
        play(&mut board, &["e2e4", "d7d5", "e4e5", "f7f5"]);
        assert_eq!(board.en_passant_target(), parse_square("f6"));
        let ep = Move::parse("e5f6").unwrap();
        assert!(generate(&mut board).iter().any(|m| *m == ep));

        let mut capture = board.clone();
        capture.make(ep).unwrap();
        assert_eq!(capture.piece_on(parse_square("f5").unwrap()), None);
        assert!(capture.piece_on(parse_square("f6").unwrap()).unwrap().is(PieceType::Pawn, White));
        capture.unmake();
        assert_eq!(capture, board);

        // declining it once loses it for good
        play(&mut board, &["b1c3", "g8h6"]);
        assert_eq!(board.en_passant_target(), None);
        assert!(matches!(board.make(ep), Err(ChessError::IllegalMove(_))));
    }

    #[test]
    fn castling_moves_both_pieces() {
        let mut board = Board::new("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut board, &["e1g1"]);
        assert!(board.piece_on(6).unwrap().is(PieceType::King, White));
        assert!(board.piece_on(5).unwrap().is(PieceType::Rook, White));
        assert_eq!(board.piece_on(7), None);
        assert_eq!(board.castling_rights().to_string(), "kq");
        play(&mut board, &["e8c8"]);
        assert!(board.piece_on(58).unwrap().is(PieceType::King, Black));
        assert!(board.piece_on(59).unwrap().is(PieceType::Rook, Black));
        assert_eq!(board.piece_on(56), None);
        assert_eq!(board.castling_rights().to_string(), "-");
        assert_eq!(board.last_move(), Move::parse("e8c8"));

        board.unmake();
        board.unmake();
        assert_eq!(board.last_move(), None);
        assert_eq!(board.get_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn moving_a_rook_drops_its_castling_side() {
        let mut board = Board::new("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut board, &["h1h2", "a8a7", "h2h1", "a7a8"]);
        assert_eq!(board.castling_rights().to_string(), "Qk");
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut board = Board::new("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        board.make(Move::new(48, 56)).unwrap();
        assert!(board.piece_on(56).unwrap().is(PieceType::Queen, White));
        board.unmake();
        board.make(Move::parse("a7a8n").unwrap()).unwrap();
        assert!(board.piece_on(56).unwrap().is(PieceType::Knight, White));
        board.unmake();
        assert!(board.piece_on(48).unwrap().is(PieceType::Pawn, White));
    }

    #[test]
    fn illegal_moves_leave_the_board_untouched() {
        let mut board = Board::default();
        let before = board.clone();
        for mv in ["e7e5", "e2e5", "e1e2", "a1a3", "d4d5"] {
            assert!(matches!(board.make_from_str(mv), Err(ChessError::IllegalMove(_))), "{}", mv);
        }
        assert!(matches!(board.make_from_str("zz"), Err(ChessError::NotationError(_))));
        assert_eq!(board, before);
        assert_eq!(board.unmake(), None);
    }

    #[test]
    fn display_shows_state() {
        let shown = Board::default().to_string();
        assert!(shown.contains("castling rights: KQkq"));
        assert!(shown.contains(STARTING_POSITION));
        assert!(shown.starts_with("8 r n b q k b n r"));
        assert!(shown.ends_with("a b c d e f g h"));
    }
}
