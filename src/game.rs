use std::fmt::{Display, Formatter};

use tracing::{debug, info};

use crate::board::Board;
use crate::error::{ChessError, Result};
use crate::move_generator::legal_targets;
use crate::notation::{parse_move, to_algebraic};
use crate::piece::Color;
use crate::r#move::Move;
use crate::square::{from_coords, Square};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but can still answer it
    Check,
    Checkmate { winner: Color },
    Stalemate,
}
impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}
impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate { winner: Color::White } => write!(f, "checkmate, white wins"),
            GameStatus::Checkmate { winner: Color::Black } => write!(f, "checkmate, black wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// A game being played: the live board and the moves that led to it, in algebraic notation
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    move_list: Vec<String>,
}
impl Default for Game {
    fn default() -> Self {
        Game {
            board: Board::default(),
            move_list: Vec::new(),
        }
    }
}
impl Game {
    pub fn new() -> Game {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Game> {
        Ok(Game {
            board: Board::new(fen)?,
            move_list: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Legal destinations of the piece on (file, rank), both counted from 0.
    /// Only pieces of the side to move can be selected.
    pub fn select(&mut self, file: i32, rank: i32) -> Result<Vec<Square>> {
        let sq = from_coords(file, rank)?;
        let piece = self
            .board
            .piece_on(sq)
            .ok_or_else(|| ChessError::IllegalMove(format!("no piece on {}", sq_name(sq))))?;
        if piece.color != self.board.side_to_move() {
            return Err(ChessError::IllegalMove(format!(
                "the piece on {} does not belong to the side to move",
                sq_name(sq)
            )));
        }
        Ok(legal_targets(&mut self.board, sq))
    }

    /// Plays a legal move of the side to move, returning it in algebraic notation
    pub fn play(&mut self, mv: Move) -> Result<String> {
        if self.status().is_over() {
            return Err(ChessError::NoLegalMoves);
        }
        let san = to_algebraic(&mut self.board, mv)?;
        self.board.make(mv)?;
        self.move_list.push(san.clone());
        debug!(%mv, %san, "move played");

        let status = self.status();
        if status.is_over() {
            info!(%status, moves = self.move_list.len(), "game over");
        }
        Ok(san)
    }

    /// Plays a move given in coordinate or algebraic notation
    pub fn play_str(&mut self, text: &str) -> Result<String> {
        if self.status().is_over() {
            return Err(ChessError::NoLegalMoves);
        }
        let mv = parse_move(&mut self.board, text)?;
        self.play(mv)
    }

    /// Takes back the last move, if any
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.board.unmake()?;
        self.move_list.pop();
        Some(entry.move_played)
    }

    pub fn status(&mut self) -> GameStatus {
        let side = self.board.side_to_move();
        if self.board.is_checkmate(side) {
            GameStatus::Checkmate { winner: side.opposite() }
        } else if self.board.is_stalemate(side) {
            GameStatus::Stalemate
        } else if self.board.in_check(side) {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn fen(&self) -> String {
        self.board.get_fen()
    }

    pub fn moves(&self) -> &[String] {
        &self.move_list
    }

    /// Numbered move list, one full move per line ("1. e4 e5")
    pub fn formatted_moves(&self) -> String {
        self.move_list
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| format!("{}. {}", i + 1, pair.join(" ")))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

fn sq_name(sq: Square) -> String {
    crate::square::square_representation(sq).unwrap_or_default()
}
