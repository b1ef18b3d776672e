//! Error types shared by the rules engine, the search and the shell.

use thiserror::Error;

/// Errors that can occur while manipulating a position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Coordinates outside of the 8x8 board
    #[error("invalid square: file {file}, rank {rank} (both must be 0-7)")]
    InvalidSquare { file: i32, rank: i32 },

    /// The move is not in the legal set of the selected piece
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The side to move has no legal move (checkmate or stalemate)
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A FEN string that cannot be turned into a valid board
    #[error("malformed position: {0}")]
    MalformedPosition(String),

    /// Move text that is neither coordinate nor algebraic notation
    #[error("unreadable move notation: {0}")]
    NotationError(String),
}

pub type Result<T> = std::result::Result<T, ChessError>;
