#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::time::Instant;
use mimalloc::MiMalloc;

use crate::board::{Board, STARTING_POSITION};
use crate::move_generator::generate;

pub mod board;
pub mod castling;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod history;
pub mod move_generator;
pub mod movelist;
pub mod notation;
pub mod piece;
pub mod player;
pub mod r#move;
pub mod search;
pub mod shell;
pub mod square;
mod attacks;

pub use crate::error::{ChessError, Result};

/// Prints the perft node counts of a position (the starting one by default)
/// for every depth up to `depth`
pub fn run_perft(depth: u32, fen: Option<String>) -> Result<()> {
    let mut board = Board::new(fen.as_deref().unwrap_or(STARTING_POSITION))?;
    println!("{}\n", board);
    println!("depth nodes\n--------");
    for d in 0..depth + 1 {
        let start = Instant::now();
        let nodes = perft(&mut board, d);
        let elapsed = start.elapsed();
        println!("{}     {} ({}s, {} nps)", d, nodes, elapsed.as_secs_f32(), nodes as f32 / elapsed.as_secs_f32());
    }
    Ok(())
}

/// Counts the leaf nodes of the legal move tree, `depth` plies deep
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 { return 1 }
    let moves = generate(board);
    if depth == 1 { return moves.len() as u64 }
    let mut nodes = 0u64;
    for mv in &moves {
        board.make_unchecked(*mv);
        nodes += perft(board, depth - 1);
        board.unmake();
    }
    nodes
}
