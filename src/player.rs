use std::time::Duration;

use rand::seq::SliceRandom;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::{ChessError, Result};
use crate::move_generator::generate;
use crate::r#move::Move;
use crate::search::{SearchFramework, SearchOptions, DEFAULT_DEPTH};

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

/// A move provider living outside the crate, typically a UCI engine process.
///
/// Given a FEN position and a time budget, it answers a move in coordinate
/// notation, or nothing when it failed. Replies are never trusted as is.
pub trait ExternalEngine: Send {
    fn name(&self) -> &str {
        "external engine"
    }

    fn best_move(&mut self, fen: &str, move_time: Duration) -> Option<String>;
}

/// Checks an engine reply against coordinate notation and the legal moves of the position
pub fn parse_engine_reply(board: &Board, reply: &str) -> Option<Move> {
    let reply = reply.trim();
    if !reply_regex().is_match(reply) {
        return None;
    }
    let mut position = board.clone();
    let mv = Move::parse(reply)?.or_queen_promotion(&position);
    if generate(&mut position).contains(&mv) {
        Some(mv)
    } else {
        None
    }
}

fn reply_regex() -> Regex {
    Regex::new(r"^[a-h][1-8][a-h][1-8][qrbn]?$").unwrap()
}

/// Computer opponent.
///
/// Asks the external engine first when one is plugged in, then falls back to
/// the internal search. A random legal move is the very last resort.
pub struct AiPlayer {
    difficulty: u8,
    depth: u8,
    threads: usize,
    engine: Option<Box<dyn ExternalEngine>>,
    search_framework: SearchFramework,
}
impl Default for AiPlayer {
    fn default() -> Self {
        AiPlayer::new(5)
    }
}
impl AiPlayer {
    pub fn new(difficulty: u8) -> AiPlayer {
        AiPlayer {
            difficulty: difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
            depth: DEFAULT_DEPTH,
            threads: 1,
            engine: None,
            search_framework: SearchFramework::new(),
        }
    }

    pub fn with_engine(mut self, engine: Box<dyn ExternalEngine>) -> AiPlayer {
        self.engine = Some(engine);
        self
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }
    pub fn set_difficulty(&mut self, level: u8) {
        self.difficulty = level.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
    }
    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth
    }
    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads
    }

    /// Thinking time granted for the current difficulty
    pub fn move_time(&self) -> Duration {
        Duration::from_millis(500 + 500 * self.difficulty as u64)
    }

    pub fn search_framework(&self) -> &SearchFramework {
        &self.search_framework
    }

    /// Picks a move for the side to move of `board`, which is left untouched
    pub fn choose_move(&mut self, board: &Board) -> Result<Move> {
        let legal_moves = generate(&mut board.clone());
        if legal_moves.is_empty() {
            return Err(ChessError::NoLegalMoves);
        }

        let move_time = self.move_time();
        if let Some(engine) = self.engine.as_mut() {
            let fen = board.get_fen();
            debug!(engine = engine.name(), %fen, ?move_time, "asking external engine");
            match engine.best_move(&fen, move_time) {
                Some(reply) => match parse_engine_reply(board, &reply) {
                    Some(mv) => {
                        info!(engine = engine.name(), %mv, "external engine move");
                        return Ok(mv);
                    }
                    None => warn!(engine = engine.name(), %reply, "rejected engine reply, searching instead"),
                },
                None => warn!(engine = engine.name(), "no reply from engine, searching instead"),
            }
        }

        let mut options = SearchOptions::default();
        options
            .set_depth(self.depth)
            .set_threads(self.threads)
            .set_time(Some(move_time));
        let search = self.search_framework.run_search(board, &options);
        if let Some(mv) = search.best_move {
            debug!(%search, "internal search move");
            return Ok(mv);
        }

        warn!("search produced no move, playing a random one");
        legal_moves
            .as_slice()
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(ChessError::NoLegalMoves)
    }
}
