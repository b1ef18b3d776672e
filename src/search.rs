use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::evaluation::{Evaluation, Score};
use crate::move_generator::{generate, has_legal_move};
use crate::piece::Color;
use crate::r#move::Move;

pub const DEFAULT_DEPTH: u8 = 3;
pub const MAX_DEPTH: u8 = 8;
const INFINITY: Score = Evaluation::MATE_SCORE + 1;

/// Groups together every knob of a search.
/// Avoids passing around 4 arguments in functions
#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub moves_to_search: Option<Vec<Move>>,
    pub max_depth: u8,
    pub max_time: Option<Duration>,
    pub threads: usize,
}
impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            moves_to_search: None,
            max_depth: DEFAULT_DEPTH,
            max_time: None,
            threads: 1,
        }
    }
}
impl SearchOptions {
    pub fn set_moves_to_search(&mut self, value: Option<Vec<Move>>) -> &mut Self {
        self.moves_to_search = value;
        self
    }
    pub fn set_depth(&mut self, value: u8) -> &mut Self {
        self.max_depth = value.clamp(1, MAX_DEPTH);
        self
    }
    pub fn set_time(&mut self, value: Option<Duration>) -> &mut Self {
        self.max_time = value;
        self
    }
    /// Bounded by the number of logical cores when the search starts
    pub fn set_threads(&mut self, value: usize) -> &mut Self {
        self.threads = value.max(1);
        self
    }
}

/// Outcome of a search run through the framework
#[derive(Clone, Debug, PartialEq)]
pub struct Search {
    /// False when the stop flag or the time budget cut the root moves short
    pub finished: bool,
    pub best_move: Option<Move>,
    pub score: Score,
    pub time: Duration,
    pub depth: u8,
    pub nodes_searched: u64,
}
impl Display for Search {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.time.as_secs_f64();
        let nps = if secs > 0.0 { (self.nodes_searched as f64 / secs) as u64 } else { 0 };
        write!(
            f,
            "depth {} time {} nodes {} nps {} score ",
            self.depth,
            self.time.as_millis(),
            self.nodes_searched,
            nps
        )?;
        if Evaluation::is_mate_score(self.score) {
            let plies = Evaluation::MATE_SCORE - self.score.abs();
            let moves = (plies + 1) / 2;
            write!(f, "mate {}", if self.score < 0 { -moves } else { moves })?;
        } else {
            write!(f, "cp {}", self.score)?;
        }
        match self.best_move {
            Some(m) => write!(f, " bestmove {}", m),
            None => write!(f, " bestmove (none)"),
        }
    }
}
impl Default for Search {
    fn default() -> Self {
        Search {
            finished: false,
            best_move: None,
            score: -INFINITY,
            time: Duration::ZERO,
            depth: 0,
            nodes_searched: 0,
        }
    }
}

/// Picks the move of `color` with the best minimax score at `max_depth` plies.
///
/// Root moves are tried in generation order and the first one reaching the
/// best score is kept. Returns `None` when `color` is not the side to move
/// or has no legal move.
pub fn best_move(board: &mut Board, color: Color, max_depth: u8) -> Option<Move> {
    if board.side_to_move() != color {
        debug!(%color, "asked for a move of the side not to move");
        return None;
    }
    let root_moves: Vec<(usize, Move)> = generate(board).iter().copied().enumerate().collect();
    let never_stop = || false;
    let mut context = SearchContext {
        perspective: color,
        nodes_searched: 0,
        interrupted: false,
        should_stop: &never_stop,
    };
    let start = Instant::now();
    let best = search_root(board, &root_moves, max_depth.max(1), &mut context);
    if let Some((_, mv, score)) = best {
        info!(
            best_move = %mv,
            score,
            nodes = context.nodes_searched,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );
    }
    best.map(|(_, mv, _)| mv)
}

/// Runs searches on a private copy of the position, splitting the root moves
/// between worker threads. A stop request or the time budget is noticed
/// between two root moves.
pub struct SearchFramework {
    stop_handle: Arc<AtomicBool>,
}
impl Default for SearchFramework {
    fn default() -> Self {
        Self::new()
    }
}
impl SearchFramework {
    pub fn new() -> SearchFramework {
        SearchFramework {
            stop_handle: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that interrupts the running search once set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_handle)
    }

    pub fn stop_search(&self) {
        self.stop_handle.store(true, Ordering::SeqCst);
    }

    /// Searches `position` for its side to move. The position itself is never touched.
    ///
    /// Each worker keeps the first of its root moves with the best score;
    /// merging keeps the best score and, among equals, the earliest root move,
    /// which is the move a single threaded search would have returned.
    pub fn run_search(&self, position: &Board, options: &SearchOptions) -> Search {
        let start = Instant::now();
        self.stop_handle.store(false, Ordering::SeqCst);

        let mut root_board = position.clone();
        let perspective = root_board.side_to_move();
        let depth = options.max_depth.clamp(1, MAX_DEPTH);
        let legal_moves = generate(&mut root_board);
        let mut root_moves: Vec<(usize, Move)> = legal_moves
            .iter()
            .copied()
            .filter(|m| options.moves_to_search.as_ref().map_or(true, |ms| ms.contains(m)))
            .enumerate()
            .collect();
        if root_moves.is_empty() && !legal_moves.is_empty() {
            warn!("none of the requested root moves is legal, searching every move");
            root_moves = legal_moves.iter().copied().enumerate().collect();
        }

        if root_moves.is_empty() {
            return Search {
                finished: true,
                score: Evaluation::terminal(&root_board, perspective, 0),
                time: start.elapsed(),
                depth,
                ..Default::default()
            };
        }

        let thread_count = options.threads.clamp(1, num_cpus::get()).min(root_moves.len());
        debug!(thread_count, root_moves = root_moves.len(), depth, "starting search");

        let stop_flag = &self.stop_handle;
        let max_time = options.max_time;
        let reports: Vec<WorkerReport> = thread::scope(|s| {
            let handles: Vec<_> = (0..thread_count)
                .map(|worker| {
                    let assigned: Vec<(usize, Move)> =
                        root_moves.iter().copied().skip(worker).step_by(thread_count).collect();
                    let mut board = position.clone();
                    s.spawn(move || {
                        let should_stop = || {
                            stop_flag.load(Ordering::Relaxed)
                                || max_time.map_or(false, |t| start.elapsed() >= t)
                        };
                        let mut context = SearchContext {
                            perspective,
                            nodes_searched: 0,
                            interrupted: false,
                            should_stop: &should_stop,
                        };
                        let best = search_root(&mut board, &assigned, depth, &mut context);
                        WorkerReport {
                            best,
                            nodes_searched: context.nodes_searched,
                            interrupted: context.interrupted,
                        }
                    })
                })
                .collect();
            handles
                .into_iter()
                .filter_map(|h| match h.join() {
                    Ok(report) => Some(report),
                    Err(_) => {
                        warn!("a search worker panicked, its root moves are ignored");
                        None
                    }
                })
                .collect()
        });

        let mut result = Search {
            finished: !reports.is_empty() && reports.iter().all(|r| !r.interrupted),
            depth,
            ..Default::default()
        };
        let mut best: Option<(usize, Move, Score)> = None;
        for report in &reports {
            result.nodes_searched += report.nodes_searched;
            if let Some(candidate) = report.best {
                best = match best {
                    Some(current) if current.2 > candidate.2 || (current.2 == candidate.2 && current.0 < candidate.0) => {
                        Some(current)
                    }
                    _ => Some(candidate),
                };
            }
        }
        if let Some((_, mv, score)) = best {
            result.best_move = Some(mv);
            result.score = score;
        }
        result.time = start.elapsed();
        info!(%result, "search done");
        result
    }
}

struct WorkerReport {
    best: Option<(usize, Move, Score)>,
    nodes_searched: u64,
    interrupted: bool,
}

struct SearchContext<'a> {
    perspective: Color,
    nodes_searched: u64,
    interrupted: bool,
    should_stop: &'a dyn Fn() -> bool,
}

/// Searches the given (index, move) root moves in order, returning the first
/// one reaching the best score. The first move is always searched.
fn search_root(
    position: &mut Board,
    root_moves: &[(usize, Move)],
    depth: u8,
    context: &mut SearchContext,
) -> Option<(usize, Move, Score)> {
    let mut best = None;
    let mut alpha = -INFINITY;
    for (searched, &(index, mv)) in root_moves.iter().enumerate() {
        if searched != 0 && (context.should_stop)() {
            context.interrupted = true;
            break;
        }
        position.make_unchecked(mv);
        let score = alpha_beta(position, alpha, INFINITY, depth - 1, 1, context);
        position.unmake();
        debug!(root_move = %mv, score, "root move searched");

        if score > alpha {
            alpha = score;
            best = Some((index, mv, score));
        }
    }
    best
}

/// Minimax with alpha-beta pruning, the maximizing side being the perspective's
fn alpha_beta(
    position: &mut Board,
    mut alpha: Score,
    mut beta: Score,
    depth: u8,
    ply: u32,
    context: &mut SearchContext,
) -> Score {
    context.nodes_searched += 1;
    let side = position.side_to_move();

    if depth == 0 {
        return if has_legal_move(position, side) {
            Evaluation::evaluate(position, context.perspective)
        } else {
            Evaluation::terminal(position, context.perspective, ply)
        };
    }

    let moves = generate(position);
    if moves.is_empty() {
        return Evaluation::terminal(position, context.perspective, ply);
    }
    let moves_iter = moves.best_first_iter(&|m: &Move| Evaluation::mvv_lva(position, m));

    if side == context.perspective {
        let mut best_score = -INFINITY;
        for mv in moves_iter {
            position.make_unchecked(*mv);
            let score = alpha_beta(position, alpha, beta, depth - 1, ply + 1, context);
            position.unmake();
            best_score = best_score.max(score);
            alpha = alpha.max(best_score);
            if beta <= alpha {
                break;
            }
        }
        best_score
    } else {
        let mut best_score = INFINITY;
        for mv in moves_iter {
            position.make_unchecked(*mv);
            let score = alpha_beta(position, alpha, beta, depth - 1, ply + 1, context);
            position.unmake();
            best_score = best_score.min(score);
            beta = beta.min(best_score);
            if beta <= alpha {
                break;
            }
        }
        best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTING_POSITION;
    use crate::piece::Color::{Black, White};

    const POSITIONS: [&str; 4] = [
        STARTING_POSITION,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    ];

    #[test]
    fn best_move_is_always_legal() {
        for fen in POSITIONS {
            let mut board = Board::new(fen).unwrap();
            let before = board.clone();
            let side = board.side_to_move();
            let mv = best_move(&mut board, side, 2).unwrap();
            assert_eq!(board, before, "search left the board modified");
            assert!(generate(&mut board).contains(&mv), "{} is not legal in {}", mv, fen);
        }
    }

    #[test]
    fn takes_a_hanging_queen() {
        let mut board = Board::new("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        assert_eq!(best_move(&mut board, White, 2), Move::parse("d1d5"));
    }

    #[test]
    fn finds_back_rank_mate() {
        let mut board = Board::new("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        assert_eq!(best_move(&mut board, White, 1), Move::parse("a1a8"));
        assert_eq!(best_move(&mut board, White, 3), Move::parse("a1a8"));

        let search = SearchFramework::new().run_search(&board, SearchOptions::default().set_depth(3));
        assert_eq!(search.best_move, Move::parse("a1a8"));
        assert_eq!(search.score, Evaluation::MATE_SCORE - 1);
        assert!(search.to_string().contains("score mate 1"));
    }

    #[test]
    fn removes_the_mating_piece() {
        // Ra8 would be mate, taking the rook with check wins material and the game
        let mut board = Board::new("6k1/5ppp/8/8/8/8/1q6/R5K1 b - - 0 1").unwrap();
        assert_eq!(best_move(&mut board, Black, 2), Move::parse("b2a1"));
    }

    #[test]
    fn no_move_sentinel() {
        let mut stalemate = Board::new("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(best_move(&mut stalemate, Black, 3), None);
        let search = SearchFramework::new().run_search(&stalemate, &SearchOptions::default());
        assert_eq!(search.best_move, None);
        assert_eq!(search.score, Evaluation::DRAW_SCORE);

        let mut board = Board::default();
        assert_eq!(best_move(&mut board, Black, 2), None);
    }

    #[test]
    fn threads_do_not_change_the_result() {
        for fen in POSITIONS {
            let board = Board::new(fen).unwrap();
            let framework = SearchFramework::new();
            let single = framework.run_search(&board, SearchOptions::default().set_depth(2));
            let multi = framework.run_search(&board, SearchOptions::default().set_depth(2).set_threads(4));
            assert!(single.finished && multi.finished);
            assert_eq!(single.score, multi.score, "{}", fen);
            assert_eq!(single.best_move, multi.best_move, "{}", fen);

            let mut copy = board.clone();
            let side = copy.side_to_move();
            assert_eq!(best_move(&mut copy, side, 2), single.best_move);
        }
    }

    #[test]
    fn time_budget_interrupts_between_root_moves() {
        let board = Board::default();
        let search = SearchFramework::new().run_search(
            &board,
            SearchOptions::default().set_depth(3).set_time(Some(Duration::ZERO)),
        );
        assert!(!search.finished);
        // The first root move is searched no matter what
        assert!(search.best_move.is_some());
    }

    #[test]
    fn stop_handle_is_shared() {
        let framework = SearchFramework::new();
        let handle = framework.stop_handle();
        framework.stop_search();
        assert!(handle.load(Ordering::SeqCst));
        // A new search clears a stale request
        let search = framework.run_search(&Board::default(), SearchOptions::default().set_depth(1));
        assert!(search.finished);
        assert!(!handle.load(Ordering::SeqCst));
    }

    #[test]
    fn root_moves_can_be_restricted() {
        let board = Board::new("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let only = vec![Move::parse("e1e2").unwrap(), Move::parse("d1d4").unwrap()];
        let search = SearchFramework::new()
            .run_search(&board, SearchOptions::default().set_depth(2).set_moves_to_search(Some(only.clone())));
        assert!(only.contains(&search.best_move.unwrap()));
    }

    #[test]
    fn unusable_root_restriction_is_ignored() {
        let board = Board::new("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let unrestricted = SearchFramework::new().run_search(&board, SearchOptions::default().set_depth(2));
        for only in [vec![], vec![Move::parse("e1e3").unwrap()]] {
            let search = SearchFramework::new()
                .run_search(&board, SearchOptions::default().set_depth(2).set_moves_to_search(Some(only)));
            assert!(search.finished);
            assert_eq!(search.best_move, unrestricted.best_move);
            assert_eq!(search.score, unrestricted.score);
        }
    }
}
