//! Move choice by random playouts.
//!
//! Every root move is scored by finishing the game many times with
//! uniformly random legal moves. Root moves take turns, one playout each,
//! until the time budget runs out or the search is stopped.

use board88_engine::{generate_moves, Board, Check, Color, Move};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use uci::GoOptions;

/// Share of the remaining clock spent on one move.
const CLOCK_FRACTION: u64 = 40;

/// When a search has to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// `None` searches until stopped.
    pub budget: Option<Duration>,
    /// Playouts still running past this full-move number are draws.
    pub max_fullmoves: u32,
}

impl SearchLimits {
    /// Budget from `go`: `infinite`, then `movetime`, then a fraction of the
    /// mover's clock, then `default_movetime_ms`.
    pub fn from_go(
        opts: &GoOptions,
        side: Color,
        default_movetime_ms: u64,
        max_fullmoves: u32,
    ) -> Self {
        let clock = match side {
            Color::White => opts.wtime,
            Color::Black => opts.btime,
        };
        let budget = if opts.infinite {
            None
        } else if let Some(ms) = opts.movetime {
            Some(Duration::from_millis(ms))
        } else if let Some(ms) = clock {
            Some(Duration::from_millis(ms / CLOCK_FRACTION))
        } else {
            Some(Duration::from_millis(default_movetime_ms))
        };
        Self {
            budget,
            max_fullmoves,
        }
    }
}

/// What a finished search found.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// `None` when the root position has no legal move.
    pub best: Option<Move>,
    /// Summed playout results of `best`.
    pub score: i64,
    /// Playouts run for `best`.
    pub visits: u64,
    pub playouts: u64,
    /// Moves played across all playouts.
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SearchReport {
    /// Mean result of the best move scaled to -100..=100.
    pub fn score_cp(&self) -> i32 {
        if self.visits == 0 {
            return 0;
        }
        (self.score * 100 / self.visits as i64) as i32
    }

    pub fn nps(&self) -> u64 {
        let micros = self.elapsed.as_micros().max(1) as u64;
        self.nodes.saturating_mul(1_000_000) / micros
    }
}

/// Runs playouts for every legal move of `board` and returns the best.
///
/// `stop` is polled between playouts. Ties go to the move generated first.
pub fn search(
    board: &Board,
    limits: &SearchLimits,
    stop: &AtomicBool,
    rng: &mut impl Rng,
) -> SearchReport {
    let start = Instant::now();
    let mut root = *board;
    let root_side = root.side_to_move();
    let moves = generate_moves(&mut root);

    let mut scores = vec![0i64; moves.len()];
    let mut visits = vec![0u64; moves.len()];
    let mut playouts = 0u64;
    let mut nodes = 0u64;

    if !moves.is_empty() {
        'rounds: loop {
            for (i, &m) in moves.iter().enumerate() {
                if stop.load(Ordering::Relaxed)
                    || limits.budget.is_some_and(|b| start.elapsed() >= b)
                {
                    break 'rounds;
                }
                let mut child = root;
                child.make_move(m);
                let (result, played) = playout(&mut child, root_side, limits.max_fullmoves, rng);
                scores[i] += result;
                visits[i] += 1;
                playouts += 1;
                nodes += played + 1;
            }
        }
    }

    let mut best = None;
    for i in 0..moves.len() {
        match best {
            Some(b) if scores[i] <= scores[b] => {}
            _ => best = Some(i),
        }
    }
    let elapsed = start.elapsed();
    tracing::debug!(playouts, nodes, ?elapsed, "search finished");

    SearchReport {
        best: best.map(|i| moves[i]),
        score: best.map_or(0, |i| scores[i]),
        visits: best.map_or(0, |i| visits[i]),
        playouts,
        nodes,
        elapsed,
    }
}

/// Plays random legal moves until the game ends. Returns the result for
/// `root_side` (+1 win, -1 loss, 0 draw) and the number of moves played.
fn playout(
    board: &mut Board,
    root_side: Color,
    max_fullmoves: u32,
    rng: &mut impl Rng,
) -> (i64, u64) {
    let mut played = 0;
    loop {
        let moves = generate_moves(board);
        if moves.is_empty() {
            let result = match board.check() {
                Check::None => 0,
                _ if board.side_to_move() == root_side => -1,
                _ => 1,
            };
            return (result, played);
        }
        if board.fullmove_number() > max_fullmoves {
            return (0, played);
        }
        let m = moves[rng.random_range(0..moves.len())];
        board.make_move(m);
        played += 1;
    }
}
