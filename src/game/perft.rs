//! # Perft testing/benchmarking
//!
//! Counts the leaves of the legal move tree. Every promotion counts once per
//! possible piece, and castles count once per notation they are offered in.

use std::time::Instant;

use super::{
    action::{Move, MoveOutcome},
    piece::PieceKind,
    position::Position,
};

/// Builder pattern to configure a Perft test.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerftConfig {
    pub depth: u8,
    pub iterative: bool,
    pub bulk_counting: bool,
    pub divide: bool,

    pub bench: bool,

    pub show_board: bool,
}
impl PerftConfig {
    /// Whether to show the board at the start of the run.
    ///
    /// Should be disabled when trying to parse the output.
    pub fn show_board(mut self, value: bool) -> Self {
        self.show_board = value;
        self
    }

    /// Sets the maximum depth of the perft run.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// If set to true, the run will start from all depth between 1 and the maximum.
    pub fn iterative_deepening(mut self, value: bool) -> Self {
        self.iterative = value;
        self
    }

    /// If set to true, simply returns the number of the legal moves at horizon nodes.
    pub fn bulk_counting(mut self, value: bool) -> Self {
        self.bulk_counting = value;
        self
    }

    /// Shows perft results per legal move at the starting position.
    pub fn divide_moves(mut self, value: bool) -> Self {
        self.divide = value;
        self
    }

    /// Measures the time it takes to complete one depth.
    pub fn benchmark(mut self, value: bool) -> Self {
        self.bench = value;
        self
    }

    /// Runs a Perft test on the given position, printing the results.
    pub fn go(&self, position: &Position) {
        if self.show_board {
            println!("{position}");
        }

        for depth in (if self.iterative { 1 } else { self.depth })..=self.depth {
            if self.iterative && self.divide {
                println!("====== DEPTH {depth} ======")
            }
            let start = Instant::now();
            let nodes: u64 = children(position)
                .map(|(label, child)| {
                    let nodes = perft(&child, depth.saturating_sub(1), self.bulk_counting);
                    if self.divide {
                        println!("{label}: {nodes} nodes");
                    }
                    nodes
                })
                .sum();
            let elapsed = start.elapsed().as_secs_f64();
            println!("depth {depth}: {nodes} nodes");
            if self.bench {
                println!(
                    "\ttook {} ({})",
                    human_readable_time(elapsed),
                    human_readable_nps(nodes as f64 / elapsed)
                );
            }
        }
    }
}

/// Traverses all nodes accessible from a given position, returning the number of
/// leaves at `depth_left` plies.
pub fn perft(position: &Position, depth_left: u8, bulk_counting: bool) -> u64 {
    if depth_left == 0 {
        1
    } else if depth_left == 1 && bulk_counting {
        position
            .moves()
            .iter()
            .map(|&mv| {
                if promotes(position, mv) {
                    PieceKind::PROMOTIONS.len() as u64
                } else {
                    1
                }
            })
            .sum()
    } else {
        children(position)
            .map(|(_, child)| perft(&child, depth_left - 1, bulk_counting))
            .sum()
    }
}

/// Every position reachable in one ply, labelled with the move that leads there.
fn children(position: &Position) -> impl Iterator<Item = (String, Position)> + '_ {
    position
        .moves()
        .iter()
        .flat_map(move |&mv| expand(position, mv))
}

fn promotes(position: &Position, mv: Move) -> bool {
    matches!(
        position.piece_on(mv.from),
        Some((PieceKind::Pawn, colour)) if mv.to.rank() == colour.promotion_rank()
    )
}

fn expand(position: &Position, mv: Move) -> Vec<(String, Position)> {
    let mut child = position.clone();
    match child.apply_move(mv) {
        MoveOutcome::Applied => vec![(mv.to_string(), child)],
        MoveOutcome::AppliedPendingPromotion { .. } => PieceKind::PROMOTIONS
            .iter()
            .map(|&kind| {
                let mut promoted = child.clone();
                promoted.resolve_promotion(kind);
                (format!("{mv}{kind}"), promoted)
            })
            .collect(),
        MoveOutcome::Rejected => vec![],
    }
}

fn human_readable_time(secs: f64) -> String {
    if secs < 0.001 {
        format!("{:.3}μs", secs * 1_000_000.)
    } else if secs < 1. {
        format!("{:.3}ms", secs * 1_000.)
    } else {
        format!("{secs:.3}s")
    }
}

fn human_readable_nps(nps: f64) -> String {
    if nps > 1_000_000_000. {
        format!("{:.3}Gnps", nps / 1_000_000_000.)
    } else if nps > 1_000_000. {
        format!("{:.3}Mnps", nps / 1_000_000.)
    } else if nps > 1_000. {
        format!("{:.3}Knps", nps / 1_000.)
    } else {
        format!("{nps:.3}nps")
    }
}
