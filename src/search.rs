//! Best-first search driver.
//!
//! Each iteration selects the open node with the lowest `f = g + h`, stops if
//! it is the goal, and otherwise closes it and merges its children into the
//! frontier. Closed boards are never reopened, even if a cheaper path to one
//! turns up later.

use tracing::{debug, info, trace};

use crate::config::SearchConfig;
use crate::frontier::{ClosedSet, Frontier};
use crate::heuristic::Heuristic;
use crate::node::{NodeArena, NodeId};
use crate::puzzle::Board;
use crate::render;

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The start board failed validation; nothing was searched.
    Invalid,
    Solved,
    /// The frontier ran dry without reaching the goal.
    NoSolution,
    /// The configured expansion limit was hit first.
    BudgetExhausted,
}

impl SolveStatus {
    /// Numeric status: -1 invalid, 0 solved, 1 no solution, 2 budget
    /// exhausted.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Invalid => -1,
            Self::Solved => 0,
            Self::NoSolution => 1,
            Self::BudgetExhausted => 2,
        }
    }
}

/// Result of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    /// Slides from the start to the goal. Zero unless solved.
    pub steps: usize,
    /// Largest frontier size observed. Zero for invalid input.
    pub max_frontier: usize,
    pub status: SolveStatus,
    /// Number of nodes expanded.
    pub expanded: u64,
}

impl SolveReport {
    fn invalid() -> Self {
        Self {
            steps: 0,
            max_frontier: 0,
            status: SolveStatus::Invalid,
            expanded: 0,
        }
    }

    /// `(steps, max_frontier, status_code)`.
    #[must_use]
    pub fn as_tuple(&self) -> (usize, usize, i32) {
        (self.steps, self.max_frontier, self.status.code())
    }
}

/// Validate `rows` as a `size`×`size` board and solve it.
///
/// Invalid input yields [`SolveStatus::Invalid`] with zero counts.
pub fn solve_puzzle(
    size: usize,
    rows: &[Vec<u32>],
    heuristic: Heuristic,
    verbose: bool,
) -> SolveReport {
    match Board::from_rows(size, rows) {
        Ok(board) => solve_with_config(board, &SearchConfig::new(heuristic).with_verbose(verbose)),
        Err(err) => {
            info!(%err, "rejected start board");
            SolveReport::invalid()
        }
    }
}

/// Solve an already validated board.
pub fn solve_with_config(board: Board, config: &SearchConfig) -> SolveReport {
    info!(
        size = board.size(),
        heuristic = %config.heuristic,
        max_expansions = ?config.max_expansions,
        "starting search"
    );

    let mut search = Search::new(board, config);
    let outcome = loop {
        if let Some(outcome) = search.step() {
            break outcome;
        }
    };

    let report = search.report(outcome);
    info!(
        status = ?report.status,
        steps = report.steps,
        max_frontier = report.max_frontier,
        expanded = report.expanded,
        "search finished"
    );

    if config.verbose {
        if let Outcome::Goal(goal) = outcome {
            render::print_path(&search.arena, goal);
        }
    }
    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Goal(NodeId),
    Exhausted,
    OverBudget,
}

/// State of one run, advanced one expansion at a time.
struct Search {
    arena: NodeArena,
    frontier: Frontier,
    closed: ClosedSet,
    heuristic: Heuristic,
    max_expansions: Option<u64>,
    expanded: u64,
}

impl Search {
    fn new(board: Board, config: &SearchConfig) -> Self {
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let root = arena.root(board, config.heuristic);
        frontier.push(&arena, root);

        Self {
            arena,
            frontier,
            closed: ClosedSet::new(),
            heuristic: config.heuristic,
            max_expansions: config.max_expansions,
            expanded: 0,
        }
    }

    /// Select, goal-test and expand one node. `None` means keep going.
    fn step(&mut self) -> Option<Outcome> {
        let Some(best) = self.frontier.peek_best() else {
            return Some(Outcome::Exhausted);
        };
        if self.arena.get(best).board.is_goal() {
            return Some(Outcome::Goal(best));
        }
        if self.max_expansions.is_some_and(|limit| self.expanded >= limit) {
            debug!(expanded = self.expanded, "expansion budget spent");
            return Some(Outcome::OverBudget);
        }

        self.frontier.pop_best(&self.arena);
        self.closed.insert(self.arena.get(best).board.clone());
        self.expanded += 1;

        let node = self.arena.get(best);
        trace!(
            node = best.index(),
            g = node.g_cost,
            h = node.h_cost,
            open = self.frontier.len(),
            "expanding"
        );

        for child in self.arena.children(best, self.heuristic) {
            let outcome = self.frontier.merge(&mut self.arena, &self.closed, child);
            trace!(?outcome, "merged child");
        }
        None
    }

    fn report(&self, outcome: Outcome) -> SolveReport {
        let (status, steps) = match outcome {
            Outcome::Goal(goal) => (SolveStatus::Solved, self.arena.depth(goal)),
            Outcome::Exhausted => (SolveStatus::NoSolution, 0),
            Outcome::OverBudget => (SolveStatus::BudgetExhausted, 0),
        };
        SolveReport {
            steps,
            max_frontier: self.frontier.high_water(),
            status,
            expanded: self.expanded,
        }
    }
}
