//! Search configuration and board constants

use crate::heuristic::Heuristic;

/// Smallest accepted board side length
pub const MIN_SIZE: usize = 3;

/// Separator between cells when a board is rendered as text
pub const CELL_DELIMITER: &str = " | ";

/// Knobs for a single search run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchConfig {
    /// Estimate used to rank frontier nodes
    pub heuristic: Heuristic,
    /// Render the solution path to stdout once the goal is found
    pub verbose: bool,
    /// Stop after this many expansions. `None` searches until the goal is
    /// found or the frontier runs dry.
    pub max_expansions: Option<u64>,
}

impl SearchConfig {
    #[must_use]
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_max_expansions(mut self, limit: u64) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
