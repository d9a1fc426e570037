//! Configuration for construction search.

use serde::Serialize;

use crate::search::Strategy;

/// Entity-count thresholds that decide what a world may construct next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstructionBudget {
    /// Circles are drawn while the world holds at most this many entities.
    pub circle_stage_max: usize,
    /// Lines are drawn while the world holds at most this many entities.
    pub line_stage_max: usize,
}

impl Default for ConstructionBudget {
    fn default() -> Self {
        Self {
            circle_stage_max: 3,
            line_stage_max: 5,
        }
    }
}

impl ConstructionBudget {
    /// Two circles, then three lines.
    pub fn hint() -> Self {
        Self {
            circle_stage_max: 2,
            ..Self::default()
        }
    }

    /// Largest entity count any branch can reach, the starting entity included.
    pub fn max_entities(&self) -> usize {
        self.circle_stage_max.max(self.line_stage_max) + 1
    }
}

/// Which driver to run and when to give up.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Stop after expanding this many states. `None` searches until the
    /// budget closes every branch.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::DepthFirst,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    pub fn depth_first() -> Self {
        Self::default()
    }

    pub fn breadth_first() -> Self {
        Self {
            strategy: Strategy::BreadthFirst,
            ..Self::default()
        }
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
