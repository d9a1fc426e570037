//! Construction search for straightedge-and-compass puzzles.
//!
//! [`search`] holds a generic depth-first and breadth-first driver over any
//! [`Problem`]; [`construction`] phrases a geometry puzzle as such a problem.

pub mod config;
pub mod construction;
pub mod search;

pub use config::{ConstructionBudget, SearchConfig};
pub use construction::{ConstructionProblem, Stage};
pub use search::{
    Problem, SearchOutcome, SearchStats, Solution, Strategy, Successors, breadth_first_search,
    depth_first_search, search,
};
