//! A* best-first search with branch-and-bound pruning.
//!
//! Explores partial tours in order of `f = g + h`, where `g` is the cost of
//! the path so far and `h` an admissible estimate of the cost to finish.
//! Once a complete tour is known, branches that cannot beat it are cut.
//! The search keeps going until the frontier is empty, so the returned tour
//! is optimal whenever the heuristic never overestimates.
//!
//! # Key Components
//!
//! - [`SearchEngine`]: step-wise driver owning the frontier and incumbent
//! - [`Frontier`]: binary-heap open set
//! - [`PartialTourState`]: immutable search-tree node with a shared path
//! - [`Heuristic`]: lower-bound trait, with [`NearestUnvisited`],
//!   [`MinIncomingEdges`], and [`ZeroHeuristic`]
//!
//! # References
//!
//! - Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//!   Determination of Minimum Cost Paths"
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete
//!   Programming Problems"

mod config;
mod frontier;
mod heuristic;
mod runner;
mod state;

pub use config::{AStarConfig, PruningRule};
pub use frontier::Frontier;
pub use heuristic::{Heuristic, HeuristicKind, MinIncomingEdges, NearestUnvisited, ZeroHeuristic};
pub use runner::{AStarResult, AStarRunner, BestSolution, EngineState, SearchEngine};
pub use state::{PartialTourState, TourPath, VisitedSet};
