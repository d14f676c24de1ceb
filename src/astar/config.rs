//! A* search configuration.

use super::heuristic::HeuristicKind;
use crate::error::{TspError, TspResult};
use crate::model::City;

/// When a branch is cut against the incumbent tour cost.
///
/// Every rule yields the same optimal cost; they differ only in how much of
/// the tree is explored. Pruning stays inactive until the first complete
/// tour is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PruningRule {
    /// Expand everything.
    Disabled,
    /// Cut a successor when its accumulated cost `g` reaches the incumbent.
    #[default]
    PartialCost,
    /// Cut a successor when `f = g + h` reaches the incumbent.
    Estimate,
}

/// Configuration for the A* branch-and-bound search.
///
/// # Examples
///
/// ```
/// use u_tsp::astar::{AStarConfig, HeuristicKind, PruningRule};
///
/// let config = AStarConfig::default()
///     .with_heuristic(HeuristicKind::MinIncomingEdges)
///     .with_pruning(PruningRule::Estimate)
///     .with_time_limit_ms(5_000);
/// assert_eq!(config.origin, 0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AStarConfig {
    /// City every tour starts and ends at.
    pub origin: City,

    /// Branch-and-bound cutoff.
    pub pruning: PruningRule,

    /// Lower bound used to order the frontier.
    pub heuristic: HeuristicKind,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked before every expansion. When it fires, the search returns
    /// the best tour found so far with [`SearchStatus::TimedOut`](crate::model::SearchStatus).
    pub time_limit_ms: Option<u64>,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            origin: 0,
            pruning: PruningRule::default(),
            heuristic: HeuristicKind::default(),
            time_limit_ms: None,
        }
    }
}

impl AStarConfig {
    pub fn with_origin(mut self, origin: City) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_pruning(mut self, pruning: PruningRule) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration against an instance of `cities` cities.
    pub fn validate(&self, cities: usize) -> TspResult<()> {
        if self.origin >= cities {
            return Err(TspError::InvalidOrigin {
                origin: self.origin,
                cities,
            });
        }
        Ok(())
    }
}
