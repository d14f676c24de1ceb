//! A* branch-and-bound execution engine.
//!
//! # Algorithm
//!
//! 1. Seed the frontier with the partial tour `[origin]`
//! 2. Pop the state with the smallest `f = g + h`:
//!    a. Discard it if it can no longer beat the incumbent
//!    b. If it holds every city, close it with the return edge and keep it
//!       when it strictly improves the incumbent
//!    c. Otherwise push one successor per unvisited city, cutting those
//!       whose cost already reaches the incumbent
//! 3. Stop when the frontier is empty (the incumbent is optimal), or when
//!    the deadline or cancellation flag fires (the incumbent is the best
//!    tour seen so far)
//!
//! The search is exhaustive branch-and-bound rather than early-exit A*, so
//! optimality does not depend on tie-breaking or on heuristic consistency,
//! only on admissibility.

use super::config::{AStarConfig, PruningRule};
use super::frontier::Frontier;
use super::heuristic::{Heuristic, HeuristicKind};
use super::state::{PartialTourState, VisitedSet};
use crate::error::{TspError, TspResult};
use crate::model::{City, CostMatrix, SearchStats, SearchStatus, Tour};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Lifecycle of a [`SearchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// The frontier holds states to expand.
    Running,
    /// The frontier is empty.
    Terminated,
}

/// Incumbent tour. Replaced only on strict improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSolution {
    /// `f64::INFINITY` until the first complete tour.
    pub cost: f64,
    /// Closed tour, origin first and last.
    pub tour: Option<Vec<City>>,
}

impl Default for BestSolution {
    fn default() -> Self {
        Self {
            cost: f64::INFINITY,
            tour: None,
        }
    }
}

impl BestSolution {
    pub fn to_tour(&self) -> Option<Tour> {
        self.tour.as_ref().map(|cities| Tour {
            cities: cities.clone(),
            cost: self.cost,
        })
    }
}

/// Result of an A* run.
#[derive(Debug, Clone)]
pub struct AStarResult {
    /// Best tour found, `None` when no tour was completed.
    pub best: Option<Tour>,

    /// How the search ended.
    pub status: SearchStatus,

    /// Expansion and pruning counters.
    pub stats: SearchStats,

    /// Wall-clock time since `initialize`.
    pub elapsed: Duration,

    /// Incumbent cost after each improvement, strictly decreasing.
    pub cost_history: Vec<f64>,
}

impl AStarResult {
    /// Cost of the best tour, `f64::INFINITY` when there is none.
    pub fn best_cost(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |t| t.cost)
    }
}

/// Best-first search over partial tours with branch-and-bound pruning.
///
/// The engine borrows the cost matrix and exclusively owns its frontier and
/// incumbent. It can be driven one [`step`](SearchEngine::step) at a time or
/// with [`run_to_completion`](SearchEngine::run_to_completion).
///
/// # Examples
///
/// ```
/// use u_tsp::astar::{AStarConfig, EngineState, SearchEngine};
/// use u_tsp::model::CostMatrix;
///
/// let matrix = CostMatrix::new(vec![vec![0.0, 5.0], vec![7.0, 0.0]]).unwrap();
/// let mut engine = SearchEngine::new(&matrix, &AStarConfig::default()).unwrap();
/// engine.initialize(0).unwrap();
/// while engine.step() == EngineState::Running {}
/// assert_eq!(engine.best_solution().cost, 12.0);
/// ```
pub struct SearchEngine<'a, H: Heuristic = HeuristicKind> {
    matrix: &'a CostMatrix,
    heuristic: H,
    pruning: PruningRule,
    time_limit: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,

    origin: City,
    frontier: Frontier,
    best: BestSolution,
    stats: SearchStats,
    cost_history: Vec<f64>,
    state: EngineState,
    started: Option<Instant>,
}

impl<'a> SearchEngine<'a, HeuristicKind> {
    /// Creates an engine using the heuristic named in `config`.
    pub fn new(matrix: &'a CostMatrix, config: &AStarConfig) -> TspResult<Self> {
        Self::with_heuristic(matrix, config, config.heuristic)
    }
}

impl<'a, H: Heuristic> SearchEngine<'a, H> {
    /// Creates an engine with a caller-supplied heuristic. `config.heuristic`
    /// is ignored.
    pub fn with_heuristic(
        matrix: &'a CostMatrix,
        config: &AStarConfig,
        heuristic: H,
    ) -> TspResult<Self> {
        config.validate(matrix.len())?;
        Ok(Self {
            matrix,
            heuristic,
            pruning: config.pruning,
            time_limit: config.time_limit_ms.map(Duration::from_millis),
            cancel: None,
            origin: config.origin,
            frontier: Frontier::new(),
            best: BestSolution::default(),
            stats: SearchStats::default(),
            cost_history: Vec::new(),
            state: EngineState::Terminated,
            started: None,
        })
    }

    /// Attaches a cancellation flag checked before every step of
    /// [`run_to_completion`](SearchEngine::run_to_completion).
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Resets the search and seeds the frontier with `[origin]`.
    pub fn initialize(&mut self, origin: City) -> TspResult<()> {
        let n = self.matrix.len();
        if origin >= n {
            return Err(TspError::InvalidOrigin { origin, cities: n });
        }

        self.origin = origin;
        self.frontier.clear();
        self.best = BestSolution::default();
        self.stats = SearchStats::default();
        self.cost_history.clear();
        self.started = Some(Instant::now());

        let mut visited = VisitedSet::new(n);
        visited.insert(origin);
        let h = self.heuristic.estimate(self.matrix, origin, &visited, origin);
        self.frontier.push(PartialTourState::root(origin, n, h));
        self.stats.peak_frontier = 1;
        self.state = EngineState::Running;
        Ok(())
    }

    /// Pops and processes the most promising state.
    ///
    /// Returns [`EngineState::Terminated`] once the frontier is empty.
    pub fn step(&mut self) -> EngineState {
        let Some(state) = self.frontier.pop_min() else {
            self.state = EngineState::Terminated;
            return self.state;
        };
        self.stats.expanded += 1;

        if self.is_dominated(&state) {
            self.stats.pruned += 1;
            // Every queued f is at least this one.
            if self.pruning == PruningRule::Estimate {
                self.stats.pruned += self.frontier.clear();
            }
        } else if state.is_complete(self.matrix.len()) {
            self.close(&state);
        } else {
            self.expand(&state);
        }

        self.state = if self.frontier.is_empty() {
            EngineState::Terminated
        } else {
            EngineState::Running
        };
        self.state
    }

    /// Steps until the frontier is empty, the deadline passes, or the
    /// cancellation flag is raised.
    pub fn run_to_completion(&mut self) -> AStarResult {
        let deadline = match (self.started, self.time_limit) {
            (Some(start), Some(limit)) => Some(start + limit),
            _ => None,
        };

        let mut interrupted = None;
        while self.state == EngineState::Running {
            if let Some(ref flag) = self.cancel {
                if flag.load(Ordering::Relaxed) {
                    interrupted = Some(SearchStatus::Cancelled);
                    break;
                }
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                interrupted = Some(SearchStatus::TimedOut);
                break;
            }
            self.step();
        }

        let status = match interrupted {
            Some(status) => {
                log::warn!(
                    "search {status} after {} expansions with {} states queued",
                    self.stats.expanded,
                    self.frontier.len()
                );
                status
            }
            None if self.best.tour.is_some() => SearchStatus::Optimal,
            None => SearchStatus::NoTourFound,
        };

        let elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        log::info!(
            "a* search {status}: cost {} in {:.3}s ({} expanded, {} generated, {} pruned)",
            self.best.cost,
            elapsed.as_secs_f64(),
            self.stats.expanded,
            self.stats.generated,
            self.stats.pruned
        );

        AStarResult {
            best: self.best.to_tour(),
            status,
            stats: self.stats.clone(),
            elapsed,
            cost_history: self.cost_history.clone(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn best_solution(&self) -> &BestSolution {
        &self.best
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn origin(&self) -> City {
        self.origin
    }

    /// Whether a popped state can no longer strictly improve the incumbent.
    /// The bound may have dropped since the state was pushed.
    fn is_dominated(&self, state: &PartialTourState) -> bool {
        match self.pruning {
            PruningRule::Disabled => false,
            PruningRule::PartialCost => state.g() >= self.best.cost,
            PruningRule::Estimate => state.f() >= self.best.cost,
        }
    }

    fn close(&mut self, state: &PartialTourState) {
        self.stats.complete_tours += 1;
        let cost = state.g() + self.matrix.distance(state.last_city(), self.origin);
        if cost < self.best.cost {
            let mut tour = state.path().to_vec();
            tour.push(self.origin);
            log::debug!(
                "incumbent improved {} -> {cost} after {} expansions",
                self.best.cost,
                self.stats.expanded
            );
            self.best = BestSolution {
                cost,
                tour: Some(tour),
            };
            self.stats.improvements += 1;
            self.cost_history.push(cost);
        }
    }

    fn expand(&mut self, state: &PartialTourState) {
        let n = self.matrix.len();
        let last = state.last_city();

        for city in state.visited().unvisited(n) {
            let g = state.g() + self.matrix.distance(last, city);
            if self.pruning != PruningRule::Disabled && g >= self.best.cost {
                self.stats.pruned += 1;
                continue;
            }

            let visited = state.visited().with(city);
            let h = self
                .heuristic
                .estimate(self.matrix, city, &visited, self.origin);
            if self.pruning == PruningRule::Estimate && g + h >= self.best.cost {
                self.stats.pruned += 1;
                continue;
            }

            self.frontier.push(state.successor(city, visited, g, h));
            self.stats.generated += 1;
        }

        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
    }
}

/// Runs the A* search end to end.
pub struct AStarRunner;

impl AStarRunner {
    /// Solves `matrix` from `config.origin`.
    pub fn run(matrix: &CostMatrix, config: &AStarConfig) -> TspResult<AStarResult> {
        Self::run_with_cancel(matrix, config, None)
    }

    /// Solves `matrix` with an optional cancellation token.
    pub fn run_with_cancel(
        matrix: &CostMatrix,
        config: &AStarConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> TspResult<AStarResult> {
        let mut engine = SearchEngine::new(matrix, config)?;
        if let Some(flag) = cancel {
            engine = engine.with_cancel(flag);
        }
        engine.initialize(config.origin)?;
        Ok(engine.run_to_completion())
    }
}
