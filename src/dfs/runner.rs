//! Depth-first branch-and-bound execution.
//!
//! # Algorithm
//!
//! 1. Start at the origin with an empty incumbent
//! 2. At each city, try the unvisited cities in increasing edge cost
//! 3. Skip the rest of the children once `g + edge` reaches the incumbent
//! 4. When every city is on the path, close it with the return edge
//!
//! Because children are ordered nearest-first, the first leaf reached is
//! the greedy nearest-neighbor tour, which gives the bound a good start.

use super::config::DfsConfig;
use crate::error::TspResult;
use crate::model::{City, CostMatrix, SearchStats, SearchStatus, Tour};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Nodes between deadline/cancellation checks.
const CHECK_INTERVAL: usize = 256;

/// Result of a depth-first run.
#[derive(Debug, Clone)]
pub struct DfsResult {
    /// Best tour found, `None` when no tour was completed.
    pub best: Option<Tour>,
    /// How the search ended.
    pub status: SearchStatus,
    /// Node and pruning counters.
    pub stats: SearchStats,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Incumbent cost after each improvement.
    pub cost_history: Vec<f64>,
}

impl DfsResult {
    /// Cost of the best tour, `f64::INFINITY` when there is none.
    pub fn best_cost(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |t| t.cost)
    }
}

/// Runs the depth-first search.
pub struct DfsRunner;

impl DfsRunner {
    /// Solves `matrix` from `config.origin`.
    pub fn run(matrix: &CostMatrix, config: &DfsConfig) -> TspResult<DfsResult> {
        Self::run_with_cancel(matrix, config, None)
    }

    /// Solves `matrix` with an optional cancellation token.
    pub fn run_with_cancel(
        matrix: &CostMatrix,
        config: &DfsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> TspResult<DfsResult> {
        config.validate(matrix.len())?;

        let started = Instant::now();
        let mut search = Search::new(matrix, config, cancel, started);
        search.descend(config.origin, 0.0);
        Ok(search.finish(started))
    }
}

struct Search<'a> {
    matrix: &'a CostMatrix,
    origin: City,
    pruning: bool,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,

    path: Vec<City>,
    visited: Vec<bool>,
    best_cost: f64,
    best_tour: Option<Vec<City>>,
    stats: SearchStats,
    cost_history: Vec<f64>,
    interrupted: Option<SearchStatus>,
}

impl<'a> Search<'a> {
    fn new(
        matrix: &'a CostMatrix,
        config: &DfsConfig,
        cancel: Option<Arc<AtomicBool>>,
        started: Instant,
    ) -> Self {
        let n = matrix.len();
        let mut visited = vec![false; n];
        visited[config.origin] = true;
        let mut path = Vec::with_capacity(n + 1);
        path.push(config.origin);

        Self {
            matrix,
            origin: config.origin,
            pruning: config.pruning,
            deadline: config
                .time_limit_ms
                .map(|ms| started + Duration::from_millis(ms)),
            cancel,
            path,
            visited,
            best_cost: f64::INFINITY,
            best_tour: None,
            stats: SearchStats::default(),
            cost_history: Vec::new(),
            interrupted: None,
        }
    }

    fn finish(self, started: Instant) -> DfsResult {
        let status = match self.interrupted {
            Some(status) => {
                log::warn!(
                    "depth-first search {status} after {} nodes",
                    self.stats.expanded
                );
                status
            }
            None if self.best_tour.is_some() => SearchStatus::Optimal,
            None => SearchStatus::NoTourFound,
        };
        let elapsed = started.elapsed();
        log::info!(
            "depth-first search {status}: cost {} in {:.3}s ({} nodes, {} pruned)",
            self.best_cost,
            elapsed.as_secs_f64(),
            self.stats.expanded,
            self.stats.pruned
        );

        let best_cost = self.best_cost;
        DfsResult {
            best: self.best_tour.map(|cities| Tour {
                cities,
                cost: best_cost,
            }),
            status,
            stats: self.stats,
            elapsed,
            cost_history: self.cost_history,
        }
    }

    fn descend(&mut self, current: City, g: f64) {
        if self.stats.expanded % CHECK_INTERVAL == 0 && self.should_stop() {
            return;
        }
        self.stats.expanded += 1;

        let n = self.matrix.len();
        if self.path.len() == n {
            self.close(current, g);
            return;
        }

        let mut children: Vec<(f64, City)> = (0..n)
            .filter(|&c| !self.visited[c])
            .map(|c| (self.matrix.distance(current, c), c))
            .collect();
        children.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for (i, &(edge, city)) in children.iter().enumerate() {
            let next_g = g + edge;
            if self.pruning && next_g >= self.best_cost {
                // Children are sorted, so the rest cost at least as much.
                self.stats.pruned += children.len() - i;
                break;
            }

            self.visited[city] = true;
            self.path.push(city);
            self.stats.generated += 1;

            self.descend(city, next_g);

            self.path.pop();
            self.visited[city] = false;

            if self.interrupted.is_some() {
                return;
            }
        }
    }

    fn close(&mut self, last: City, g: f64) {
        self.stats.complete_tours += 1;
        let cost = g + self.matrix.distance(last, self.origin);
        if cost < self.best_cost {
            log::debug!("incumbent improved {} -> {cost}", self.best_cost);
            let mut tour = self.path.clone();
            tour.push(self.origin);
            self.best_cost = cost;
            self.best_tour = Some(tour);
            self.stats.improvements += 1;
            self.cost_history.push(cost);
        }
    }

    fn should_stop(&mut self) -> bool {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.interrupted = Some(SearchStatus::Cancelled);
                return true;
            }
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.interrupted = Some(SearchStatus::TimedOut);
            return true;
        }
        false
    }
}
