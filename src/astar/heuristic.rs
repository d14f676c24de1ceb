//! Admissible lower bounds on the cost of completing a partial tour.

use super::state::VisitedSet;
use crate::model::{City, CostMatrix};

/// Estimates the remaining cost of a partial tour.
///
/// `estimate` must return a non-negative value that never exceeds the
/// cheapest way to travel from `current` through every city not in
/// `visited` and back to `origin`. The engine's optimality guarantee rests
/// on this, together with non-negative edge costs.
///
/// `visited` already contains `current`.
pub trait Heuristic {
    fn estimate(
        &self,
        matrix: &CostMatrix,
        current: City,
        visited: &VisitedSet,
        origin: City,
    ) -> f64;
}

/// Cheapest single edge from the current city to any unvisited city.
///
/// Returns 0 once every city is visited: the return edge is not bounded.
/// Weak but cheap, O(n) per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestUnvisited;

impl Heuristic for NearestUnvisited {
    fn estimate(
        &self,
        matrix: &CostMatrix,
        current: City,
        visited: &VisitedSet,
        _origin: City,
    ) -> f64 {
        let row = matrix.row(current);
        visited
            .unvisited(matrix.len())
            .map(|c| row[c])
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |a| a.min(c))))
            .unwrap_or(0.0)
    }
}

/// Sum of the cheapest edge entering each city that still needs one.
///
/// In any completion, every unvisited city is entered exactly once from
/// `current` or another unvisited city, and the origin is entered once from
/// an unvisited city. Summing the cheapest candidate edge for each of them
/// gives a lower bound that also covers the return edge. O(n^2) per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinIncomingEdges;

impl Heuristic for MinIncomingEdges {
    fn estimate(
        &self,
        matrix: &CostMatrix,
        current: City,
        visited: &VisitedSet,
        origin: City,
    ) -> f64 {
        let n = matrix.len();
        let unvisited: Vec<City> = visited.unvisited(n).collect();
        if unvisited.is_empty() {
            return matrix.distance(current, origin);
        }

        let mut bound = 0.0;
        for &to in &unvisited {
            let mut best = matrix.distance(current, to);
            for &from in &unvisited {
                if from != to {
                    best = best.min(matrix.distance(from, to));
                }
            }
            bound += best;
        }

        let into_origin = unvisited
            .iter()
            .map(|&from| matrix.distance(from, origin))
            .fold(f64::INFINITY, f64::min);
        bound + into_origin
    }
}

/// Always zero. Turns the best-first order into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _: &CostMatrix, _: City, _: &VisitedSet, _: City) -> f64 {
        0.0
    }
}

/// Heuristic selection for configuration and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    /// [`NearestUnvisited`].
    #[default]
    NearestUnvisited,
    /// [`MinIncomingEdges`].
    MinIncomingEdges,
    /// [`ZeroHeuristic`].
    Zero,
}

impl Heuristic for HeuristicKind {
    fn estimate(
        &self,
        matrix: &CostMatrix,
        current: City,
        visited: &VisitedSet,
        origin: City,
    ) -> f64 {
        match self {
            HeuristicKind::NearestUnvisited => {
                NearestUnvisited.estimate(matrix, current, visited, origin)
            }
            HeuristicKind::MinIncomingEdges => {
                MinIncomingEdges.estimate(matrix, current, visited, origin)
            }
            HeuristicKind::Zero => ZeroHeuristic.estimate(matrix, current, visited, origin),
        }
    }
}
