//! Tours and search bookkeeping.

use super::matrix::{City, CostMatrix};
use crate::error::{TspError, TspResult};
use std::fmt;

/// A closed tour: `cities` starts and ends at the origin and visits every
/// other city exactly once in between.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// `n + 1` city identifiers, first == last.
    pub cities: Vec<City>,
    /// Sum of the edge costs along `cities`.
    pub cost: f64,
}

impl Tour {
    /// Validates `cities` as a closed Hamiltonian cycle over `matrix` and
    /// computes its cost.
    pub fn evaluate(matrix: &CostMatrix, cities: Vec<City>) -> TspResult<Self> {
        let n = matrix.len();
        if cities.len() != n + 1 {
            return Err(TspError::invalid_graph(format!(
                "tour has {} entries, expected {}",
                cities.len(),
                n + 1
            )));
        }
        if cities.first() != cities.last() {
            return Err(TspError::invalid_graph("tour does not return to its origin"));
        }
        let mut seen = vec![false; n];
        for &city in &cities[..n] {
            if city >= n {
                return Err(TspError::invalid_graph(format!(
                    "tour visits unknown city {city}"
                )));
            }
            if seen[city] {
                return Err(TspError::invalid_graph(format!(
                    "tour visits city {city} twice"
                )));
            }
            seen[city] = true;
        }
        let cost = matrix.tour_cost(&cities);
        Ok(Self { cities, cost })
    }

    /// City the tour starts and ends at.
    pub fn origin(&self) -> City {
        self.cities[0]
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for city in &self.cities {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{city}")?;
            first = false;
        }
        Ok(())
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The search space was exhausted; the best tour is optimal.
    Optimal,
    /// The search space was exhausted without completing any tour.
    NoTourFound,
    /// The time limit fired; the best tour (if any) is the incumbent so far.
    TimedOut,
    /// The cancellation flag was raised; same guarantees as `TimedOut`.
    Cancelled,
}

impl SearchStatus {
    /// Whether the search ran to the end of its search space.
    pub fn is_exhaustive(self) -> bool {
        matches!(self, SearchStatus::Optimal | SearchStatus::NoTourFound)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchStatus::Optimal => "optimal",
            SearchStatus::NoTourFound => "no tour found",
            SearchStatus::TimedOut => "timed out",
            SearchStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Partial tours taken off the frontier (or visited, for depth-first).
    pub expanded: usize,
    /// Successor partial tours created.
    pub generated: usize,
    /// Branches discarded by the bound.
    pub pruned: usize,
    /// Full-length paths closed into a tour.
    pub complete_tours: usize,
    /// Times the incumbent strictly improved.
    pub improvements: usize,
    /// Largest frontier size observed. Zero for strategies without one.
    pub peak_frontier: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CostMatrix {
        CostMatrix::new(vec![
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_evaluate_valid() {
        let tour = Tour::evaluate(&matrix(), vec![0, 1, 2, 0]).unwrap();
        assert_eq!(tour.cost, 1.0 + 4.0 + 5.0);
        assert_eq!(tour.origin(), 0);
        assert_eq!(tour.to_string(), "0 1 2 0");
    }

    #[test]
    fn test_evaluate_rejects_open_tour() {
        assert!(Tour::evaluate(&matrix(), vec![0, 1, 2, 1]).is_err());
    }

    #[test]
    fn test_evaluate_rejects_repeat() {
        assert!(Tour::evaluate(&matrix(), vec![0, 1, 1, 0]).is_err());
    }

    #[test]
    fn test_evaluate_rejects_wrong_length() {
        assert!(Tour::evaluate(&matrix(), vec![0, 1, 0]).is_err());
    }

    #[test]
    fn test_evaluate_rejects_unknown_city() {
        assert!(Tour::evaluate(&matrix(), vec![0, 1, 9, 0]).is_err());
    }

    #[test]
    fn test_single_city_tour() {
        let m = CostMatrix::new(vec![vec![0.0]]).unwrap();
        let tour = Tour::evaluate(&m, vec![0, 0]).unwrap();
        assert_eq!(tour.cost, 0.0);
    }

    #[test]
    fn test_status_exhaustive() {
        assert!(SearchStatus::Optimal.is_exhaustive());
        assert!(SearchStatus::NoTourFound.is_exhaustive());
        assert!(!SearchStatus::TimedOut.is_exhaustive());
        assert!(!SearchStatus::Cancelled.is_exhaustive());
    }
}
