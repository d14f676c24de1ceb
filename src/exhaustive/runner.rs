//! Full enumeration of tour orderings.

use crate::error::{TspError, TspResult};
use crate::model::{City, CostMatrix, Tour};
use std::time::{Duration, Instant};

/// Result of an exhaustive enumeration.
#[derive(Debug, Clone)]
pub struct ExhaustiveResult {
    /// Cheapest tour. Ties keep the lexicographically first ordering.
    pub best: Tour,
    /// Number of closed tours evaluated.
    pub evaluated: usize,
    pub elapsed: Duration,
}

/// Evaluates every ordering of the cities. Runs in `O((n-1)! * n)`; meant
/// for small instances and for checking the other strategies.
pub struct ExhaustiveRunner;

impl ExhaustiveRunner {
    /// Finds the optimal tour starting and ending at `origin`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::exhaustive::ExhaustiveRunner;
    /// use u_tsp::model::CostMatrix;
    ///
    /// let matrix = CostMatrix::new(vec![vec![0.0, 5.0], vec![7.0, 0.0]]).unwrap();
    /// let result = ExhaustiveRunner::solve(&matrix, 0).unwrap();
    /// assert_eq!(result.best.cost, 12.0);
    /// assert_eq!(result.evaluated, 1);
    /// ```
    pub fn solve(matrix: &CostMatrix, origin: City) -> TspResult<ExhaustiveResult> {
        Self::complete(matrix, &[origin])
    }

    /// Finds the cheapest closed tour that begins with `prefix`.
    ///
    /// `prefix[0]` is the origin. The remaining cities are permuted in every
    /// order after the prefix, then the tour returns to the origin.
    pub fn complete(matrix: &CostMatrix, prefix: &[City]) -> TspResult<ExhaustiveResult> {
        let n = matrix.len();
        let Some(&origin) = prefix.first() else {
            return Err(TspError::invalid_graph("tour prefix is empty"));
        };
        if origin >= n {
            return Err(TspError::InvalidOrigin { origin, cities: n });
        }
        let mut in_prefix = vec![false; n];
        for &city in prefix {
            if city >= n || in_prefix[city] {
                return Err(TspError::invalid_graph(format!(
                    "prefix {prefix:?} is not a simple path over {n} cities"
                )));
            }
            in_prefix[city] = true;
        }

        let started = Instant::now();
        let prefix_cost = matrix.tour_cost(prefix);
        let last = prefix[prefix.len() - 1];
        // Ascending, so the first permutation is the lexicographically smallest.
        let mut rest: Vec<City> = (0..n).filter(|&c| !in_prefix[c]).collect();

        let mut best_cost = f64::INFINITY;
        let mut best_rest = rest.clone();
        let mut evaluated = 0usize;
        loop {
            let mut cost = prefix_cost;
            let mut from = last;
            for &city in &rest {
                cost += matrix.distance(from, city);
                from = city;
            }
            cost += matrix.distance(from, origin);
            evaluated += 1;

            if cost < best_cost {
                best_cost = cost;
                best_rest.copy_from_slice(&rest);
            }
            if !next_permutation(&mut rest) {
                break;
            }
        }

        let mut cities = Vec::with_capacity(n + 1);
        cities.extend_from_slice(prefix);
        cities.extend_from_slice(&best_rest);
        cities.push(origin);

        Ok(ExhaustiveResult {
            best: Tour {
                cities,
                cost: best_cost,
            },
            evaluated,
            elapsed: started.elapsed(),
        })
    }
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false`, leaving `items` untouched, when it is already the last
/// (descending) permutation.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_cities() -> CostMatrix {
        CostMatrix::new(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_next_permutation_sequence() {
        let mut v = vec![1, 2, 3];
        let mut seen = vec![v.clone()];
        while next_permutation(&mut v) {
            seen.push(v.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
        assert_eq!(v, vec![3, 2, 1]);
    }

    #[test]
    fn test_next_permutation_short() {
        let mut empty: Vec<u8> = Vec::new();
        assert!(!next_permutation(&mut empty));
        let mut one = vec![4];
        assert!(!next_permutation(&mut one));
    }

    #[test]
    fn test_solve_four_cities() {
        let result = ExhaustiveRunner::solve(&four_cities(), 0).unwrap();
        assert_eq!(result.best.cost, 80.0);
        assert_eq!(result.best.cities, vec![0, 1, 3, 2, 0]);
        assert_eq!(result.evaluated, 6);
    }

    #[test]
    fn test_single_city() {
        let m = CostMatrix::new(vec![vec![0.0]]).unwrap();
        let result = ExhaustiveRunner::solve(&m, 0).unwrap();
        assert_eq!(result.best.cities, vec![0, 0]);
        assert_eq!(result.best.cost, 0.0);
        assert_eq!(result.evaluated, 1);
    }

    #[test]
    fn test_complete_prefix() {
        // Fixing 0 -> 2 leaves 2 -> 1 -> 3 -> 0 (35+25+20) and
        // 2 -> 3 -> 1 -> 0 (30+25+10).
        let result = ExhaustiveRunner::complete(&four_cities(), &[0, 2]).unwrap();
        assert_eq!(result.best.cities, vec![0, 2, 3, 1, 0]);
        assert_eq!(result.best.cost, 15.0 + 65.0);
        assert_eq!(result.evaluated, 2);
    }

    #[test]
    fn test_complete_full_prefix() {
        let result = ExhaustiveRunner::complete(&four_cities(), &[0, 1, 2, 3]).unwrap();
        assert_eq!(result.best.cost, 10.0 + 35.0 + 30.0 + 20.0);
        assert_eq!(result.evaluated, 1);
    }

    #[test]
    fn test_complete_rejects_bad_prefix() {
        let m = four_cities();
        assert!(ExhaustiveRunner::complete(&m, &[]).is_err());
        assert!(ExhaustiveRunner::complete(&m, &[0, 0]).is_err());
        assert!(ExhaustiveRunner::complete(&m, &[0, 7]).is_err());
        assert!(ExhaustiveRunner::solve(&m, 4).is_err());
    }
}
