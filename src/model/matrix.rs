//! Directed cost matrix.

use crate::error::{TspError, TspResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// City identifier in `[0, n)`.
pub type City = usize;

/// Square matrix of directed travel costs between `n` cities.
///
/// Costs are finite and non-negative. Asymmetry is allowed
/// (`distance(a, b) != distance(b, a)`). The diagonal is unused and always
/// stored as zero, so a single-city tour `[0, 0]` costs nothing.
///
/// The matrix is validated once at construction and never mutated
/// afterwards; searches borrow it immutably.
///
/// # Examples
///
/// ```
/// use u_tsp::model::CostMatrix;
///
/// let matrix = CostMatrix::new(vec![
///     vec![0.0, 5.0],
///     vec![7.0, 0.0],
/// ]).unwrap();
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.distance(0, 1), 5.0);
/// assert_eq!(matrix.tour_cost(&[0, 1, 0]), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CostMatrix {
    n: usize,
    // Row-major, n * n.
    costs: Vec<f64>,
}

impl CostMatrix {
    /// Builds a matrix from one row per city.
    ///
    /// Fails with [`TspError::InvalidGraph`] when there are no rows, a row
    /// has the wrong length, or an off-diagonal cost is negative or not
    /// finite.
    pub fn new(rows: Vec<Vec<f64>>) -> TspResult<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(TspError::invalid_graph("cost matrix has no cities"));
        }
        let mut costs = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TspError::invalid_graph(format!(
                    "row {i} has {} costs, expected {n}",
                    row.len()
                )));
            }
            costs.extend(row);
        }
        Self::from_flat(n, costs)
    }

    /// Builds a matrix from `n * n` row-major costs.
    pub fn from_flat(n: usize, mut costs: Vec<f64>) -> TspResult<Self> {
        if n == 0 {
            return Err(TspError::invalid_graph("cost matrix has no cities"));
        }
        if costs.len() != n * n {
            return Err(TspError::invalid_graph(format!(
                "expected {} costs for {n} cities, got {}",
                n * n,
                costs.len()
            )));
        }
        for i in 0..n {
            for j in 0..n {
                let cost = costs[i * n + j];
                if i == j {
                    continue;
                }
                if !cost.is_finite() {
                    return Err(TspError::invalid_graph(format!(
                        "cost from {i} to {j} is not finite"
                    )));
                }
                if cost < 0.0 {
                    return Err(TspError::invalid_graph(format!(
                        "cost from {i} to {j} is negative ({cost})"
                    )));
                }
            }
            costs[i * n + i] = 0.0;
        }
        Ok(Self { n, costs })
    }

    /// Generates a random asymmetric instance with integer-valued costs in
    /// `1..=max_cost`. The same seed always yields the same matrix.
    pub fn random(n: usize, max_cost: u32, seed: u64) -> TspResult<Self> {
        if max_cost == 0 {
            return Err(TspError::invalid_config("max_cost must be positive"));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let costs = (0..n * n)
            .map(|_| rng.random_range(1..=max_cost) as f64)
            .collect();
        Self::from_flat(n, costs)
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false` for a constructed matrix; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Directed cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either city is out of range.
    #[inline]
    pub fn distance(&self, from: City, to: City) -> f64 {
        assert!(from < self.n && to < self.n, "city out of range");
        self.costs[from * self.n + to]
    }

    /// Outgoing costs of `city`, indexed by destination.
    pub fn row(&self, city: City) -> &[f64] {
        &self.costs[city * self.n..(city + 1) * self.n]
    }

    /// Sum of consecutive edge costs along `cities`.
    ///
    /// The sequence is taken as-is; pass a closed tour to include the
    /// return edge.
    pub fn tour_cost(&self, cities: &[City]) -> f64 {
        cities
            .windows(2)
            .map(|w| self.distance(w[0], w[1]))
            .sum()
    }
}
