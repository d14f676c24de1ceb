//! Exact traveling salesman search over small, fully-connected graphs.
//!
//! Finds a minimum-cost Hamiltonian cycle that starts and ends at a fixed
//! origin city, over a directed (possibly asymmetric) cost matrix.
//!
//! - **A\* branch and bound** ([`astar`]): best-first search over partial
//!   tours ordered by an admissible lower bound, cutting branches that
//!   cannot beat the best tour found. Step-wise engine with deadline and
//!   cancellation support.
//! - **Depth-first branch and bound** ([`dfs`]): backtracking search that
//!   tries the nearest city first. Constant memory per level.
//! - **Exhaustive enumeration** ([`exhaustive`]): every ordering, used as
//!   the reference the other strategies are checked against.
//!
//! Supporting modules:
//!
//! - [`model`]: cost matrix, tours, search status and statistics
//! - [`io`]: comma-separated matrix loading and result reporting
//! - [`error`]: the crate error type
//!
//! # Example
//!
//! ```
//! use u_tsp::astar::{AStarConfig, AStarRunner};
//! use u_tsp::model::CostMatrix;
//!
//! let matrix = CostMatrix::new(vec![
//!     vec![0.0, 10.0, 15.0, 20.0],
//!     vec![10.0, 0.0, 35.0, 25.0],
//!     vec![15.0, 35.0, 0.0, 30.0],
//!     vec![20.0, 25.0, 30.0, 0.0],
//! ]).unwrap();
//!
//! let result = AStarRunner::run(&matrix, &AStarConfig::default()).unwrap();
//! assert_eq!(result.best_cost(), 80.0);
//! ```
//!
//! All searches are single-threaded and assume non-negative edge costs,
//! which [`model::CostMatrix`] enforces.

pub mod astar;
pub mod dfs;
pub mod error;
pub mod exhaustive;
pub mod io;
pub mod model;

pub use error::{TspError, TspResult};
