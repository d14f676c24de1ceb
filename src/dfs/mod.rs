//! Depth-first branch and bound.
//!
//! Backtracking search that walks the tree of partial tours depth-first,
//! visiting the nearest unvisited city first and cutting every branch whose
//! cost already reaches the best tour found. Memory stays `O(n)`; the first
//! descent yields the nearest-neighbor tour as an initial bound.
//!
//! # References
//!
//! - Little, Murty, Sweeney & Karel (1963), "An Algorithm for the Traveling
//!   Salesman Problem"

mod config;
mod runner;

pub use config::DfsConfig;
pub use runner::{DfsResult, DfsRunner};
