//! Exhaustive enumeration.
//!
//! Evaluates all `(n-1)!` orderings of the non-origin cities in
//! lexicographic order. Exact by construction and used as the reference the
//! pruned searches are checked against.

mod runner;

pub use runner::{next_permutation, ExhaustiveResult, ExhaustiveRunner};
