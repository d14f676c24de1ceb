//! Problem and solution types shared by every search strategy.
//!
//! - [`CostMatrix`]: immutable directed travel costs between cities
//! - [`Tour`]: a closed Hamiltonian cycle and its cost
//! - [`SearchStatus`] / [`SearchStats`]: how a search ended and what it did

mod matrix;
mod tour;

pub use matrix::{City, CostMatrix};
pub use tour::{SearchStats, SearchStatus, Tour};
