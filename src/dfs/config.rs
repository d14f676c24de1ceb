//! Depth-first search configuration.

use crate::error::{TspError, TspResult};
use crate::model::City;

/// Configuration for the depth-first branch-and-bound search.
///
/// # Examples
///
/// ```
/// use u_tsp::dfs::DfsConfig;
///
/// let config = DfsConfig::default().with_origin(1).with_pruning(false);
/// assert_eq!(config.origin, 1);
/// assert!(!config.pruning);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DfsConfig {
    /// City every tour starts and ends at.
    pub origin: City,

    /// Cut a branch once its cost reaches the incumbent.
    pub pruning: bool,

    /// Optional wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for DfsConfig {
    fn default() -> Self {
        Self {
            origin: 0,
            pruning: true,
            time_limit_ms: None,
        }
    }
}

impl DfsConfig {
    pub fn with_origin(mut self, origin: City) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration against an instance of `cities` cities.
    pub fn validate(&self, cities: usize) -> TspResult<()> {
        if self.origin >= cities {
            return Err(TspError::InvalidOrigin {
                origin: self.origin,
                cities,
            });
        }
        Ok(())
    }
}
