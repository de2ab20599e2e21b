//! Search policy: traversal order, limits, and pruning switches.

use std::time::Duration;

use flowline_kernel::proof::canon::{canonical_json_bytes, CanonError};
use flowline_kernel::proof::hash::{canonical_hash, ContentHash};
use flowline_kernel::proof::hash_domain::HashDomain;

use crate::error::SearchError;

/// Frontier traversal order. Both orders return the same optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalV1 {
    /// Level-synchronized expansion, one tick per level.
    BreadthFirst,
    /// Explicit-stack expansion; an accepted child is expanded immediately.
    DepthFirst,
}

impl TraversalV1 {
    /// Stable lowercase name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
        }
    }
}

/// Search configuration.
///
/// Every limit is optional. Hitting one stops expansion and returns the best
/// score found so far with `exact = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    pub traversal: TraversalV1,
    /// Breadth-first only: expand the states of a level on the rayon pool.
    /// Children are merged in frontier order, so results match the
    /// sequential run exactly.
    pub parallel_expansion: bool,
    /// Stop after this many state expansions.
    pub max_expansions: Option<u64>,
    /// Stop when a breadth-first level (or the depth-first stack) grows
    /// beyond this many states.
    pub max_frontier_size: Option<u64>,
    /// Wall-clock limit.
    pub time_limit: Option<Duration>,
    /// Expansions between clock reads when `time_limit` is set.
    pub clock_check_interval: u64,
    /// Drop states whose optimistic bound is below the incumbent floor.
    pub prune_with_optimistic_bound: bool,
    /// Collapse states sharing a canonical key.
    pub dedup: bool,
}

impl SearchPolicyV1 {
    /// Reject unsupported option combinations.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicyMode`] for parallel
    /// depth-first search or a zero clock-check interval.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.parallel_expansion && self.traversal == TraversalV1::DepthFirst {
            return Err(SearchError::UnsupportedPolicyMode {
                detail: "parallel_expansion requires breadth-first traversal".into(),
            });
        }
        if self.clock_check_interval == 0 {
            return Err(SearchError::UnsupportedPolicyMode {
                detail: "clock_check_interval must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Deterministic JSON echo of the policy for reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let time_limit_ms = self
            .time_limit
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        serde_json::json!({
            "clock_check_interval": self.clock_check_interval,
            "dedup": self.dedup,
            "max_expansions": self.max_expansions,
            "max_frontier_size": self.max_frontier_size,
            "parallel_expansion": self.parallel_expansion,
            "prune_with_optimistic_bound": self.prune_with_optimistic_bound,
            "time_limit_ms": time_limit_ms,
            "traversal": self.traversal.as_str(),
        })
    }

    /// Domain-separated digest of [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchPolicy, &bytes))
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            traversal: TraversalV1::BreadthFirst,
            parallel_expansion: false,
            max_expansions: None,
            max_frontier_size: None,
            time_limit: None,
            clock_check_interval: 1024,
            prune_with_optimistic_bound: true,
            dedup: true,
        }
    }
}
