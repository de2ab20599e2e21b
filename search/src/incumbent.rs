//! Incumbent: the best completed leaf plus an achievable score floor.
//!
//! The floor is the largest pessimistic bound seen so far. Every pessimistic
//! bound is achievable, so the floor is a valid pruning threshold before any
//! leaf exists, which matters in breadth-first order where leaves only
//! appear on the last level.

use flowline_kernel::carrier::joint_state::{CanonicalKeyV1, JointStateV1};

/// The best terminal state seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestLeafV1 {
    pub score: i64,
    pub key: CanonicalKeyV1,
}

/// Best-leaf record and pruning floor for one search run.
#[derive(Debug, Clone)]
pub struct Incumbent {
    best: Option<BestLeafV1>,
    floor: i64,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    #[must_use]
    pub fn new() -> Self {
        Self {
            best: None,
            floor: i64::MIN,
        }
    }

    /// Install `leaf` if it strictly beats the current best leaf.
    ///
    /// Returns `true` when the best leaf changed.
    pub fn offer_leaf(&mut self, leaf: &JointStateV1) -> bool {
        if self.best.as_ref().is_some_and(|b| leaf.score <= b.score) {
            return false;
        }
        self.best = Some(BestLeafV1 {
            score: leaf.score,
            key: leaf.canonical_key(),
        });
        self.raise_floor(leaf.score);
        true
    }

    /// Raise the floor to an achievable score.
    pub fn raise_floor(&mut self, achievable: i64) {
        self.floor = self.floor.max(achievable);
    }

    /// Largest score known to be achievable (`i64::MIN` before any offer).
    #[must_use]
    pub fn floor(&self) -> i64 {
        self.floor
    }

    /// Whether a state with this optimistic bound can be dropped.
    /// Equal bounds are kept.
    #[must_use]
    pub fn prunes(&self, optimistic: i64) -> bool {
        optimistic < self.floor
    }

    #[must_use]
    pub fn best(&self) -> Option<&BestLeafV1> {
        self.best.as_ref()
    }
}
