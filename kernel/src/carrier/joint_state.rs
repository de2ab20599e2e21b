//! `JointStateV1`: the value-typed multi-agent search state.
//!
//! # Equality semantics
//!
//! `JointStateV1` intentionally does **not** derive `Eq` or `Hash`.
//!
//! - Place equality (for dedup): sorted locations + activation set only,
//!   via [`JointStateV1::canonical_key`].
//! - Full equality (for tests and replay): every field, via
//!   [`JointStateV1::bitwise_eq`].
//!
//! Keeping `t` and `score` out of the key is what lets permutation- and
//! path-equivalent states collapse to one dedup entry.

use crate::carrier::graph::{GraphV1, NodeId};
use crate::carrier::node_set::NodeSet;

/// Multi-agent state at a given tick.
#[derive(Debug, Clone)]
pub struct JointStateV1 {
    /// Elapsed ticks.
    pub t: u32,
    /// One location per agent, indexed by agent.
    pub locations: Vec<NodeId>,
    /// Activated nodes (grows monotonically along a path).
    pub activated: NodeSet,
    /// Reward accrued over all elapsed ticks.
    pub score: i64,
}

/// Order-independent fingerprint of a state's place in the state space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKeyV1 {
    /// Agent locations sorted ascending.
    pub locations: Vec<NodeId>,
    /// Activation set.
    pub activated: NodeSet,
}

impl CanonicalKeyV1 {
    /// Identity bytes: `u16` agent count, sorted locations (`u16` LE each),
    /// then the activation bitset words (LE).
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let activated = self.activated.to_le_bytes();
        let mut out = Vec::with_capacity(2 + self.locations.len() * 2 + activated.len());
        #[allow(clippy::cast_possible_truncation)]
        out.extend_from_slice(&(self.locations.len() as u16).to_le_bytes());
        for loc in &self.locations {
            out.extend_from_slice(&loc.to_le_bytes());
        }
        out.extend_from_slice(&activated);
        out
    }

    /// Human-readable rendering: `"AA,BB:CC,DD"` (locations, then activated
    /// labels), each side sorted by node id.
    #[must_use]
    pub fn render(&self, graph: &GraphV1) -> String {
        let label = |id: NodeId| graph.label(id).map_or_else(|| id.to_string(), str::to_string);
        let locs: Vec<String> = self.locations.iter().map(|&id| label(id)).collect();
        let acts: Vec<String> = self.activated.iter().map(label).collect();
        format!("{}:{}", locs.join(","), acts.join(","))
    }
}

impl JointStateV1 {
    /// Initial state: every agent at `start`, nothing activated, `t = 0`.
    #[must_use]
    pub fn seed(start: NodeId, agent_count: usize) -> Self {
        Self {
            t: 0,
            locations: vec![start; agent_count],
            activated: NodeSet::new(),
            score: 0,
        }
    }

    /// Number of agents.
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.locations.len()
    }

    /// Per-tick reward currently accruing (sum of activated rates).
    #[must_use]
    pub fn flow(&self, graph: &GraphV1) -> i64 {
        self.activated.rate_sum(graph)
    }

    /// Derive the canonical key (locations sorted, activation set as-is).
    #[must_use]
    pub fn canonical_key(&self) -> CanonicalKeyV1 {
        let mut locations = self.locations.clone();
        locations.sort_unstable();
        CanonicalKeyV1 {
            locations,
            activated: self.activated.clone(),
        }
    }

    /// Full field equality, including agent order, `t`, and `score`.
    #[must_use]
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        self.t == other.t
            && self.locations == other.locations
            && self.activated == other.activated
            && self.score == other.score
    }
}
