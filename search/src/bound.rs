//! Optimistic and pessimistic final-score bounds.
//!
//! Both are functions of `(state, horizon)` only. Reward for the remaining
//! ticks is at most the whole graph's rate sum per tick (optimistic) and at
//! least the current flow per tick, which is achievable by never activating
//! again (pessimistic).

use flowline_kernel::carrier::graph::GraphV1;
use flowline_kernel::carrier::joint_state::JointStateV1;

/// Ticks left before `horizon`. Zero once the state is terminal.
#[must_use]
pub fn remaining_ticks(state: &JointStateV1, horizon: u32) -> i64 {
    i64::from(horizon.saturating_sub(state.t))
}

/// `score + remaining * total_rate`. Never below the best reachable score.
#[must_use]
pub fn optimistic_bound(graph: &GraphV1, state: &JointStateV1, horizon: u32) -> i64 {
    state
        .score
        .saturating_add(remaining_ticks(state, horizon).saturating_mul(graph.total_rate()))
}

/// `score + remaining * flow`. Always achievable from `state`.
#[must_use]
pub fn pessimistic_bound(graph: &GraphV1, state: &JointStateV1, horizon: u32) -> i64 {
    state
        .score
        .saturating_add(remaining_ticks(state, horizon).saturating_mul(state.flow(graph)))
}
