//! Per-agent candidate actions and joint-action enumeration.
//!
//! Candidate order is a search heuristic only: `Activate` first, then moves
//! toward not-yet-activated, high-rate neighbors. Any order yields the same
//! optimum.
//!
//! # Symmetry breaking
//!
//! Agents standing on the same node are interchangeable, so for each
//! co-located group:
//! - only the lowest-index agent may `Activate`;
//! - among movers, destination ids are non-decreasing in agent index.
//!
//! Every joint action dropped by these rules is a permutation of one that is
//! kept, and permuted successors share a canonical key and score.

use std::cmp::Reverse;

use flowline_kernel::carrier::graph::{GraphV1, NodeId};
use flowline_kernel::carrier::joint_state::JointStateV1;
use flowline_kernel::operators::action::{ActionV1, JointActionV1};

/// Candidate actions for one agent, ignoring the other agents.
///
/// `Wait` is offered only on a node with no outgoing edges. Returns an empty
/// list if `agent` is out of range.
#[must_use]
pub fn agent_candidates(graph: &GraphV1, state: &JointStateV1, agent: usize) -> Vec<ActionV1> {
    agent_options(graph, state, agent, true)
}

/// All joint actions for `state`, in agent order, with symmetry breaking.
///
/// Never empty: zero agents yield a single empty joint action, and every
/// agent has at least one option.
#[must_use]
pub fn joint_actions(graph: &GraphV1, state: &JointStateV1) -> Vec<JointActionV1> {
    let options: Vec<Vec<ActionV1>> = (0..state.agent_count())
        .map(|agent| {
            let here = state.locations[agent];
            let leader = !state.locations[..agent].contains(&here);
            agent_options(graph, state, agent, leader)
        })
        .collect();

    let mut out = Vec::new();
    let mut partial = Vec::with_capacity(options.len());
    extend(state, &options, &mut partial, &mut out);
    out
}

fn agent_options(
    graph: &GraphV1,
    state: &JointStateV1,
    agent: usize,
    may_activate: bool,
) -> Vec<ActionV1> {
    let Some(&here) = state.locations.get(agent) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    if may_activate && graph.rate(here) > 0 && !state.activated.contains(here) {
        out.push(ActionV1::Activate { node: here });
    }

    let mut destinations: Vec<NodeId> = graph.neighbors(here).to_vec();
    destinations.sort_by_key(|&to| (state.activated.contains(to), Reverse(graph.rate(to)), to));
    destinations.dedup();
    out.extend(
        destinations
            .into_iter()
            .map(|to| ActionV1::MoveTo { from: here, to }),
    );

    if graph.neighbors(here).is_empty() {
        out.push(ActionV1::Wait { at: here });
    }
    out
}

fn extend(
    state: &JointStateV1,
    options: &[Vec<ActionV1>],
    partial: &mut Vec<ActionV1>,
    out: &mut Vec<JointActionV1>,
) {
    let agent = partial.len();
    if agent == options.len() {
        out.push(JointActionV1(partial.clone()));
        return;
    }
    for &action in &options[agent] {
        if ordered_after_group(state, partial, agent, action) {
            partial.push(action);
            extend(state, options, partial, out);
            partial.pop();
        }
    }
}

/// A move must not undercut the destination of an earlier co-located mover.
fn ordered_after_group(
    state: &JointStateV1,
    partial: &[ActionV1],
    agent: usize,
    action: ActionV1,
) -> bool {
    let ActionV1::MoveTo { to, .. } = action else {
        return true;
    };
    let here = state.locations[agent];
    partial.iter().enumerate().all(|(other, prev)| {
        if state.locations[other] != here {
            return true;
        }
        match *prev {
            ActionV1::MoveTo { to: prev_to, .. } => prev_to <= to,
            ActionV1::Activate { .. } | ActionV1::Wait { .. } => true,
        }
    })
}
