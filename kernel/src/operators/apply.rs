//! `apply()`: advance a joint state by one tick.
//!
//! The single transition entry point. Pure: the input state is borrowed and a
//! new state is returned, so there is no un-apply path.
//!
//! Tick order:
//! 1. Validate every agent action against the state and graph (fail-closed).
//! 2. Accrue reward for the elapsing tick from the activation set as it stood
//!    *before* this joint action.
//! 3. Apply activations and moves.
//! 4. Advance `t`.
//!
//! A node activated during tick `t` contributes nothing on tick `t` and its
//! full rate on every later tick.

use crate::carrier::graph::{GraphV1, NodeId};
use crate::carrier::joint_state::JointStateV1;
use crate::operators::action::{ActionV1, JointActionV1};

/// Typed failure for joint-action application. Fail-closed.
///
/// Every variant indicates an engine bug (the generator produced an action
/// the state cannot take), never bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyFailure {
    /// Joint action length differs from the agent count.
    AgentCountMismatch { expected: usize, actual: usize },
    /// An action names a node outside the graph.
    UnknownNode { agent: usize, node: NodeId },
    /// An action's origin is not the agent's current location.
    NotAtLocation {
        agent: usize,
        location: NodeId,
        origin: NodeId,
    },
    /// `MoveTo` along a non-existent edge.
    NotAdjacent {
        agent: usize,
        from: NodeId,
        to: NodeId,
    },
    /// `Activate` on a node that is already active (or activated twice in
    /// the same joint action).
    AlreadyActivated { agent: usize, node: NodeId },
    /// `Activate` on a node with rate zero.
    ZeroRateActivation { agent: usize, node: NodeId },
}

impl std::fmt::Display for ApplyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AgentCountMismatch { expected, actual } => {
                write!(f, "joint action has {actual} actions, state has {expected} agents")
            }
            Self::UnknownNode { agent, node } => {
                write!(f, "agent {agent}: action names unknown node {node}")
            }
            Self::NotAtLocation {
                agent,
                location,
                origin,
            } => write!(
                f,
                "agent {agent}: action originates at {origin} but agent is at {location}"
            ),
            Self::NotAdjacent { agent, from, to } => {
                write!(f, "agent {agent}: no edge {from} -> {to}")
            }
            Self::AlreadyActivated { agent, node } => {
                write!(f, "agent {agent}: node {node} already activated")
            }
            Self::ZeroRateActivation { agent, node } => {
                write!(f, "agent {agent}: node {node} has rate zero")
            }
        }
    }
}

impl std::error::Error for ApplyFailure {}

/// Apply a joint action to `state`, producing the successor state.
///
/// # Errors
///
/// Returns [`ApplyFailure`] if any agent action is illegal in `state`.
pub fn apply(
    graph: &GraphV1,
    state: &JointStateV1,
    joint: &JointActionV1,
) -> Result<JointStateV1, ApplyFailure> {
    if joint.len() != state.agent_count() {
        return Err(ApplyFailure::AgentCountMismatch {
            expected: state.agent_count(),
            actual: joint.len(),
        });
    }

    let mut next = state.clone();
    next.score = state.score.saturating_add(state.flow(graph));

    for (agent, action) in joint.actions().iter().enumerate() {
        let origin = action.origin();
        let destination = action.destination();
        for node in [origin, destination] {
            if !graph.contains(node) {
                return Err(ApplyFailure::UnknownNode { agent, node });
            }
        }
        let location = state.locations[agent];
        if origin != location {
            return Err(ApplyFailure::NotAtLocation {
                agent,
                location,
                origin,
            });
        }

        match *action {
            ActionV1::Activate { node } => {
                if graph.rate(node) == 0 {
                    return Err(ApplyFailure::ZeroRateActivation { agent, node });
                }
                if !next.activated.insert(node) {
                    return Err(ApplyFailure::AlreadyActivated { agent, node });
                }
            }
            ActionV1::MoveTo { from, to } => {
                if !graph.is_adjacent(from, to) {
                    return Err(ApplyFailure::NotAdjacent { agent, from, to });
                }
                next.locations[agent] = to;
            }
            ActionV1::Wait { .. } => {}
        }
    }

    next.t = state.t.saturating_add(1);
    Ok(next)
}
