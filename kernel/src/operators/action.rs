//! Agent-local actions and the joint action applied in one tick.

use crate::carrier::graph::{GraphV1, NodeId};

/// A single agent's action for one tick.
///
/// Closed variant: every consumer matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionV1 {
    /// Activate the node the agent is standing on.
    Activate { node: NodeId },
    /// Move along an edge.
    MoveTo { from: NodeId, to: NodeId },
    /// Stay put. Only offered when the agent has no other legal action.
    Wait { at: NodeId },
}

impl ActionV1 {
    /// The node the agent must be standing on to take this action.
    #[must_use]
    pub const fn origin(&self) -> NodeId {
        match *self {
            Self::Activate { node } => node,
            Self::MoveTo { from, .. } => from,
            Self::Wait { at } => at,
        }
    }

    /// The agent's location after the action resolves.
    #[must_use]
    pub const fn destination(&self) -> NodeId {
        match *self {
            Self::Activate { node } => node,
            Self::MoveTo { to, .. } => to,
            Self::Wait { at } => at,
        }
    }

    /// Short rendering with graph labels, e.g. `"open BB"`, `"AA->DD"`.
    #[must_use]
    pub fn render(&self, graph: &GraphV1) -> String {
        let label = |id: NodeId| graph.label(id).map_or_else(|| id.to_string(), str::to_string);
        match *self {
            Self::Activate { node } => format!("open {}", label(node)),
            Self::MoveTo { from, to } => format!("{}->{}", label(from), label(to)),
            Self::Wait { at } => format!("wait {}", label(at)),
        }
    }
}

/// One action per agent, in agent order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JointActionV1(pub Vec<ActionV1>);

impl JointActionV1 {
    /// The per-agent actions.
    #[must_use]
    pub fn actions(&self) -> &[ActionV1] {
        &self.0
    }

    /// Number of agent actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty joint action (zero agents).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `"[open BB, AA->DD]"`.
    #[must_use]
    pub fn render(&self, graph: &GraphV1) -> String {
        let parts: Vec<String> = self.0.iter().map(|a| a.render(graph)).collect();
        format!("[{}]", parts.join(", "))
    }
}
