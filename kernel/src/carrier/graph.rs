//! `GraphV1`: the immutable node/rate/adjacency model.
//!
//! Nodes are addressed by a dense [`NodeId`] assigned in record order. The
//! external identifier (e.g. `"AA"`) is kept as the node's label and is only
//! consulted at the boundary (start-node lookup, rendering, reports).
//!
//! # Invariants
//!
//! - Every neighbor reference resolves to a node in the same graph.
//! - Labels are unique.
//! - The graph is never mutated after [`GraphV1::from_records`] returns.

use std::collections::BTreeMap;

/// Dense node index into a [`GraphV1`].
///
/// Ordering follows record order, which makes it a valid total order for
/// canonical keys and symmetry breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u16);

impl NodeId {
    /// Construct from a raw index. Callers must stay within the graph bounds;
    /// out-of-range ids are rejected by every graph query that matters.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw index as `usize` for slice addressing.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The raw `u16` value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Little-endian bytes (used by identity serialization).
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unresolved node description, as produced by an input parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecordV1 {
    /// External identifier.
    pub label: String,
    /// Reward accrued per tick once the node is activated.
    pub rate: u32,
    /// Ordered neighbor labels.
    pub neighbors: Vec<String>,
}

/// A resolved graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeV1 {
    pub id: NodeId,
    pub label: String,
    pub rate: u32,
    /// Ordered adjacency, preserving record order.
    pub neighbors: Vec<NodeId>,
}

/// Typed failure for graph construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two records share the same label.
    DuplicateNode { label: String },
    /// A neighbor label does not name any record.
    UnknownNeighbor { node: String, neighbor: String },
    /// More nodes than `NodeId` can address.
    TooManyNodes { count: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateNode { label } => write!(f, "duplicate node id: {label}"),
            Self::UnknownNeighbor { node, neighbor } => {
                write!(f, "node {node} references undefined node {neighbor}")
            }
            Self::TooManyNodes { count } => {
                write!(f, "graph has {count} nodes, more than {} supported", u16::MAX)
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Immutable graph model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphV1 {
    nodes: Vec<NodeV1>,
    by_label: BTreeMap<String, NodeId>,
    total_rate: i64,
}

impl GraphV1 {
    /// Resolve records into a graph.
    ///
    /// Ids are assigned in record order. Neighbor lists keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] on duplicate labels, dangling neighbor
    /// references, or more than `u16::MAX` records.
    pub fn from_records(records: Vec<NodeRecordV1>) -> Result<Self, GraphError> {
        if records.len() > usize::from(u16::MAX) {
            return Err(GraphError::TooManyNodes {
                count: records.len(),
            });
        }

        let mut by_label = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let id = NodeId::new(i as u16);
            if by_label.insert(record.label.clone(), id).is_some() {
                return Err(GraphError::DuplicateNode {
                    label: record.label.clone(),
                });
            }
        }

        let mut nodes = Vec::with_capacity(records.len());
        let mut total_rate: i64 = 0;
        for (i, record) in records.into_iter().enumerate() {
            let mut neighbors = Vec::with_capacity(record.neighbors.len());
            for neighbor in &record.neighbors {
                let Some(&nid) = by_label.get(neighbor) else {
                    return Err(GraphError::UnknownNeighbor {
                        node: record.label,
                        neighbor: neighbor.clone(),
                    });
                };
                neighbors.push(nid);
            }
            total_rate = total_rate.saturating_add(i64::from(record.rate));
            #[allow(clippy::cast_possible_truncation)]
            nodes.push(NodeV1 {
                id: NodeId::new(i as u16),
                label: record.label,
                rate: record.rate,
                neighbors,
            });
        }

        Ok(Self {
            nodes,
            by_label,
            total_rate,
        })
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by its external label.
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    /// Whether `id` addresses a node in this graph.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Node by id, `None` when out of range.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeV1> {
        self.nodes.get(id.index())
    }

    /// Ordered neighbors of `id`. Empty for unknown ids.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.neighbors.as_slice())
    }

    /// Reward rate of `id`. Zero for unknown ids.
    #[must_use]
    pub fn rate(&self, id: NodeId) -> u32 {
        self.node(id).map_or(0, |n| n.rate)
    }

    /// External label of `id`.
    #[must_use]
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.label.as_str())
    }

    /// Whether `to` is in the adjacency list of `from`.
    #[must_use]
    pub fn is_adjacent(&self, from: NodeId, to: NodeId) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Sum of all node rates (cached at construction).
    #[must_use]
    pub fn total_rate(&self) -> i64 {
        self.total_rate
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeV1> {
        self.nodes.iter()
    }

    /// Deterministic JSON rendering (records in id order, neighbors by label).
    #[must_use]
    pub fn to_canonical_json_value(&self) -> serde_json::Value {
        let nodes: Vec<serde_json::Value> = self
            .nodes
            .iter()
            .map(|n| {
                let neighbors: Vec<&str> = n
                    .neighbors
                    .iter()
                    .filter_map(|&nid| self.label(nid))
                    .collect();
                serde_json::json!({
                    "id": n.label,
                    "neighbors": neighbors,
                    "rate": n.rate,
                })
            })
            .collect();
        serde_json::json!({ "nodes": nodes })
    }
}
