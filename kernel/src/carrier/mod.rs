//! Carrier module: the graph model, node sets, and the joint search state.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod graph;
pub mod joint_state;
pub mod node_set;
