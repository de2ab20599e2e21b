//! Built-in graphs with known answers.

use flowline_kernel::carrier::graph::GraphV1;

use crate::parse::{parse_graph, LoadError};

/// Ten-node sample graph in the puzzle form.
pub const SAMPLE_GRAPH: &str = "\
Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
Valve BB has flow rate=13; tunnels lead to valves CC, AA
Valve CC has flow rate=2; tunnels lead to valves DD, BB
Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
Valve EE has flow rate=3; tunnels lead to valves FF, DD
Valve FF has flow rate=0; tunnels lead to valves EE, GG
Valve GG has flow rate=0; tunnels lead to valves FF, HH
Valve HH has flow rate=22; tunnel leads to valve GG
Valve II has flow rate=0; tunnels lead to valves AA, JJ
Valve JJ has flow rate=21; tunnel leads to valve II
";

/// The same graph in the compact form.
pub const SAMPLE_GRAPH_COMPACT: &str = "\
AA rate=0; tunnels to DD, II, BB
BB rate=13; tunnels to CC, AA
CC rate=2; tunnels to DD, BB
DD rate=20; tunnels to CC, AA, EE
EE rate=3; tunnels to FF, DD
FF rate=0; tunnels to EE, GG
GG rate=0; tunnels to FF, HH
HH rate=22; tunnels to GG
II rate=0; tunnels to AA, JJ
JJ rate=21; tunnels to II
";

/// Start node of the sample.
pub const SAMPLE_START: &str = "AA";

/// Best score for one agent over 30 ticks.
pub const SAMPLE_ONE_AGENT_30: i64 = 1651;

/// Best score for two agents over 26 ticks.
pub const SAMPLE_TWO_AGENTS_26: i64 = 1707;

/// Parse [`SAMPLE_GRAPH`].
///
/// # Errors
///
/// Only if the line grammar itself is broken.
pub fn sample_graph() -> Result<GraphV1, LoadError> {
    parse_graph(SAMPLE_GRAPH)
}
