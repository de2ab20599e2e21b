//! Shared regimes for the flowline benchmark suites.
//!
//! A regime is a fixed `(graph, start, agents, horizon, policy)` tuple. Each
//! regime carries an input digest so benchmark history can be matched to the
//! exact inputs it measured.

use flowline_harness::fixtures::{sample_graph, SAMPLE_START};
use flowline_harness::parse::parse_graph;
use flowline_kernel::carrier::graph::GraphV1;
use flowline_kernel::proof::canon::canonical_json_bytes;
use flowline_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use flowline_search::observer::NoOpObserver;
use flowline_search::policy::{SearchPolicyV1, TraversalV1};
use flowline_search::report::SearchOutcomeV1;
use flowline_search::search;

/// One benchmark input.
pub struct Regime {
    pub name: &'static str,
    pub graph: GraphV1,
    pub start: &'static str,
    pub agent_count: usize,
    pub horizon: u32,
    pub policy: SearchPolicyV1,
}

impl Regime {
    /// Digest of the graph, run parameters and policy.
    ///
    /// # Panics
    ///
    /// Panics if the input cannot be canonicalized.
    #[must_use]
    pub fn input_digest(&self) -> ContentHash {
        let value = serde_json::json!({
            "agent_count": self.agent_count,
            "graph": self.graph.to_canonical_json_value(),
            "horizon": self.horizon,
            "name": self.name,
            "policy": self.policy.to_json_value(),
            "start": self.start,
        });
        let bytes = canonical_json_bytes(&value).expect("benchmark input canonicalizes");
        canonical_hash(HashDomain::BenchInput, &bytes)
    }

    /// Run the search.
    ///
    /// # Panics
    ///
    /// Panics if the search fails. Benchmark runs are expected to succeed.
    #[must_use]
    pub fn run(&self) -> SearchOutcomeV1 {
        search(
            &self.graph,
            self.start,
            self.agent_count,
            self.horizon,
            &self.policy,
            &mut NoOpObserver,
        )
        .expect("benchmark search should succeed")
    }
}

/// A larger graph: a ring of `n` nodes with chords and mixed rates.
///
/// # Panics
///
/// Panics if the generated text fails to parse.
#[must_use]
pub fn ring_graph(n: usize) -> GraphV1 {
    let text: Vec<String> = (0..n)
        .map(|i| {
            let rate = if i % 3 == 0 { 0 } else { (i * 7) % 23 + 1 };
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let chord = (i + n / 2) % n;
            format!("R{i} rate={rate}; tunnels to R{prev}, R{next}, R{chord}")
        })
        .collect();
    parse_graph(&text.join("\n")).expect("ring graph parses")
}

fn sample() -> GraphV1 {
    sample_graph().expect("sample graph parses")
}

/// Regimes covering both traversals, parallel expansion and the switches.
///
/// # Panics
///
/// Panics if a built-in graph fails to parse.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    let bfs = SearchPolicyV1::default();
    let dfs = SearchPolicyV1 {
        traversal: TraversalV1::DepthFirst,
        ..SearchPolicyV1::default()
    };
    let parallel = SearchPolicyV1 {
        parallel_expansion: true,
        ..SearchPolicyV1::default()
    };
    let no_prune = SearchPolicyV1 {
        prune_with_optimistic_bound: false,
        ..SearchPolicyV1::default()
    };

    vec![
        Regime {
            name: "sample_1x30_bfs",
            graph: sample(),
            start: SAMPLE_START,
            agent_count: 1,
            horizon: 30,
            policy: bfs.clone(),
        },
        Regime {
            name: "sample_1x30_dfs",
            graph: sample(),
            start: SAMPLE_START,
            agent_count: 1,
            horizon: 30,
            policy: dfs.clone(),
        },
        Regime {
            name: "sample_2x26_bfs",
            graph: sample(),
            start: SAMPLE_START,
            agent_count: 2,
            horizon: 26,
            policy: bfs,
        },
        Regime {
            name: "sample_2x26_parallel",
            graph: sample(),
            start: SAMPLE_START,
            agent_count: 2,
            horizon: 26,
            policy: parallel,
        },
        Regime {
            name: "sample_1x16_no_prune",
            graph: sample(),
            start: SAMPLE_START,
            agent_count: 1,
            horizon: 16,
            policy: no_prune,
        },
        Regime {
            name: "ring24_2x14_dfs",
            graph: ring_graph(24),
            start: "R0",
            agent_count: 2,
            horizon: 14,
            policy: dfs,
        },
    ]
}
