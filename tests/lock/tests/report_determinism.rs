//! Reports are byte-stable: same input and policy, same bytes and digest.

use flowline_harness::fixtures::{SAMPLE_GRAPH, SAMPLE_GRAPH_COMPACT, SAMPLE_ONE_AGENT_30};
use flowline_harness::runner::{run, RunConfig};
use flowline_kernel::proof::canon::canonical_json_bytes;
use flowline_kernel::proof::hash::ContentHash;
use flowline_search::policy::{SearchPolicyV1, TraversalV1};

fn config(horizon: u32, policy: SearchPolicyV1) -> RunConfig {
    RunConfig {
        horizon,
        policy,
        ..RunConfig::default()
    }
}

#[test]
fn repeated_runs_produce_identical_bytes() {
    let cfg = config(30, SearchPolicyV1::default());
    let first = run(SAMPLE_GRAPH, &cfg).unwrap();
    assert_eq!(first.outcome.best_score, SAMPLE_ONE_AGENT_30);
    for _ in 0..5 {
        let again = run(SAMPLE_GRAPH, &cfg).unwrap();
        assert_eq!(again.report_bytes, first.report_bytes);
        assert_eq!(again.report_digest, first.report_digest);
    }
}

#[test]
fn report_bytes_are_already_canonical() {
    let output = run(SAMPLE_GRAPH, &config(12, SearchPolicyV1::default())).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.report_bytes).unwrap();
    assert_eq!(canonical_json_bytes(&value).unwrap(), output.report_bytes);
    assert!(!output.report_bytes.contains(&b'\n'));
    assert!(output.report_digest.as_str().starts_with("sha256:"));

    let embedded = value["graph_digest"].as_str().unwrap();
    assert_eq!(ContentHash::from_rendered(embedded), Some(output.graph_digest));
}

#[test]
fn both_input_forms_share_a_graph_digest() {
    let cfg = config(10, SearchPolicyV1::default());
    let puzzle = run(SAMPLE_GRAPH, &cfg).unwrap();
    let compact = run(SAMPLE_GRAPH_COMPACT, &cfg).unwrap();
    assert_eq!(puzzle.graph_digest, compact.graph_digest);
    assert_eq!(puzzle.report_bytes, compact.report_bytes);
}

#[test]
fn parallel_run_differs_only_in_policy_echo() {
    let sequential = run(SAMPLE_GRAPH, &config(14, SearchPolicyV1::default())).unwrap();
    let parallel = run(
        SAMPLE_GRAPH,
        &config(
            14,
            SearchPolicyV1 {
                parallel_expansion: true,
                ..SearchPolicyV1::default()
            },
        ),
    )
    .unwrap();
    let a: serde_json::Value = serde_json::from_slice(&sequential.report_bytes).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&parallel.report_bytes).unwrap();
    for field in ["result", "stats", "levels", "graph_digest"] {
        assert_eq!(a[field], b[field], "{field} differs");
    }
    assert_ne!(a["policy_digest"], b["policy_digest"]);
}

#[test]
fn traversal_choice_is_recorded() {
    let output = run(
        SAMPLE_GRAPH,
        &config(
            8,
            SearchPolicyV1 {
                traversal: TraversalV1::DepthFirst,
                ..SearchPolicyV1::default()
            },
        ),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.report_bytes).unwrap();
    assert_eq!(value["policy"]["traversal"], "depth_first");
    assert_eq!(value["result"]["exact"], true);
    assert_eq!(value["levels"], serde_json::json!([]));
}
