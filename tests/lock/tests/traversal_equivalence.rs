//! Traversal order, parallel expansion and the pruning switches change the
//! work done, never the answer.

use flowline_kernel::carrier::graph::GraphV1;
use flowline_search::observer::NoOpObserver;
use flowline_search::policy::{SearchPolicyV1, TraversalV1};
use flowline_search::report::{SearchOutcomeV1, TerminationReasonV1};
use flowline_search::search;

use flowline_harness::fixtures::{sample_graph, SAMPLE_START};
use lock_tests::graphs::random_graph;

fn run(graph: &GraphV1, start: &str, agents: usize, horizon: u32, policy: &SearchPolicyV1) -> SearchOutcomeV1 {
    search(graph, start, agents, horizon, policy, &mut NoOpObserver).unwrap()
}

fn switch_grid() -> Vec<SearchPolicyV1> {
    let mut out = Vec::new();
    for traversal in [TraversalV1::BreadthFirst, TraversalV1::DepthFirst] {
        for prune in [true, false] {
            for dedup in [true, false] {
                out.push(SearchPolicyV1 {
                    traversal,
                    prune_with_optimistic_bound: prune,
                    dedup,
                    ..SearchPolicyV1::default()
                });
            }
        }
    }
    out
}

#[test]
fn every_switch_combination_agrees() {
    for seed in 300..312u64 {
        let g = random_graph(seed, 5, 9);
        for agents in 1..=2 {
            let horizon = 5;
            let reference = run(&g, "N0", agents, horizon, &SearchPolicyV1::default()).best_score;
            for policy in switch_grid() {
                let outcome = run(&g, "N0", agents, horizon, &policy);
                assert_eq!(
                    outcome.best_score, reference,
                    "seed={seed} agents={agents} policy={policy:?}"
                );
                assert!(outcome.exact);
            }
        }
    }
}

#[test]
fn parallel_expansion_is_indistinguishable_from_sequential() {
    let g = sample_graph().unwrap();
    let sequential = run(&g, SAMPLE_START, 2, 12, &SearchPolicyV1::default());
    let parallel = run(
        &g,
        SAMPLE_START,
        2,
        12,
        &SearchPolicyV1 {
            parallel_expansion: true,
            ..SearchPolicyV1::default()
        },
    );
    assert_eq!(sequential, parallel);
}

#[test]
fn pruning_and_dedup_reduce_work() {
    let g = sample_graph().unwrap();
    let full = run(&g, SAMPLE_START, 1, 10, &SearchPolicyV1::default());
    let bare = run(
        &g,
        SAMPLE_START,
        1,
        10,
        &SearchPolicyV1 {
            prune_with_optimistic_bound: false,
            dedup: false,
            ..SearchPolicyV1::default()
        },
    );
    assert_eq!(full.best_score, bare.best_score);
    assert!(full.stats.expansions < bare.stats.expansions);
    assert_eq!(bare.stats.pruned_by_bound, 0);
    assert_eq!(bare.stats.dedup_entries, 0);
}

#[test]
fn depth_first_reports_no_levels() {
    let g = sample_graph().unwrap();
    let dfs = run(
        &g,
        SAMPLE_START,
        1,
        8,
        &SearchPolicyV1 {
            traversal: TraversalV1::DepthFirst,
            ..SearchPolicyV1::default()
        },
    );
    let bfs = run(&g, SAMPLE_START, 1, 8, &SearchPolicyV1::default());
    assert!(dfs.levels.is_empty());
    assert_eq!(bfs.levels.len(), 8);
    assert_eq!(dfs.best_score, bfs.best_score);
}

#[test]
fn limited_runs_never_overstate() {
    let g = sample_graph().unwrap();
    let exact = run(&g, SAMPLE_START, 1, 30, &SearchPolicyV1::default()).best_score;
    for budget in [1u64, 10, 100, 1000] {
        for traversal in [TraversalV1::BreadthFirst, TraversalV1::DepthFirst] {
            let outcome = run(
                &g,
                SAMPLE_START,
                1,
                30,
                &SearchPolicyV1 {
                    traversal,
                    max_expansions: Some(budget),
                    ..SearchPolicyV1::default()
                },
            );
            assert!(outcome.best_score <= exact, "budget={budget}");
            assert!(outcome.best_score >= 0);
            if outcome.termination != TerminationReasonV1::Completed {
                assert!(!outcome.exact);
            }
        }
    }
}
