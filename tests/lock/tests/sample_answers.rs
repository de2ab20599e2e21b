//! Known answers for the ten-node sample graph.

use flowline_harness::fixtures::{
    sample_graph, SAMPLE_GRAPH_COMPACT, SAMPLE_ONE_AGENT_30, SAMPLE_START, SAMPLE_TWO_AGENTS_26,
};
use flowline_harness::parse::parse_graph;
use flowline_search::observer::NoOpObserver;
use flowline_search::policy::{SearchPolicyV1, TraversalV1};
use flowline_search::{search, solve};

fn depth_first() -> SearchPolicyV1 {
    SearchPolicyV1 {
        traversal: TraversalV1::DepthFirst,
        ..SearchPolicyV1::default()
    }
}

#[test]
fn one_agent_thirty_ticks() {
    let g = sample_graph().unwrap();
    assert_eq!(solve(&g, SAMPLE_START, 1, 30).unwrap(), SAMPLE_ONE_AGENT_30);
    let dfs = search(&g, SAMPLE_START, 1, 30, &depth_first(), &mut NoOpObserver).unwrap();
    assert_eq!(dfs.best_score, SAMPLE_ONE_AGENT_30);
    assert!(dfs.exact);
}

#[test]
fn two_agents_twenty_six_ticks() {
    let g = sample_graph().unwrap();
    assert_eq!(solve(&g, SAMPLE_START, 2, 26).unwrap(), SAMPLE_TWO_AGENTS_26);
    let dfs = search(&g, SAMPLE_START, 2, 26, &depth_first(), &mut NoOpObserver).unwrap();
    assert_eq!(dfs.best_score, SAMPLE_TWO_AGENTS_26);
    assert!(dfs.exact);
}

#[test]
fn depth_first_expansions_stay_near_breadth_first() {
    let g = sample_graph().unwrap();
    for (agents, horizon) in [(1, 30), (2, 20), (2, 26)] {
        let bfs = search(
            &g,
            SAMPLE_START,
            agents,
            horizon,
            &SearchPolicyV1::default(),
            &mut NoOpObserver,
        )
        .unwrap();
        let dfs = search(&g, SAMPLE_START, agents, horizon, &depth_first(), &mut NoOpObserver)
            .unwrap();
        assert_eq!(dfs.best_score, bfs.best_score, "agents={agents} horizon={horizon}");
        assert!(dfs.exact);
        assert!(
            dfs.stats.expansions <= 50_000,
            "agents={agents} horizon={horizon}: {} depth-first expansions vs {} breadth-first",
            dfs.stats.expansions,
            bfs.stats.expansions
        );
    }
}

#[test]
fn two_agents_in_parallel_mode() {
    let g = sample_graph().unwrap();
    let policy = SearchPolicyV1 {
        parallel_expansion: true,
        ..SearchPolicyV1::default()
    };
    let outcome = search(&g, SAMPLE_START, 2, 26, &policy, &mut NoOpObserver).unwrap();
    assert_eq!(outcome.best_score, SAMPLE_TWO_AGENTS_26);
}

#[test]
fn compact_form_gives_the_same_answers() {
    let g = parse_graph(SAMPLE_GRAPH_COMPACT).unwrap();
    assert_eq!(solve(&g, SAMPLE_START, 1, 30).unwrap(), SAMPLE_ONE_AGENT_30);
    assert_eq!(solve(&g, SAMPLE_START, 2, 26).unwrap(), SAMPLE_TWO_AGENTS_26);
}

#[test]
fn best_leaf_matches_best_score() {
    let g = sample_graph().unwrap();
    let outcome = search(
        &g,
        SAMPLE_START,
        1,
        30,
        &SearchPolicyV1::default(),
        &mut NoOpObserver,
    )
    .unwrap();
    let leaf = outcome.best_leaf.unwrap();
    assert_eq!(leaf.score, SAMPLE_ONE_AGENT_30);
    // Every positive-rate node is open in the best plan.
    assert_eq!(leaf.key.activated.len(), 6);
}
