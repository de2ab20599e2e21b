//! Structural properties of the search result and its building blocks.

use flowline_kernel::carrier::graph::{GraphV1, NodeId};
use flowline_kernel::carrier::joint_state::JointStateV1;
use flowline_kernel::operators::action::{ActionV1, JointActionV1};
use flowline_kernel::operators::apply::apply;
use flowline_search::bound::{optimistic_bound, pessimistic_bound};
use flowline_search::frontier::LevelFrontier;
use flowline_search::generator::joint_actions;
use flowline_search::observer::NoOpObserver;
use flowline_search::policy::SearchPolicyV1;
use flowline_search::{search_from, solve};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lock_tests::graphs::{graph, random_graph, zero_reward_graph};
use lock_tests::oracle::best_total_from;

/// Walk `steps` random generated joint actions from the seed.
fn random_walk(graph: &GraphV1, agents: usize, steps: u32, rng: &mut StdRng) -> JointStateV1 {
    let mut state = JointStateV1::seed(NodeId::new(0), agents);
    for _ in 0..steps {
        let joints = joint_actions(graph, &state);
        let pick = rng.random_range(0..joints.len());
        state = apply(graph, &state, &joints[pick]).unwrap();
    }
    state
}

// ---------------------------------------------------------------------------
// Monotonicity
// ---------------------------------------------------------------------------

#[test]
fn best_score_never_drops_with_more_time() {
    for seed in 0..10u64 {
        let g = random_graph(seed, 5, 9);
        for agents in 1..=2 {
            let scores: Vec<i64> = (0..=8)
                .map(|h| solve(&g, "N0", agents, h).unwrap())
                .collect();
            assert!(
                scores.windows(2).all(|w| w[0] <= w[1]),
                "seed={seed} agents={agents} scores={scores:?}"
            );
        }
    }
}

#[test]
fn best_score_never_drops_with_more_agents() {
    for seed in 20..30u64 {
        let g = random_graph(seed, 5, 9);
        for horizon in [3, 5, 7] {
            let scores: Vec<i64> = (0..=3)
                .map(|a| solve(&g, "N0", a, horizon).unwrap())
                .collect();
            assert!(
                scores.windows(2).all(|w| w[0] <= w[1]),
                "seed={seed} horizon={horizon} scores={scores:?}"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Closed-form cases
// ---------------------------------------------------------------------------

#[test]
fn zero_reward_graph_scores_zero() {
    for seed in 0..8u64 {
        let g = zero_reward_graph(seed, 5);
        for agents in 0..=2 {
            assert_eq!(solve(&g, "N0", agents, 10).unwrap(), 0);
        }
    }
}

#[test]
fn single_node_pays_from_the_tick_after_activation() {
    for rate in [1u32, 7, 40] {
        let g = graph(&[("N0", rate, &[])]);
        for horizon in 0..=6u32 {
            let expected = i64::from(rate) * i64::from(horizon.saturating_sub(1));
            for agents in 1..=3 {
                assert_eq!(
                    solve(&g, "N0", agents, horizon).unwrap(),
                    expected,
                    "rate={rate} horizon={horizon} agents={agents}"
                );
            }
        }
    }
}

#[test]
fn accrual_counts_every_tick_after_activation() {
    // Walk to N1 (tick 0), activate (tick 1); N1 pays on ticks 2..horizon.
    let g = graph(&[("N0", 0, &["N1"]), ("N1", 5, &["N0"])]);
    assert_eq!(solve(&g, "N0", 1, 2).unwrap(), 0);
    assert_eq!(solve(&g, "N0", 1, 3).unwrap(), 5);
    assert_eq!(solve(&g, "N0", 1, 10).unwrap(), 40);
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[test]
fn bounds_bracket_the_true_value() {
    let mut rng = StdRng::seed_from_u64(77);
    for seed in 0..12u64 {
        let g = random_graph(seed, 5, 9);
        let horizon = 7;
        for agents in 1..=2 {
            for steps in 0..=horizon {
                let state = random_walk(&g, agents, steps, &mut rng);
                let value = best_total_from(&g, &state, horizon);
                let low = pessimistic_bound(&g, &state, horizon);
                let high = optimistic_bound(&g, &state, horizon);
                assert!(
                    low <= value && value <= high,
                    "seed={seed} t={} low={low} value={value} high={high}",
                    state.t
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Symmetry
// ---------------------------------------------------------------------------

#[test]
fn permuted_agents_reach_the_same_score() {
    let mut rng = StdRng::seed_from_u64(5);
    for seed in 40..50u64 {
        let g = random_graph(seed, 5, 9);
        let horizon = 7;
        let state = random_walk(&g, 2, 2, &mut rng);
        let mut swapped = state.clone();
        swapped.locations.reverse();
        assert_eq!(state.canonical_key(), swapped.canonical_key());

        let policy = SearchPolicyV1::default();
        let a = search_from(&g, state.clone(), horizon, &policy, &mut NoOpObserver).unwrap();
        let b = search_from(&g, swapped, horizon, &policy, &mut NoOpObserver).unwrap();
        assert_eq!(a.best_score, b.best_score, "seed={seed}");
        assert_eq!(a.best_score, best_total_from(&g, &state, horizon));
    }
}

#[test]
fn colocated_agents_get_no_mirror_joint_actions() {
    let g = graph(&[
        ("N0", 4, &["N1", "N2"]),
        ("N1", 3, &["N0"]),
        ("N2", 2, &["N0"]),
    ]);
    let state = JointStateV1::seed(NodeId::new(0), 2);
    let joints = joint_actions(&g, &state);

    let mut keys: Vec<_> = joints
        .iter()
        .map(|j| apply(&g, &state, j).unwrap().canonical_key())
        .collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total, "two joint actions lead to the same place");

    // Only the first co-located agent activates.
    assert!(joints.iter().all(|j| !matches!(
        j.actions()[1],
        ActionV1::Activate { .. }
    )));
    assert!(joints.contains(&JointActionV1(vec![
        ActionV1::Activate { node: NodeId::new(0) },
        ActionV1::MoveTo {
            from: NodeId::new(0),
            to: NodeId::new(1)
        },
    ])));
}

#[test]
fn level_frontier_holds_one_state_per_key() {
    let mut rng = StdRng::seed_from_u64(9);
    let g = random_graph(3, 5, 9);
    let mut level = LevelFrontier::new();
    let mut distinct = std::collections::BTreeSet::new();
    for _ in 0..200 {
        let state = random_walk(&g, 2, 3, &mut rng);
        let key = state.canonical_key();
        let fresh = distinct.insert(key.clone());
        let replaced = level.insert_keyed(key, state);
        assert_eq!(fresh, replaced.is_none());
    }
    assert_eq!(level.len(), distinct.len());
    let keys: std::collections::BTreeSet<_> = level
        .into_states()
        .iter()
        .map(JointStateV1::canonical_key)
        .collect();
    assert_eq!(keys, distinct);
}
