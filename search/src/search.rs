//! Search entry points and the expansion loops.
//!
//! Every generated successor goes through the same admission sequence:
//!
//! 1. at the horizon: offered to the incumbent as a leaf, never expanded;
//! 2. optimistic bound below the incumbent floor: pruned;
//! 3. canonical-key dedup (when enabled): dominated successors are dropped;
//! 4. otherwise accepted for expansion.
//!
//! Breadth-first order expands one tick per level. Depth-first order expands
//! each accepted successor immediately and dedups with
//! [`DominanceRuleV1::EarlierAndBetter`]. Both are exact.
//!
//! A completed run reports the incumbent floor, not just the best leaf. Dedup
//! may drop every path that realizes a pessimistic bound (on a zero-reward
//! graph, every idle path revisits a key), but the bound itself stays
//! achievable.

use std::time::Instant;

use rayon::prelude::*;

use flowline_kernel::carrier::graph::GraphV1;
use flowline_kernel::carrier::joint_state::{CanonicalKeyV1, JointStateV1};
use flowline_kernel::operators::action::JointActionV1;
use flowline_kernel::operators::apply::{apply, ApplyFailure};

use crate::bound::{optimistic_bound, pessimistic_bound};
use crate::dedup::{key_fingerprint, DedupDecisionV1, DedupMapV1, DominanceRuleV1};
use crate::error::SearchError;
use crate::frontier::{DepthStack, LevelFrontier};
use crate::generator::joint_actions;
use crate::incumbent::Incumbent;
use crate::observer::{NoOpObserver, SearchObserverV1};
use crate::policy::{SearchPolicyV1, TraversalV1};
use crate::report::{LevelSummaryV1, SearchOutcomeV1, SearchStatsV1, TerminationReasonV1};

/// Best achievable total reward with the default policy.
///
/// # Errors
///
/// Returns [`SearchError::UnknownStartNode`] if `start_label` is not in the
/// graph, or [`SearchError::InvariantViolation`] on an engine bug.
pub fn solve(
    graph: &GraphV1,
    start_label: &str,
    agent_count: usize,
    horizon: u32,
) -> Result<i64, SearchError> {
    let outcome = search(
        graph,
        start_label,
        agent_count,
        horizon,
        &SearchPolicyV1::default(),
        &mut NoOpObserver,
    )?;
    Ok(outcome.best_score)
}

/// Run a search with an explicit policy and observer.
///
/// Hitting a policy limit is not an error: the outcome carries the
/// termination reason and `exact = false`.
///
/// # Errors
///
/// Returns [`SearchError::UnsupportedPolicyMode`] for an invalid policy,
/// [`SearchError::UnknownStartNode`] for an unresolved start label, and
/// [`SearchError::InvariantViolation`] if the kernel rejects a generated
/// joint action.
pub fn search(
    graph: &GraphV1,
    start_label: &str,
    agent_count: usize,
    horizon: u32,
    policy: &SearchPolicyV1,
    observer: &mut dyn SearchObserverV1,
) -> Result<SearchOutcomeV1, SearchError> {
    let start = graph
        .lookup(start_label)
        .ok_or_else(|| SearchError::UnknownStartNode {
            label: start_label.to_string(),
        })?;
    search_from(
        graph,
        JointStateV1::seed(start, agent_count),
        horizon,
        policy,
        observer,
    )
}

/// Run a search from an arbitrary state (e.g. agents already spread out).
///
/// # Errors
///
/// As [`search`]; a seed naming a node outside the graph is reported as
/// [`SearchError::UnknownStartNode`].
pub fn search_from(
    graph: &GraphV1,
    seed: JointStateV1,
    horizon: u32,
    policy: &SearchPolicyV1,
    observer: &mut dyn SearchObserverV1,
) -> Result<SearchOutcomeV1, SearchError> {
    policy.validate()?;
    let unknown = seed
        .locations
        .iter()
        .copied()
        .chain(seed.activated.iter())
        .find(|&id| !graph.contains(id));
    if let Some(missing) = unknown {
        return Err(SearchError::UnknownStartNode {
            label: missing.to_string(),
        });
    }

    let rule = match policy.traversal {
        TraversalV1::BreadthFirst => DominanceRuleV1::Level,
        TraversalV1::DepthFirst => DominanceRuleV1::EarlierAndBetter,
    };
    let mut run = SearchRun {
        graph,
        horizon,
        policy,
        observer,
        dedup: DedupMapV1::with_rule(rule),
        incumbent: Incumbent::new(),
        stats: SearchStatsV1::default(),
        levels: Vec::new(),
        started: Instant::now(),
    };

    let termination = if run.admit_seed(&seed) {
        match policy.traversal {
            TraversalV1::BreadthFirst => run.breadth_first(seed)?,
            TraversalV1::DepthFirst => run.depth_first(seed)?,
        }
    } else {
        TerminationReasonV1::Completed
    };
    run.finish(termination)
}

/// Result of submitting a successor.
enum Admission {
    Leaf,
    Pruned,
    Dominated,
    /// Accepted; carries the canonical key when dedup is on.
    Accepted(Option<CanonicalKeyV1>),
}

struct SearchRun<'a> {
    graph: &'a GraphV1,
    horizon: u32,
    policy: &'a SearchPolicyV1,
    observer: &'a mut dyn SearchObserverV1,
    dedup: DedupMapV1,
    incumbent: Incumbent,
    stats: SearchStatsV1,
    levels: Vec<LevelSummaryV1>,
    started: Instant,
}

impl SearchRun<'_> {
    /// Record the seed. Returns `false` if it is already terminal.
    fn admit_seed(&mut self, seed: &JointStateV1) -> bool {
        if seed.t >= self.horizon {
            self.stats.leaves_reached += 1;
            if self.incumbent.offer_leaf(seed) {
                self.observer.on_new_best(seed.score);
            }
            return false;
        }
        let pessimistic = pessimistic_bound(self.graph, seed, self.horizon);
        self.incumbent.raise_floor(pessimistic);
        if self.policy.dedup {
            self.dedup.offer(seed.canonical_key(), seed.t, pessimistic);
        }
        true
    }

    fn admit(&mut self, child: &JointStateV1) -> Admission {
        self.stats.children_generated += 1;

        if child.t >= self.horizon {
            self.stats.leaves_reached += 1;
            if self.incumbent.offer_leaf(child) {
                self.observer.on_new_best(child.score);
            }
            return Admission::Leaf;
        }

        if self.pruned(child) {
            return Admission::Pruned;
        }

        let pessimistic = pessimistic_bound(self.graph, child, self.horizon);
        self.incumbent.raise_floor(pessimistic);
        if !self.policy.dedup {
            return Admission::Accepted(None);
        }

        let key = child.canonical_key();
        match self.dedup.offer(key.clone(), child.t, pessimistic) {
            DedupDecisionV1::Inserted => Admission::Accepted(Some(key)),
            DedupDecisionV1::Replaced { .. } => {
                self.stats.replaced_duplicates += 1;
                Admission::Accepted(Some(key))
            }
            DedupDecisionV1::Dominated { .. } => {
                self.stats.dominated_duplicates += 1;
                Admission::Dominated
            }
        }
    }

    /// Optimistic-bound check; counts the prune.
    fn pruned(&mut self, state: &JointStateV1) -> bool {
        if !self.policy.prune_with_optimistic_bound {
            return false;
        }
        let optimistic = optimistic_bound(self.graph, state, self.horizon);
        if self.incumbent.prunes(optimistic) {
            self.stats.pruned_by_bound += 1;
            return true;
        }
        false
    }

    /// Expansion and time limits, checked before each expansion.
    fn limit_reached(&self) -> Option<TerminationReasonV1> {
        if let Some(max) = self.policy.max_expansions {
            if self.stats.expansions >= max {
                return Some(TerminationReasonV1::ExpansionBudgetExceeded);
            }
        }
        if let Some(limit) = self.policy.time_limit {
            if self.stats.expansions % self.policy.clock_check_interval == 0
                && self.started.elapsed() >= limit
            {
                return Some(TerminationReasonV1::TimeLimitExceeded);
            }
        }
        None
    }

    fn frontier_exceeded(&mut self, len: usize) -> bool {
        let len = len as u64;
        self.stats.frontier_high_water = self.stats.frontier_high_water.max(len);
        self.policy.max_frontier_size.is_some_and(|max| len > max)
    }

    fn breadth_first(&mut self, seed: JointStateV1) -> Result<TerminationReasonV1, SearchError> {
        let graph = self.graph;
        let mut t = seed.t;
        let mut level = vec![seed];

        while !level.is_empty() {
            self.observer.on_level(t, level.len(), self.dedup.len());
            self.levels.push(LevelSummaryV1 {
                t,
                frontier_len: level.len() as u64,
                dedup_len: self.dedup.len() as u64,
            });
            if self.frontier_exceeded(level.len()) {
                return Ok(TerminationReasonV1::FrontierBudgetExceeded);
            }

            // Parallel mode computes every state's successors up front; the
            // merge below is identical in both modes.
            let mut batches: Vec<Option<Result<Vec<JointStateV1>, SearchError>>> =
                if self.policy.parallel_expansion {
                    level
                        .par_iter()
                        .map(|state| Some(successors(graph, state)))
                        .collect()
                } else {
                    level.iter().map(|_| None).collect()
                };

            let mut next = LevelFrontier::new();
            for (state, batch) in level.iter().zip(batches.iter_mut()) {
                if let Some(reason) = self.limit_reached() {
                    return Ok(reason);
                }
                if self.pruned(state) {
                    continue;
                }
                self.stats.expansions += 1;
                let children = match batch.take() {
                    Some(result) => result?,
                    None => successors(graph, state)?,
                };
                for child in children {
                    match self.admit(&child) {
                        Admission::Accepted(Some(key)) => {
                            next.insert_keyed(key, child);
                        }
                        Admission::Accepted(None) => next.push(child),
                        Admission::Leaf | Admission::Pruned | Admission::Dominated => {}
                    }
                }
            }

            level = next.into_states();
            t = t.saturating_add(1);
        }
        Ok(TerminationReasonV1::Completed)
    }

    fn depth_first(&mut self, seed: JointStateV1) -> Result<TerminationReasonV1, SearchError> {
        let graph = self.graph;
        let mut stack = DepthStack::new();

        if let Some(reason) = self.limit_reached() {
            return Ok(reason);
        }
        self.stats.expansions += 1;
        let actions = joint_actions(graph, &seed);
        stack.push(seed, actions);
        if self.frontier_exceeded(stack.len()) {
            return Ok(TerminationReasonV1::FrontierBudgetExceeded);
        }

        loop {
            let Some(frame) = stack.top_mut() else {
                return Ok(TerminationReasonV1::Completed);
            };
            let Some(joint) = frame.next_action() else {
                stack.pop();
                continue;
            };
            let child = apply(graph, frame.state(), &joint)
                .map_err(|err| invariant_violation(graph, frame.state(), &joint, &err))?;

            if let Admission::Accepted(_) = self.admit(&child) {
                if let Some(reason) = self.limit_reached() {
                    return Ok(reason);
                }
                self.stats.expansions += 1;
                let actions = joint_actions(graph, &child);
                stack.push(child, actions);
                if self.frontier_exceeded(stack.len()) {
                    return Ok(TerminationReasonV1::FrontierBudgetExceeded);
                }
            }
        }
    }

    fn finish(mut self, termination: TerminationReasonV1) -> Result<SearchOutcomeV1, SearchError> {
        self.stats.dedup_entries = self.dedup.len() as u64;
        let exact = termination == TerminationReasonV1::Completed;
        let best_leaf = self.incumbent.best().cloned();

        // The seed either raised the floor or was offered as a leaf.
        let best_score = self.incumbent.floor();
        if best_score == i64::MIN {
            return Err(SearchError::InvariantViolation {
                detail: "search finished without an achievable score".into(),
            });
        }

        let outcome = SearchOutcomeV1 {
            best_score,
            exact,
            best_leaf,
            termination,
            stats: self.stats,
            levels: self.levels,
        };
        self.observer.on_finish(&outcome);
        Ok(outcome)
    }
}

/// Apply every joint action of `state`, in generator order.
fn successors(graph: &GraphV1, state: &JointStateV1) -> Result<Vec<JointStateV1>, SearchError> {
    joint_actions(graph, state)
        .iter()
        .map(|joint| {
            apply(graph, state, joint).map_err(|err| invariant_violation(graph, state, joint, &err))
        })
        .collect()
}

fn invariant_violation(
    graph: &GraphV1,
    state: &JointStateV1,
    joint: &JointActionV1,
    err: &ApplyFailure,
) -> SearchError {
    let key = state.canonical_key();
    SearchError::InvariantViolation {
        detail: format!(
            "{err} (t={} state {} {} action {})",
            state.t,
            key.render(graph),
            key_fingerprint(&key).short(),
            joint.render(graph)
        ),
    }
}
