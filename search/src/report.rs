//! Search outcome types and the canonical JSON report.
//!
//! The report contains no wall-clock values, so identical inputs produce
//! identical bytes (the time limit itself is echoed from the policy).

use flowline_kernel::carrier::graph::GraphV1;
use flowline_kernel::proof::canon::{canonical_json_bytes, CanonError};
use flowline_kernel::proof::hash::{canonical_hash, ContentHash};
use flowline_kernel::proof::hash_domain::HashDomain;

use crate::dedup::key_fingerprint;
use crate::incumbent::BestLeafV1;
use crate::policy::SearchPolicyV1;

/// Report schema identifier.
pub const REPORT_SCHEMA_VERSION: &str = "flowline.search_report.v1";

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// Every live path reached the horizon or was pruned.
    Completed,
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded,
    /// `max_frontier_size` was exceeded.
    FrontierBudgetExceeded,
    /// `time_limit` elapsed.
    TimeLimitExceeded,
}

impl TerminationReasonV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::FrontierBudgetExceeded => "frontier_budget_exceeded",
            Self::TimeLimitExceeded => "time_limit_exceeded",
        }
    }
}

/// Search counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatsV1 {
    /// States whose joint actions were enumerated.
    pub expansions: u64,
    /// Successor states produced by `apply`.
    pub children_generated: u64,
    /// Successors at the horizon.
    pub leaves_reached: u64,
    /// States dropped because their optimistic bound was below the floor.
    pub pruned_by_bound: u64,
    /// Successors rejected by the dedup map.
    pub dominated_duplicates: u64,
    /// Successors that overwrote an existing dedup entry.
    pub replaced_duplicates: u64,
    /// Largest breadth-first level or depth-first stack.
    pub frontier_high_water: u64,
    /// Distinct canonical keys recorded.
    pub dedup_entries: u64,
}

/// Per-level breadth-first diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummaryV1 {
    pub t: u32,
    pub frontier_len: u64,
    pub dedup_len: u64,
}

/// Everything a search run returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcomeV1 {
    /// Best achievable score known when the run stopped; the optimum if
    /// `exact`.
    pub best_score: i64,
    /// `true` only when the run completed without hitting a limit.
    pub exact: bool,
    /// May be `None` even when `exact`: dedup can collapse every path that
    /// realizes `best_score`.
    pub best_leaf: Option<BestLeafV1>,
    pub termination: TerminationReasonV1,
    pub stats: SearchStatsV1,
    pub levels: Vec<LevelSummaryV1>,
}

/// Run parameters echoed into a report.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub graph: &'a GraphV1,
    pub start_label: &'a str,
    pub agent_count: usize,
    pub horizon: u32,
    pub policy: &'a SearchPolicyV1,
}

/// Canonical JSON report of one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReportV1 {
    value: serde_json::Value,
}

impl SearchReportV1 {
    /// Build the report for `outcome`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the graph snapshot cannot be canonicalized.
    pub fn from_outcome(
        inputs: &ReportInputs<'_>,
        outcome: &SearchOutcomeV1,
    ) -> Result<Self, CanonError> {
        let graph_digest = graph_digest(inputs.graph)?;
        let policy_digest = inputs.policy.digest()?;
        let best_leaf = outcome.best_leaf.as_ref().map(|leaf| {
            serde_json::json!({
                "fingerprint": key_fingerprint(&leaf.key).as_str(),
                "score": leaf.score,
                "state": leaf.key.render(inputs.graph),
            })
        });
        let levels: Vec<serde_json::Value> = outcome
            .levels
            .iter()
            .map(|l| {
                serde_json::json!({
                    "dedup_len": l.dedup_len,
                    "frontier_len": l.frontier_len,
                    "t": l.t,
                })
            })
            .collect();

        let value = serde_json::json!({
            "agent_count": inputs.agent_count,
            "graph_digest": graph_digest.as_str(),
            "horizon": inputs.horizon,
            "levels": levels,
            "policy": inputs.policy.to_json_value(),
            "policy_digest": policy_digest.as_str(),
            "result": {
                "best_leaf": best_leaf,
                "best_score": outcome.best_score,
                "exact": outcome.exact,
                "termination": outcome.termination.as_str(),
            },
            "schema_version": REPORT_SCHEMA_VERSION,
            "start": inputs.start_label,
            "stats": stats_to_json(&outcome.stats),
        });
        Ok(Self { value })
    }

    /// Canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a non-integer number slipped into the report.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.value)
    }

    /// Domain-separated digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchReport, &bytes))
    }

    /// The report as a JSON value.
    #[must_use]
    pub fn as_json(&self) -> &serde_json::Value {
        &self.value
    }
}

/// Digest of the graph's canonical JSON snapshot.
///
/// # Errors
///
/// Returns [`CanonError`] if canonicalization fails.
pub fn graph_digest(graph: &GraphV1) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(&graph.to_canonical_json_value())?;
    Ok(canonical_hash(HashDomain::Graph, &bytes))
}

fn stats_to_json(s: &SearchStatsV1) -> serde_json::Value {
    serde_json::json!({
        "children_generated": s.children_generated,
        "dedup_entries": s.dedup_entries,
        "dominated_duplicates": s.dominated_duplicates,
        "expansions": s.expansions,
        "frontier_high_water": s.frontier_high_water,
        "leaves_reached": s.leaves_reached,
        "pruned_by_bound": s.pruned_by_bound,
        "replaced_duplicates": s.replaced_duplicates,
    })
}
