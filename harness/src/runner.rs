//! Runner: parse → search → report.
//!
//! # Pipeline
//!
//! ```text
//! parse_graph() → policy.validate() → search() (TracingObserver)
//!   → SearchReportV1 → canonical bytes → report digest + graph digest
//! ```

use std::path::Path;

use flowline_kernel::carrier::graph::GraphV1;
use flowline_kernel::proof::canon::CanonError;
use flowline_kernel::proof::hash::ContentHash;
use flowline_search::error::SearchError;
use flowline_search::policy::SearchPolicyV1;
use flowline_search::report::{graph_digest, ReportInputs, SearchOutcomeV1, SearchReportV1};
use flowline_search::search::search;

use crate::observer::TracingObserver;
use crate::parse::{load_graph_file, parse_graph, LoadError};

/// Failure of a runner entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Input could not be loaded or a reference did not resolve.
    Load(LoadError),
    /// The search rejected the policy or hit an engine bug.
    Search(SearchError),
    /// The report could not be canonicalized.
    Canon(CanonError),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(e) => write!(f, "load failed: {e}"),
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Canon(e) => write!(f, "report failed: {e}"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
        }
    }
}

impl From<LoadError> for SolveError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<SearchError> for SolveError {
    fn from(e: SearchError) -> Self {
        match e {
            // An unresolved start id is a reference error in the input.
            SearchError::UnknownStartNode { label } => Self::Load(LoadError::Reference {
                id: label,
                line_number: None,
            }),
            other => Self::Search(other),
        }
    }
}

impl From<CanonError> for SolveError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// What to search for and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub start: String,
    pub agent_count: usize,
    pub horizon: u32,
    pub policy: SearchPolicyV1,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start: "AA".into(),
            agent_count: 1,
            horizon: 30,
            policy: SearchPolicyV1::default(),
        }
    }
}

/// Output of a full run.
#[derive(Debug, Clone)]
pub struct RunOutputV1 {
    pub outcome: SearchOutcomeV1,
    /// Canonical JSON report.
    pub report_bytes: Vec<u8>,
    pub report_digest: ContentHash,
    pub graph_digest: ContentHash,
}

/// Best achievable reward with the default policy.
///
/// # Errors
///
/// Returns [`SolveError::Load`] with a reference error if `start` is not in
/// the graph, or [`SolveError::Search`] on an engine bug.
pub fn solve(
    graph: &GraphV1,
    start: &str,
    agent_count: usize,
    horizon: u32,
) -> Result<i64, SolveError> {
    Ok(flowline_search::search::solve(graph, start, agent_count, horizon)?)
}

/// Search an already-loaded graph and build the report.
///
/// # Errors
///
/// See [`SolveError`].
pub fn run_graph(graph: &GraphV1, config: &RunConfig) -> Result<RunOutputV1, SolveError> {
    tracing::info!(
        nodes = graph.len(),
        start = config.start.as_str(),
        agents = config.agent_count,
        horizon = config.horizon,
        traversal = config.policy.traversal.as_str(),
        "starting search"
    );

    let mut observer = TracingObserver::new();
    let outcome = search(
        graph,
        &config.start,
        config.agent_count,
        config.horizon,
        &config.policy,
        &mut observer,
    )?;

    let inputs = ReportInputs {
        graph,
        start_label: &config.start,
        agent_count: config.agent_count,
        horizon: config.horizon,
        policy: &config.policy,
    };
    let report = SearchReportV1::from_outcome(&inputs, &outcome)?;
    let report_bytes = report.to_canonical_json_bytes()?;
    let report_digest = report.digest()?;
    let graph_digest = graph_digest(graph)?;

    Ok(RunOutputV1 {
        outcome,
        report_bytes,
        report_digest,
        graph_digest,
    })
}

/// Parse `input_text` and run.
///
/// # Errors
///
/// See [`SolveError`].
pub fn run(input_text: &str, config: &RunConfig) -> Result<RunOutputV1, SolveError> {
    let graph = parse_graph(input_text)?;
    run_graph(&graph, config)
}

/// Load `path` and run.
///
/// # Errors
///
/// See [`SolveError`].
pub fn run_file(path: &Path, config: &RunConfig) -> Result<RunOutputV1, SolveError> {
    let graph = load_graph_file(path)?;
    run_graph(&graph, config)
}
