//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures and engine bugs. Early stops on a
//! budget or time limit are not errors; they are reported through
//! [`crate::report::TerminationReasonV1`] with a best-so-far score.

/// Typed failure for a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start node label does not name a node in the graph.
    UnknownStartNode { label: String },
    /// The policy combines options the driver does not support.
    UnsupportedPolicyMode { detail: String },
    /// The engine produced something the kernel rejected. Always a bug.
    InvariantViolation { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStartNode { label } => write!(f, "unknown start node: {label}"),
            Self::UnsupportedPolicyMode { detail } => {
                write!(f, "unsupported policy mode: {detail}")
            }
            Self::InvariantViolation { detail } => {
                write!(f, "search invariant violated: {detail}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
