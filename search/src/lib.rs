//! Flowline Search: bounded-horizon multi-agent search with bound pruning
//! and canonical-state dedup.
//!
//! Depends only on `flowline_kernel`.
//!
//! # Crate dependency graph
//!
//! ```text
//! flowline_kernel  ←  flowline_search  ←  flowline_harness
//! (graph, state,      (generator, bounds,   (parsing, runner,
//!  apply, hashing)     dedup, driver)        CLI)
//! ```
//!
//! # Key entry points
//!
//! - [`search::solve`] -- best achievable reward with the default policy
//! - [`search::search`] -- full run with a [`policy::SearchPolicyV1`] and a
//!   [`observer::SearchObserverV1`]
//! - [`report::SearchReportV1`] -- canonical JSON report of an outcome

#![forbid(unsafe_code)]

pub mod bound;
pub mod dedup;
pub mod error;
pub mod frontier;
pub mod generator;
pub mod incumbent;
pub mod observer;
pub mod policy;
pub mod report;
pub mod search;

pub use search::{search, search_from, solve};
