//! Flowline Kernel: the deterministic core of the release planner.
//!
//! # API Surface
//!
//! - [`carrier::graph::GraphV1`] -- the immutable node/rate/adjacency model
//! - [`carrier::joint_state::JointStateV1`] -- the value-typed multi-agent state
//! - [`operators::apply::apply`] -- apply one joint action, producing a new state
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 fingerprints
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `operators` ← `proof`
//!
//! One-way only. No cycles. `operators` depends on `carrier`.
//! `proof` depends on nothing internal; it is the hashing/serialization spine.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod operators;
pub mod proof;
