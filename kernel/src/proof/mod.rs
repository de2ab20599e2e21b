//! Proof module: domain-separated hashing and canonical JSON bytes.
//!
//! Nothing inside the kernel depends on `proof`; the search and harness
//! crates use it to fingerprint states and digest reports.

pub mod canon;
pub mod hash;
pub mod hash_domain;
