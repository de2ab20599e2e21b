//! Shared support for the lock tests: a brute-force oracle and graph
//! builders.

#![forbid(unsafe_code)]

pub mod graphs;
