//! Flowline Harness: input parsing, the runner, and the `flowline` CLI.
//!
//! The harness does not search; it loads graphs, drives
//! `flowline_search`, and packages the outcome as a canonical report.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fixtures;
pub mod observer;
pub mod parse;
pub mod runner;
