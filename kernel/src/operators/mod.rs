//! Operators module: agent actions and the `apply()` transition.
//!
//! Depends on `carrier`. Does not import from `proof`.

pub mod action;
pub mod apply;
