//! Search progress callbacks.

use crate::report::SearchOutcomeV1;

/// Receives progress events from a search run.
///
/// All methods default to no-ops. Callbacks run on the driver thread, never
/// on rayon workers.
pub trait SearchObserverV1 {
    /// The best-leaf record improved.
    fn on_new_best(&mut self, _score: i64) {}

    /// A breadth-first level at tick `t` is about to be expanded.
    fn on_level(&mut self, _t: u32, _frontier_len: usize, _dedup_len: usize) {}

    /// The run ended (after any termination reason).
    fn on_finish(&mut self, _outcome: &SearchOutcomeV1) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl SearchObserverV1 for NoOpObserver {}
