//! Search observer that emits structured `tracing` events.

use flowline_search::observer::SearchObserverV1;
use flowline_search::report::SearchOutcomeV1;

/// Logs improvements and completion at `info`, levels at `debug`.
#[derive(Debug, Default)]
pub struct TracingObserver {
    improvements: u64,
}

impl TracingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of best-leaf improvements seen.
    #[must_use]
    pub fn improvements(&self) -> u64 {
        self.improvements
    }
}

impl SearchObserverV1 for TracingObserver {
    fn on_new_best(&mut self, score: i64) {
        self.improvements += 1;
        tracing::info!(score, improvement = self.improvements, "new best leaf");
    }

    fn on_level(&mut self, t: u32, frontier_len: usize, dedup_len: usize) {
        tracing::debug!(t, frontier_len, dedup_len, "expanding level");
    }

    fn on_finish(&mut self, outcome: &SearchOutcomeV1) {
        tracing::info!(
            best_score = outcome.best_score,
            exact = outcome.exact,
            termination = outcome.termination.as_str(),
            expansions = outcome.stats.expansions,
            pruned = outcome.stats.pruned_by_bound,
            dominated = outcome.stats.dominated_duplicates,
            "search finished"
        );
    }
}
