//! Canonical-state dedup map with pessimistic-bound dominance.
//!
//! One entry per canonical key, remembering the tick and pessimistic bound of
//! the state most recently accepted for that key. Under
//! [`DominanceRuleV1::Level`] an offer is accepted when:
//!
//! 1. the key is new, or
//! 2. it is strictly earlier (`t` smaller) than the stored state, or
//! 3. its pessimistic bound is `>=` the stored one, unless tick and bound
//!    both equal the stored entry.
//!
//! The exception in rule 3 drops exact repeats: equal key, tick, and bound
//! imply equal score, so the offered state is the stored one again.
//!
//! [`DominanceRuleV1::EarlierAndBetter`] drops every offer that is no earlier
//! and no better than the stored entry (`t >= stored.t` and
//! `pessimistic <= stored.pessimistic`). A state with the same key, at least
//! as many ticks left and at least as much banked reward can replay any plan
//! of the offered one. Depth-first order needs this: agents wandering with an
//! unchanged activation set revisit a key every couple of ticks at the same
//! bound, and rule 3 would re-expand the whole subtree on each visit.
//!
//! Accepted offers overwrite the entry under both rules.

use std::collections::HashMap;

use flowline_kernel::carrier::joint_state::CanonicalKeyV1;
use flowline_kernel::proof::hash::{canonical_hash, ContentHash};
use flowline_kernel::proof::hash_domain::HashDomain;

/// Stored summary of the best state seen for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupEntryV1 {
    pub t: u32,
    pub pessimistic: i64,
}

/// Outcome of [`DedupMapV1::offer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecisionV1 {
    /// First state for this key.
    Inserted,
    /// Accepted over an existing entry.
    Replaced { previous: DedupEntryV1 },
    /// Rejected; the stored entry dominates.
    Dominated { stored: DedupEntryV1 },
}

impl DedupDecisionV1 {
    /// Whether the offered state should be explored.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        !matches!(self, Self::Dominated { .. })
    }
}

/// When an offer for a known key is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DominanceRuleV1 {
    /// Drop worse bounds and exact repeats; breadth-first order.
    #[default]
    Level,
    /// Drop anything no earlier and no better; depth-first order.
    EarlierAndBetter,
}

impl DominanceRuleV1 {
    const fn accepts(self, stored: DedupEntryV1, t: u32, pessimistic: i64) -> bool {
        match self {
            Self::Level => {
                let repeat = t == stored.t && pessimistic == stored.pessimistic;
                t < stored.t || (pessimistic >= stored.pessimistic && !repeat)
            }
            Self::EarlierAndBetter => t < stored.t || pessimistic > stored.pessimistic,
        }
    }
}

/// Dedup map keyed by canonical state key.
#[derive(Debug, Default)]
pub struct DedupMapV1 {
    rule: DominanceRuleV1,
    entries: HashMap<CanonicalKeyV1, DedupEntryV1>,
}

impl DedupMapV1 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rule(rule: DominanceRuleV1) -> Self {
        Self {
            rule,
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn rule(&self) -> DominanceRuleV1 {
        self.rule
    }

    /// Offer a state summary for `key`.
    pub fn offer(&mut self, key: CanonicalKeyV1, t: u32, pessimistic: i64) -> DedupDecisionV1 {
        let offered = DedupEntryV1 { t, pessimistic };
        let rule = self.rule;
        match self.entries.get_mut(&key) {
            None => {
                self.entries.insert(key, offered);
                DedupDecisionV1::Inserted
            }
            Some(stored) => {
                if rule.accepts(*stored, t, pessimistic) {
                    let previous = *stored;
                    *stored = offered;
                    DedupDecisionV1::Replaced { previous }
                } else {
                    DedupDecisionV1::Dominated { stored: *stored }
                }
            }
        }
    }

    /// Stored entry for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &CanonicalKeyV1) -> Option<&DedupEntryV1> {
        self.entries.get(key)
    }

    /// Number of distinct keys seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `sha256:` fingerprint of a canonical key, for reports and diagnostics.
#[must_use]
pub fn key_fingerprint(key: &CanonicalKeyV1) -> ContentHash {
    canonical_hash(HashDomain::CanonicalKey, &key.identity_bytes())
}
