//! Frontier containers for the two traversal orders.
//!
//! - [`LevelFrontier`]: one breadth-first level. Keyed inserts replace the
//!   earlier state for the same canonical key in place, so a level never
//!   holds two live entries for one key and iteration order is first-arrival
//!   order.
//! - [`DepthStack`]: explicit depth-first stack of frames, each holding a
//!   state and the joint actions not yet tried from it.

use std::collections::BTreeMap;

use flowline_kernel::carrier::joint_state::{CanonicalKeyV1, JointStateV1};
use flowline_kernel::operators::action::JointActionV1;

/// States of one breadth-first level.
#[derive(Debug, Default)]
pub struct LevelFrontier {
    states: Vec<JointStateV1>,
    slots: BTreeMap<CanonicalKeyV1, usize>,
}

impl LevelFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under `key`, replacing any earlier state with the same key.
    ///
    /// Returns the replaced state.
    pub fn insert_keyed(
        &mut self,
        key: CanonicalKeyV1,
        state: JointStateV1,
    ) -> Option<JointStateV1> {
        if let Some(&slot) = self.slots.get(&key) {
            return Some(std::mem::replace(&mut self.states[slot], state));
        }
        self.slots.insert(key, self.states.len());
        self.states.push(state);
        None
    }

    /// Append without dedup (used when dedup is disabled).
    pub fn push(&mut self, state: JointStateV1) {
        self.states.push(state);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The level's states in first-arrival order.
    #[must_use]
    pub fn into_states(self) -> Vec<JointStateV1> {
        self.states
    }
}

/// A depth-first frame: a state and its untried joint actions.
#[derive(Debug)]
pub struct DepthFrame {
    state: JointStateV1,
    pending: std::vec::IntoIter<JointActionV1>,
}

impl DepthFrame {
    #[must_use]
    pub fn state(&self) -> &JointStateV1 {
        &self.state
    }

    /// Next untried joint action, in generator order.
    pub fn next_action(&mut self) -> Option<JointActionV1> {
        self.pending.next()
    }
}

/// Explicit depth-first stack.
#[derive(Debug, Default)]
pub struct DepthStack {
    frames: Vec<DepthFrame>,
}

impl DepthStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: JointStateV1, actions: Vec<JointActionV1>) {
        self.frames.push(DepthFrame {
            state,
            pending: actions.into_iter(),
        });
    }

    pub fn top_mut(&mut self) -> Option<&mut DepthFrame> {
        self.frames.last_mut()
    }

    pub fn pop(&mut self) -> Option<DepthFrame> {
        self.frames.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
