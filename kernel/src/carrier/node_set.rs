//! `NodeSet`: a compact bitset over [`NodeId`].
//!
//! Used for the activation set of a joint state. Equality, hashing, and
//! ordering are defined over the bit pattern, so two sets holding the same
//! nodes are interchangeable as map keys regardless of insertion history.
//!
//! Trailing zero words are never stored; that keeps `Eq` and `Hash`
//! consistent between a set that grew and shrank its capacity need.

use crate::carrier::graph::{GraphV1, NodeId};

const WORD_BITS: usize = 64;

/// Bitset of activated nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeSet {
    words: Vec<u64>,
}

impl NodeSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Insert `id`. Returns `false` if it was already present.
    pub fn insert(&mut self, id: NodeId) -> bool {
        let (word, bit) = Self::locate(id);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << bit;
        let was_set = self.words[word] & mask != 0;
        self.words[word] |= mask;
        !was_set
    }

    /// Whether `id` is present.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        let (word, bit) = Self::locate(id);
        self.words
            .get(word)
            .is_some_and(|w| w & (1u64 << bit) != 0)
    }

    /// Number of nodes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            (0..WORD_BITS).filter_map(move |bit| {
                if word & (1u64 << bit) == 0 {
                    return None;
                }
                #[allow(clippy::cast_possible_truncation)]
                Some(NodeId::new((wi * WORD_BITS + bit) as u16))
            })
        })
    }

    /// Sum of member rates.
    #[must_use]
    pub fn rate_sum(&self, graph: &GraphV1) -> i64 {
        self.iter().map(|id| i64::from(graph.rate(id))).sum()
    }

    /// Little-endian word bytes, for identity serialization.
    #[must_use]
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    fn locate(id: NodeId) -> (usize, usize) {
        (id.index() / WORD_BITS, id.index() % WORD_BITS)
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
