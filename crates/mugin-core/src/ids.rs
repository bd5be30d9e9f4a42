//! Pairing identifiers for node pairs.
//!
//! A link's bucket is keyed by the unordered pair of its endpoints; inside a bucket the ordered
//! pair tells `A -> B` apart from `B -> A`. Both keys are plain integers so they can be compared
//! without building composite keys.

use crate::model::NodeId;

/// Multiplier for the high half of a pair id. Node ids are `u32`, so every id is strictly
/// smaller than the key and `s * PAIR_KEY + t` is collision-free and fits in a `u64`.
pub const PAIR_KEY: u64 = 1 << 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairIds {
    pub undirected: u64,
    pub directed: u64,
}

pub fn node_pair_ids(source: u32, target: u32) -> PairIds {
    let (s, t) = (u64::from(source), u64::from(target));
    PairIds {
        undirected: s.min(t) * PAIR_KEY + s.max(t),
        directed: s * PAIR_KEY + t,
    }
}

impl PairIds {
    pub fn of(source: NodeId, target: NodeId) -> Self {
        node_pair_ids(source.get(), target.get())
    }

    /// True when both ids describe the same unordered pair.
    pub fn same_bucket(&self, other: &PairIds) -> bool {
        self.undirected == other.undirected
    }
}
