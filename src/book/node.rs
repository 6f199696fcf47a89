//! Demand node for slab-based storage.
//!
//! `DemandNode` pairs a [`Demand`] with its computed rank and a forward
//! pointer to the next node at the same rank. Pointers are slab keys, not
//! references, so the book owns every node in one contiguous `Slab`.

use crate::types::Demand;

/// A ranked demand stored in the book's slab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandNode {
    /// The demand as received; never modified
    pub demand: Demand,

    /// Rank against the book's supply
    pub rank: i128,

    /// Next demand with the same rank, in insertion order
    pub next: Option<usize>,
}

impl DemandNode {
    /// Create an unlinked node
    #[inline]
    pub fn new(demand: Demand, rank: i128) -> Self {
        Self {
            demand,
            rank,
            next: None,
        }
    }

    #[inline]
    pub fn demand_id(&self) -> u64 {
        self.demand.id()
    }

    /// Quantity requested by the demand
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.demand.quantity()
    }
}
