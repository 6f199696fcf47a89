//! Rank level: every demand that shares one rank.
//!
//! ## Queue Structure
//!
//! ```text
//! head (first inserted) -> demand2 -> demand3 -> tail (last inserted)
//! ```
//!
//! Demands are appended at the tail and read from the head, so equal ranks
//! keep their input order. Walking the levels from highest to lowest rank is
//! therefore a stable descending sort.

use slab::Slab;

use crate::book::DemandNode;

/// FIFO queue of slab keys sharing a single rank.
#[derive(Debug, Clone)]
pub struct RankLevel {
    /// Rank shared by every demand at this level
    pub rank: i128,

    /// First demand inserted at this rank (slab key)
    pub head: Option<usize>,

    /// Last demand inserted at this rank (slab key)
    pub tail: Option<usize>,

    /// Number of demands at this rank
    pub demand_count: usize,
}

impl RankLevel {
    /// Create an empty level
    pub fn new(rank: i128) -> Self {
        Self {
            rank,
            head: None,
            tail: None,
            demand_count: 0,
        }
    }

    /// Append a node to the tail of the queue
    ///
    /// # Panics
    ///
    /// Panics if `key` or the current tail is not in `slab`
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<DemandNode>) {
        slab.get_mut(key).expect("Invalid slab key").next = None;

        match self.tail {
            Some(tail_key) => {
                slab.get_mut(tail_key).expect("Invalid tail key").next = Some(key);
            }
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.demand_count += 1;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
