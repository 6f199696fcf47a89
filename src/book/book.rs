//! Demand book: ranked demand for a single supply.
//!
//! ## Architecture
//!
//! - **Slab**: owns every [`DemandNode`]
//! - **BTreeMap**: rank levels keyed by `Reverse(rank)`, so the first level
//!   is the highest rank
//! - **HashSet**: demand ids already inserted, rejecting duplicates
//!
//! ## Ordering
//!
//! [`DemandBook::iter`] yields demands by rank descending. Demands with equal
//! rank come out in the order they were inserted; ties are not otherwise
//! broken.
//!
//! ## Example
//!
//! ```
//! use donation_splitter::book::DemandBook;
//! use donation_splitter::types::{Demand, Location, Record};
//!
//! let mut book = DemandBook::with_capacity(3);
//! let demand = |id| Demand::new(Record::new(id, 1, 10, Location::default(), 0));
//!
//! book.insert(demand(1), 5).unwrap();
//! book.insert(demand(2), 9).unwrap();
//! book.insert(demand(3), 5).unwrap();
//!
//! let order: Vec<u64> = book.iter().map(|node| node.demand_id()).collect();
//! assert_eq!(order, vec![2, 1, 3]);
//! ```

use std::cmp::Reverse;
use std::collections::{btree_map, BTreeMap, HashSet};

use slab::Slab;

use crate::book::{DemandNode, RankLevel};
use crate::error::{AllocationError, Result};
use crate::types::Demand;

/// Ranked demand for one supply.
#[derive(Debug, Default)]
pub struct DemandBook {
    /// Node storage
    nodes: Slab<DemandNode>,

    /// Rank levels, highest rank first
    levels: BTreeMap<Reverse<i128>, RankLevel>,

    /// Ids of every inserted demand
    ids: HashSet<u64>,
}

impl DemandBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with room for `capacity` demands
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            levels: BTreeMap::new(),
            ids: HashSet::with_capacity(capacity),
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Number of demands in the book
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Add a ranked demand
    ///
    /// # Returns
    ///
    /// The slab key of the new node
    ///
    /// # Errors
    ///
    /// [`AllocationError::DuplicateDemand`] if a demand with the same id is
    /// already in the book. The book is left unchanged.
    pub fn insert(&mut self, demand: Demand, rank: i128) -> Result<usize> {
        if !self.ids.insert(demand.id()) {
            return Err(AllocationError::DuplicateDemand(demand.id()));
        }

        let key = self.nodes.insert(DemandNode::new(demand, rank));

        self.levels
            .entry(Reverse(rank))
            .or_insert_with(|| RankLevel::new(rank))
            .push_back(key, &mut self.nodes);

        Ok(key)
    }

    // ========================================================================
    // Ranked traversal
    // ========================================================================

    /// Demands by rank descending, equal ranks in insertion order
    pub fn iter(&self) -> RankedIter<'_> {
        RankedIter {
            nodes: &self.nodes,
            levels: self.levels.values(),
            cursor: None,
        }
    }
}

impl<'a> IntoIterator for &'a DemandBook {
    type Item = &'a DemandNode;
    type IntoIter = RankedIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`DemandBook`] in rank order.
pub struct RankedIter<'a> {
    nodes: &'a Slab<DemandNode>,
    levels: btree_map::Values<'a, Reverse<i128>, RankLevel>,
    cursor: Option<usize>,
}

impl<'a> Iterator for RankedIter<'a> {
    type Item = &'a DemandNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(key) = self.cursor {
                let node = self.nodes.get(key)?;
                self.cursor = node.next;
                return Some(node);
            }
            self.cursor = self.levels.next()?.head;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
