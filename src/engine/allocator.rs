//! Greedy allocation of one supply across ranked demand.
//!
//! ## Pipeline
//!
//! 1. Drop demand for other products
//! 2. Rank every remaining demand against the supply
//! 3. Order by rank descending (stable) in a [`DemandBook`]
//! 4. Walk the book, serving each demand in full while supply lasts
//! 5. Assemble an [`AllocationReceipt`]
//!
//! ## Cut Point
//!
//! The walk serves a demand in full only while the remaining supply is
//! strictly greater than its quantity. The first demand that needs at least
//! everything left takes all of it and ends the walk; demands after it are
//! not part of the receipt.

use log::{debug, info};

use crate::book::DemandBook;
use crate::config::RankConfig;
use crate::error::Result;
use crate::ranking::RankCalculator;
use crate::types::{AllocationReceipt, Demand, Fulfillment, Supply, SupplyBalance, Warning};

/// Demand ranked against one supply, ready to be walked.
#[derive(Debug, Default)]
pub struct RankedBatch {
    /// Matching demand in rank order
    pub book: DemandBook,

    /// Diagnostics raised while ranking
    pub warnings: Vec<Warning>,

    /// Demands skipped for asking a different product
    pub filtered_count: usize,
}

/// Outcome of a greedy walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Processed demand in rank order
    pub fulfillments: Vec<Fulfillment>,

    /// Supply left after the walk
    pub remaining_supply: u64,
}

/// Ranks and allocates batches with a fixed [`RankConfig`].
///
/// The engine holds no state between calls; batches are independent.
///
/// ## Example
///
/// ```
/// use donation_splitter::config::RankConfig;
/// use donation_splitter::engine::AllocationEngine;
/// use donation_splitter::types::{Demand, Location, Record, Supply};
///
/// let engine = AllocationEngine::new(RankConfig::default());
/// let supply = Supply::new(Record::new(1, 7, 15, Location::from_ints(0, 0), 100));
/// let demands = [
///     Demand::new(Record::new(2, 7, 5, Location::from_ints(0, 1), 50)),
///     Demand::new(Record::new(3, 7, 20, Location::from_ints(0, 10), 50)),
/// ];
///
/// let receipt = engine.allocate(&supply, &demands).unwrap();
///
/// assert_eq!(receipt.supply.remaining_quantity, 0);
/// let remaining: Vec<(u64, u64)> = receipt
///     .fulfillments
///     .iter()
///     .map(|f| (f.demand_id, f.remaining_quantity))
///     .collect();
/// assert_eq!(remaining, vec![(2, 0), (3, 10)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationEngine {
    calculator: RankCalculator,
}

impl AllocationEngine {
    pub fn new(config: RankConfig) -> Self {
        Self {
            calculator: RankCalculator::new(config),
        }
    }

    #[inline]
    pub fn config(&self) -> &RankConfig {
        self.calculator.config()
    }

    /// Filter and rank `demands` against `supply`
    ///
    /// # Errors
    ///
    /// Fails on duplicate demand ids or a distance overflow; no partial
    /// batch is returned.
    pub fn rank(&self, supply: &Supply, demands: &[Demand]) -> Result<RankedBatch> {
        let mut batch = RankedBatch {
            book: DemandBook::with_capacity(demands.len()),
            ..RankedBatch::default()
        };

        for demand in demands {
            if !demand.matches(supply) {
                debug!(
                    "skipping order {}: product {} != donation product {}",
                    demand.id(),
                    demand.product_id(),
                    supply.product_id()
                );
                batch.filtered_count += 1;
                continue;
            }

            let outcome = self.calculator.rank(supply, demand)?;
            batch.book.insert(*demand, outcome.rank)?;
            batch.warnings.extend(outcome.warning);
        }

        Ok(batch)
    }

    /// Run the full pipeline for one supply
    ///
    /// Inputs are not modified; the receipt is a new value.
    pub fn allocate(&self, supply: &Supply, demands: &[Demand]) -> Result<AllocationReceipt> {
        let batch = self.rank(supply, demands)?;
        let walk = walk(supply, &batch.book);

        info!(
            "donation {}: {} of {} orders processed, {} filtered, {} of {} units left",
            supply.id(),
            walk.fulfillments.len(),
            batch.book.len(),
            batch.filtered_count,
            walk.remaining_supply,
            supply.quantity()
        );

        Ok(AllocationReceipt::new(
            SupplyBalance::new(supply.id(), walk.remaining_supply),
            supply.quantity(),
            walk.fulfillments,
        )
        .with_warnings(batch.warnings)
        .with_filtered_count(batch.filtered_count))
    }
}

/// Greedy walk of `book` consuming `supply`
///
/// Each demand is served in full while the remaining supply exceeds it.
/// The first demand that does not fit receives everything left and ends the
/// walk. An empty book leaves the supply untouched.
pub fn walk(supply: &Supply, book: &DemandBook) -> Walk {
    let mut remaining_supply = supply.quantity();
    let mut fulfillments = Vec::new();

    for node in book {
        let requested = node.quantity();

        if remaining_supply > requested {
            remaining_supply -= requested;
            debug!(
                "order {} (rank {}) served in full, {} units left",
                node.demand_id(),
                node.rank,
                remaining_supply
            );
            fulfillments.push(Fulfillment::new(node.demand_id(), requested, 0));
        } else {
            let unmet = requested - remaining_supply;
            debug!(
                "order {} (rank {}) takes the last {} units, {} unmet",
                node.demand_id(),
                node.rank,
                remaining_supply,
                unmet
            );
            fulfillments.push(Fulfillment::new(node.demand_id(), requested, unmet));
            remaining_supply = 0;
            break;
        }
    }

    Walk {
        fulfillments,
        remaining_supply,
    }
}

/// Allocate `supply` across `demands` with the given coefficients
pub fn split_donation(
    supply: &Supply,
    demands: &[Demand],
    config: RankConfig,
) -> Result<AllocationReceipt> {
    AllocationEngine::new(config).allocate(supply, demands)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AllocationError;
    use crate::types::{Location, Record};

    fn supply(quantity: u64) -> Supply {
        Supply::new(Record::new(1, 7, quantity, Location::from_ints(0, 0), 1000))
    }

    /// Demand `y` units north of the supply; closer means higher rank
    fn demand(id: u64, quantity: u64, y: i64) -> Demand {
        Demand::new(Record::new(id, 7, quantity, Location::from_ints(0, y), 1000))
    }

    fn remaining(receipt: &AllocationReceipt) -> Vec<(u64, u64)> {
        receipt
            .fulfillments
            .iter()
            .map(|f| (f.demand_id, f.remaining_quantity))
            .collect()
    }

    #[test]
    fn test_partial_stops_walk() {
        let engine = AllocationEngine::default();
        let demands = [demand(3, 20, 10), demand(2, 5, 1), demand(4, 1, 100)];

        let receipt = engine.allocate(&supply(15), &demands).unwrap();

        assert_eq!(remaining(&receipt), vec![(2, 0), (3, 10)]);
        assert_eq!(receipt.supply, SupplyBalance::new(1, 0));
        assert_eq!(receipt.original_supply_quantity, 15);
    }

    #[test]
    fn test_exact_exhaustion() {
        let receipt = AllocationEngine::default()
            .allocate(&supply(10), &[demand(2, 10, 1)])
            .unwrap();

        assert_eq!(remaining(&receipt), vec![(2, 0)]);
        assert_eq!(receipt.supply.remaining_quantity, 0);
    }

    #[test]
    fn test_exact_exhaustion_excludes_rest() {
        let demands = [demand(2, 4, 1), demand(3, 6, 2), demand(4, 9, 3)];
        let receipt = AllocationEngine::default().allocate(&supply(10), &demands).unwrap();

        // Demand 3 zeroes the supply; demand 4 is never visited
        assert_eq!(remaining(&receipt), vec![(2, 0), (3, 0)]);
        assert_eq!(receipt.supply.remaining_quantity, 0);
    }

    #[test]
    fn test_empty_demand() {
        let receipt = AllocationEngine::default().allocate(&supply(10), &[]).unwrap();

        assert!(receipt.is_empty());
        assert_eq!(receipt.supply.remaining_quantity, 10);
    }

    #[test]
    fn test_supply_left_over() {
        let demands = [demand(2, 3, 1), demand(3, 4, 2)];
        let receipt = AllocationEngine::default().allocate(&supply(10), &demands).unwrap();

        assert_eq!(remaining(&receipt), vec![(2, 0), (3, 0)]);
        assert_eq!(receipt.supply.remaining_quantity, 3);
        assert!(receipt.partial().is_none());
    }

    #[test]
    fn test_zero_supply_visits_first_only() {
        let demands = [demand(2, 3, 1), demand(3, 4, 2)];
        let receipt = AllocationEngine::default().allocate(&supply(0), &demands).unwrap();

        assert_eq!(remaining(&receipt), vec![(2, 3)]);
        assert_eq!(receipt.supply.remaining_quantity, 0);
    }

    #[test]
    fn test_other_products_filtered() {
        let mut foreign = demand(9, 1, 0);
        foreign.record.product_id = 8;
        let demands = [foreign, demand(2, 5, 5)];

        let receipt = AllocationEngine::default().allocate(&supply(10), &demands).unwrap();

        assert_eq!(remaining(&receipt), vec![(2, 0)]);
        assert_eq!(receipt.filtered_count, 1);
        assert_eq!(receipt.supply.remaining_quantity, 5);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let demands = [demand(5, 2, 4), demand(3, 2, 4), demand(8, 2, 4)];
        let receipt = AllocationEngine::default().allocate(&supply(5), &demands).unwrap();

        assert_eq!(remaining(&receipt), vec![(5, 0), (3, 0), (8, 1)]);
    }

    #[test]
    fn test_colocated_demand_first() {
        let demands = [demand(2, 5, 1), demand(3, 5, 0)];
        let receipt = AllocationEngine::default().allocate(&supply(7), &demands).unwrap();

        assert_eq!(remaining(&receipt), vec![(3, 0), (2, 3)]);
    }

    #[test]
    fn test_colocated_older_order_first() {
        let at_supply = |id, timestamp| {
            Demand::new(Record::new(id, 7, 5, Location::from_ints(0, 0), timestamp))
        };
        // Newer order listed first
        let demands = [at_supply(2, 990), at_supply(3, 0)];

        let receipt = AllocationEngine::default().allocate(&supply(5), &demands).unwrap();

        assert_eq!(remaining(&receipt), vec![(3, 0)]);
        assert_eq!(receipt.supply.remaining_quantity, 0);
    }

    #[test]
    fn test_far_demand_allocates() {
        let far = Location::new(
            Location::parse_coordinate("3e14").unwrap(),
            Location::parse_coordinate("4e20").unwrap(),
        );
        let demands = [Demand::new(Record::new(2, 7, 4, far, 1000))];

        let receipt = split_donation(&supply(10), &demands, RankConfig::default()).unwrap();

        assert_eq!(remaining(&receipt), vec![(2, 0)]);
        assert_eq!(receipt.supply.remaining_quantity, 6);
    }

    #[test]
    fn test_inversion_warning_collected() {
        let mut late = demand(2, 5, 1);
        late.record.timestamp = 1500;
        let receipt = AllocationEngine::default().allocate(&supply(10), &[late]).unwrap();

        assert_eq!(
            receipt.warnings,
            vec![Warning::TimestampInversion {
                demand_id: 2,
                supply_timestamp: 1000,
                demand_timestamp: 1500,
            }]
        );
        assert_eq!(remaining(&receipt), vec![(2, 0)]);
    }

    #[test]
    fn test_duplicate_demand_fails_batch() {
        let demands = [demand(2, 5, 1), demand(2, 5, 2)];
        let err = AllocationEngine::default().allocate(&supply(10), &demands).unwrap_err();

        assert!(matches!(err, AllocationError::DuplicateDemand(2)));
    }

    #[test]
    fn test_inputs_untouched() {
        let source = supply(15);
        let demands = vec![demand(2, 5, 1), demand(3, 20, 10)];
        let before = demands.clone();

        split_donation(&source, &demands, RankConfig::default()).unwrap();

        assert_eq!(source.quantity(), 15);
        assert_eq!(demands, before);
    }

    #[test]
    fn test_walk_on_empty_book() {
        let walk = walk(&supply(4), &DemandBook::new());
        assert!(walk.fulfillments.is_empty());
        assert_eq!(walk.remaining_supply, 4);
    }
}
