//! Allocation engine module.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical supply, demand and coefficients always give
//!    an identical receipt
//! 2. **Fixed-Point Math**: distances use `Decimal`, ranks are `i128`
//! 3. **No Mutation**: inputs are borrowed; results are new values
//! 4. **Rank Priority**: highest rank first, input order among equal ranks
//!
//! ## Allocation Rules
//!
//! - Demand for another product is ignored
//! - Each demand is served in full while supply strictly exceeds it
//! - The first demand that does not fit takes the rest and ends the walk
//! - Demand after that point is left out of the receipt
//!
//! ## Example
//!
//! ```
//! use donation_splitter::config::RankConfig;
//! use donation_splitter::engine::split_donation;
//! use donation_splitter::types::{Demand, Location, Record, Supply};
//!
//! let supply = Supply::new(Record::new(1, 3, 10, Location::from_ints(0, 0), 0));
//! let order = Demand::new(Record::new(2, 3, 10, Location::from_ints(1, 1), 0));
//!
//! let receipt = split_donation(&supply, &[order], RankConfig::default()).unwrap();
//!
//! assert_eq!(receipt.supply.remaining_quantity, 0);
//! assert_eq!(receipt.fulfillments[0].remaining_quantity, 0);
//! ```

pub mod allocator;

pub use allocator::{split_donation, walk, AllocationEngine, RankedBatch, Walk};
