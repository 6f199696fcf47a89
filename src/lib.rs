//! # Donation Splitter
//!
//! Splits one donation of a product across the orders for that product.
//!
//! ## Architecture
//!
//! - **Types**: Records (Supply, Demand), Location, AllocationReceipt
//! - **Ranking**: Inverse-distance plus waiting-time priority score
//! - **Book**: Demand ordered by rank, stable among equal ranks
//! - **Engine**: Greedy allocation down the ranked demand
//! - **IO**: Line-oriented loader and sink for the batch tool
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical inputs and coefficients give identical receipts
//! 2. **No Floating Point**: Coordinates and distances use `rust_decimal`
//! 3. **Immutable Inputs**: Allocation borrows records and returns a new receipt
//! 4. **Synchronous Execution**: One batch runs to completion on the calling thread
//!
//! ## Example
//!
//! ```
//! use donation_splitter::{split_donation, Demand, Location, RankConfig, Record, Supply};
//!
//! let supply = Supply::new(Record::new(1, 9, 15, Location::from_ints(0, 0), 100));
//! let orders = vec![
//!     Demand::new(Record::new(2, 9, 5, Location::from_ints(1, 0), 80)),
//!     Demand::new(Record::new(3, 9, 20, Location::from_ints(5, 0), 80)),
//! ];
//!
//! let receipt = split_donation(&supply, &orders, RankConfig::default()).unwrap();
//! assert_eq!(receipt.supply.remaining_quantity, 0);
//! assert_eq!(receipt.fulfillments.len(), 2);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error type shared by every stage
pub mod error;

/// Rank formula coefficients
pub mod config;

/// Core data types: records, locations, receipts
pub mod types;

/// Rank calculation
pub mod ranking;

/// Ranked demand storage
pub mod book;

/// Greedy allocation engine
pub mod engine;

/// Text loader and sink
pub mod io;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::RankConfig;
pub use error::{AllocationError, RecordKind, Result};
pub use types::{AllocationReceipt, Demand, Fulfillment, Location, Record, Supply, SupplyBalance, Warning};
pub use ranking::RankCalculator;
pub use book::DemandBook;
pub use engine::{split_donation, AllocationEngine};
