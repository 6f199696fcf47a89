//! Supply and demand records.
//!
//! Both sides of a batch share one shape, [`Record`]. The two roles are
//! distinct wrapper types around it so that a demand can never be passed
//! where the supply is expected:
//!
//! - [`Supply`]: the single donation being split
//! - [`Demand`]: one order for the same product
//!
//! ## Example
//!
//! ```
//! use donation_splitter::types::{Demand, Location, Record, Supply};
//!
//! let supply = Supply::new(Record::new(1, 42, 15, Location::from_ints(0, 0), 100));
//! let demand = Demand::new(Record::new(2, 42, 5, Location::from_ints(3, 4), 90));
//!
//! assert!(demand.matches(&supply));
//! assert_eq!(supply.quantity(), 15);
//! ```

use crate::error::{AllocationError, RecordKind, Result};
use crate::types::Location;

// ============================================================================
// Record
// ============================================================================

/// Fields common to supply and demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Record {
    /// Identifier, unique within its source list
    pub id: u64,

    /// Product; a demand only matches a supply with the same product
    pub product_id: u64,

    /// Units available (supply) or requested (demand)
    pub quantity: u64,

    /// Where the record was placed
    pub location: Location,

    /// When the record was placed
    pub timestamp: i64,
}

impl Record {
    /// Create a record from already-validated values
    pub fn new(id: u64, product_id: u64, quantity: u64, location: Location, timestamp: i64) -> Self {
        Self {
            id,
            product_id,
            quantity,
            location,
            timestamp,
        }
    }

    /// Create a record from signed input, rejecting negative identifiers
    /// and quantities.
    ///
    /// # Errors
    ///
    /// [`AllocationError::MalformedRecord`] naming the first offending field.
    ///
    /// ```
    /// use donation_splitter::error::{AllocationError, RecordKind};
    /// use donation_splitter::types::{Location, Record};
    ///
    /// let err = Record::try_new(RecordKind::Demand, 3, 1, -5, Location::default(), 0)
    ///     .unwrap_err();
    /// assert!(matches!(err, AllocationError::MalformedRecord { field: "quantity", .. }));
    /// ```
    pub fn try_new(
        kind: RecordKind,
        id: i64,
        product_id: i64,
        quantity: i64,
        location: Location,
        timestamp: i64,
    ) -> Result<Self> {
        let check = |field: &'static str, value: i64| -> Result<u64> {
            u64::try_from(value).map_err(|_| AllocationError::MalformedRecord {
                kind,
                id,
                field,
                value,
            })
        };

        Ok(Self {
            id: check("id", id)?,
            product_id: check("product_id", product_id)?,
            quantity: check("quantity", quantity)?,
            location,
            timestamp,
        })
    }
}

// ============================================================================
// Supply
// ============================================================================

/// The donation distributed by one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Supply {
    pub record: Record,
}

impl Supply {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.record.id
    }

    #[inline]
    pub fn product_id(&self) -> u64 {
        self.record.product_id
    }

    /// Units available before allocation
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.record.quantity
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.record.location
    }

    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.record.timestamp
    }
}

// ============================================================================
// Demand
// ============================================================================

/// One order competing for the donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Demand {
    pub record: Record,
}

impl Demand {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.record.id
    }

    #[inline]
    pub fn product_id(&self) -> u64 {
        self.record.product_id
    }

    /// Units requested
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.record.quantity
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.record.location
    }

    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.record.timestamp
    }

    /// Whether this order asks for the supply's product
    #[inline]
    pub fn matches(&self, supply: &Supply) -> bool {
        self.record.product_id == supply.record.product_id
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
