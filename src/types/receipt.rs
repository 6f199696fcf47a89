//! Allocation receipt: the immutable result of one batch.
//!
//! The receipt is built fresh by the allocator; the input supply and demand
//! records are never written back to.
//!
//! ## SSZ Serialization
//!
//! [`SupplyBalance`] and [`Fulfillment`] derive `SimpleSerialize` so that a
//! receipt has one canonical byte encoding. The SHA-256 of that encoding is
//! the receipt digest, which lets two runs be compared without diffing every
//! entry.

use ssz_rs::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::{self, AllocationError};

// ============================================================================
// Entries
// ============================================================================

/// Remaining quantity of the supply after allocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct SupplyBalance {
    pub supply_id: u64,
    pub remaining_quantity: u64,
}

impl SupplyBalance {
    pub fn new(supply_id: u64, remaining_quantity: u64) -> Self {
        Self {
            supply_id,
            remaining_quantity,
        }
    }
}

/// Outcome for one processed demand.
///
/// ## SSZ Layout
///
/// Fixed-size container of three `u64` fields, 24 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Fulfillment {
    /// Id of the demand record
    pub demand_id: u64,

    /// Quantity the demand asked for
    pub requested_quantity: u64,

    /// Quantity still unmet after allocation (0 when fully served)
    pub remaining_quantity: u64,
}

impl Fulfillment {
    pub fn new(demand_id: u64, requested_quantity: u64, remaining_quantity: u64) -> Self {
        Self {
            demand_id,
            requested_quantity,
            remaining_quantity,
        }
    }

    /// Units of supply consumed by this demand
    #[inline]
    pub fn fulfilled_quantity(&self) -> u64 {
        self.requested_quantity.saturating_sub(self.remaining_quantity)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_quantity == 0
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// Non-fatal diagnostics collected while ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The order was placed after the donation; its time term is negative.
    TimestampInversion {
        demand_id: u64,
        supply_timestamp: i64,
        demand_timestamp: i64,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::TimestampInversion {
                demand_id,
                supply_timestamp,
                demand_timestamp,
            } => write!(
                f,
                "order {} timestamp {} is later than donation timestamp {}; behavior may be unintuitive",
                demand_id, demand_timestamp, supply_timestamp
            ),
        }
    }
}

// ============================================================================
// Receipt
// ============================================================================

/// Result of splitting one supply across its ranked demand.
///
/// ## Example
///
/// ```
/// use donation_splitter::types::{AllocationReceipt, Fulfillment, SupplyBalance};
///
/// let receipt = AllocationReceipt::new(
///     SupplyBalance::new(1, 0),
///     15,
///     vec![Fulfillment::new(2, 5, 0), Fulfillment::new(3, 20, 10)],
/// );
///
/// assert!(!receipt.is_empty());
/// assert_eq!(receipt.fulfilled_quantity(), 15);
/// assert_eq!(receipt.partial().map(|f| f.demand_id), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationReceipt {
    /// Supply id and what is left of it
    pub supply: SupplyBalance,

    /// Supply quantity before allocation
    pub original_supply_quantity: u64,

    /// Processed demand, in rank order
    pub fulfillments: Vec<Fulfillment>,

    /// Diagnostics raised while ranking
    pub warnings: Vec<Warning>,

    /// Demand records skipped because they asked for another product
    pub filtered_count: usize,
}

impl AllocationReceipt {
    /// Create a receipt without warnings or filtered records
    pub fn new(
        supply: SupplyBalance,
        original_supply_quantity: u64,
        fulfillments: Vec<Fulfillment>,
    ) -> Self {
        Self {
            supply,
            original_supply_quantity,
            fulfillments,
            warnings: Vec::new(),
            filtered_count: 0,
        }
    }

    /// Attach ranking diagnostics
    pub fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Record how many demands were dropped by product filtering
    pub fn with_filtered_count(mut self, filtered_count: usize) -> Self {
        self.filtered_count = filtered_count;
        self
    }

    /// True when no demand was processed
    pub fn is_empty(&self) -> bool {
        self.fulfillments.is_empty()
    }

    /// Total supply handed out across all processed demand
    pub fn fulfilled_quantity(&self) -> u64 {
        self.fulfillments.iter().map(Fulfillment::fulfilled_quantity).sum()
    }

    /// The demand that stopped the walk with unmet quantity left, if any
    pub fn partial(&self) -> Option<&Fulfillment> {
        self.fulfillments.last().filter(|f| !f.is_complete())
    }

    /// Canonical encoding: SSZ supply balance followed by each fulfillment
    pub fn encode(&self) -> error::Result<Vec<u8>> {
        let mut bytes = ssz_rs::serialize(&self.supply)
            .map_err(|e| AllocationError::Encoding(format!("{:?}", e)))?;
        for fulfillment in &self.fulfillments {
            let encoded = ssz_rs::serialize(fulfillment)
                .map_err(|e| AllocationError::Encoding(format!("{:?}", e)))?;
            bytes.extend_from_slice(&encoded);
        }
        Ok(bytes)
    }

    /// SHA-256 of [`encode`](Self::encode)
    pub fn digest(&self) -> error::Result<[u8; 32]> {
        Ok(Self::compute_hash(&self.encode()?))
    }

    /// Digest as a lowercase hex string
    pub fn digest_hex(&self) -> error::Result<String> {
        Ok(hex::encode(self.digest()?))
    }

    /// Compute SHA-256 of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
