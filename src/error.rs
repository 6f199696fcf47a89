//! Error type for the allocation pipeline.
//!
//! Every fatal condition aborts the whole batch: callers either get a
//! complete [`AllocationReceipt`](crate::types::AllocationReceipt) or one of
//! these errors, never a partial result.

use thiserror::Error;

/// Which record a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// The single donation of the batch
    Supply,
    /// One of the orders
    Demand,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Supply => f.write_str("supply"),
            RecordKind::Demand => f.write_str("demand"),
        }
    }
}

/// Errors produced while loading, ranking or allocating a batch.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// A record field holds a value outside its allowed range
    #[error("malformed {kind} record {id}: field `{field}` has invalid value {value}")]
    MalformedRecord {
        kind: RecordKind,
        id: i64,
        field: &'static str,
        value: i64,
    },

    /// Two demand records in one batch share an id
    #[error("duplicate demand id {0} in batch")]
    DuplicateDemand(u64),

    /// Distance between two locations does not fit the fixed-point range
    #[error("distance between supply and demand {demand_id} overflows")]
    ArithmeticOverflow { demand_id: u64 },

    /// A text line could not be parsed into a record
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The supply source contained no record line
    #[error("supply source is empty")]
    MissingSupply,

    /// Underlying reader or writer failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Result entries could not be SSZ-encoded
    #[error("result encoding failed: {0}")]
    Encoding(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AllocationError>;
