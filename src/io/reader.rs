//! Record loader for the line-oriented text format.
//!
//! Each record is one line of six whitespace-separated fields:
//!
//! ```text
//! {id} {product_id} {quantity} {x} {y} {timestamp}
//! ```
//!
//! Integer fields are read as signed values and validated by
//! [`Record::try_new`], so a negative quantity is reported as a malformed
//! record rather than a parse failure.

use std::io::BufRead;

use log::info;

use crate::error::{AllocationError, RecordKind, Result};
use crate::types::{Demand, Location, Record, Supply};

/// Fields per record line
pub const FIELD_COUNT: usize = 6;

const EXPECTED_FORMAT: &str = "expected `{id} {product_id} {quantity} {x} {y} {timestamp}`";

/// Parse one record line
///
/// `line_no` is 1-based and only used for error messages.
///
/// ```
/// use donation_splitter::error::RecordKind;
/// use donation_splitter::io::parse_record;
///
/// let record = parse_record("4 1 25 1.5 -2 1700", 1, RecordKind::Demand).unwrap();
/// assert_eq!((record.id, record.quantity, record.timestamp), (4, 25, 1700));
/// ```
pub fn parse_record(line: &str, line_no: usize, kind: RecordKind) -> Result<Record> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return Err(AllocationError::Parse {
            line: line_no,
            reason: format!("{}, got {} fields in `{}`", EXPECTED_FORMAT, fields.len(), line.trim()),
        });
    }

    let integer = |index: usize, name: &str| -> Result<i64> {
        fields[index].parse::<i64>().map_err(|e| AllocationError::Parse {
            line: line_no,
            reason: format!("field `{}` = `{}`: {}", name, fields[index], e),
        })
    };
    let coordinate = |index: usize, name: &str| -> Result<rust_decimal::Decimal> {
        Location::parse_coordinate(fields[index]).ok_or_else(|| AllocationError::Parse {
            line: line_no,
            reason: format!("field `{}` = `{}` is not a number", name, fields[index]),
        })
    };

    let id = integer(0, "id")?;
    let product_id = integer(1, "product_id")?;
    let quantity = integer(2, "quantity")?;
    let location = Location::new(coordinate(3, "x")?, coordinate(4, "y")?);
    let timestamp = integer(5, "timestamp")?;

    Record::try_new(kind, id, product_id, quantity, location, timestamp)
}

/// Read the supply from the first non-blank line
///
/// Any further lines are ignored.
///
/// # Errors
///
/// [`AllocationError::MissingSupply`] if the source has no record line.
pub fn read_supply<R: BufRead>(reader: R) -> Result<Supply> {
    let mut supply = None;
    let mut ignored = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match supply {
            None => supply = Some(Supply::new(parse_record(&line, index + 1, RecordKind::Supply)?)),
            Some(_) => ignored += 1,
        }
    }

    if ignored > 0 {
        info!("ignoring {} extra line(s) after the donation record", ignored);
    }

    supply.ok_or(AllocationError::MissingSupply)
}

/// Read every demand line
///
/// When `product_id` is given, demand for any other product is dropped
/// here; the engine filters again regardless.
pub fn read_demands<R: BufRead>(reader: R, product_id: Option<u64>) -> Result<Vec<Demand>> {
    let mut demands = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let demand = Demand::new(parse_record(&line, index + 1, RecordKind::Demand)?);
        if product_id.map_or(true, |p| p == demand.product_id()) {
            demands.push(demand);
        }
    }

    Ok(demands)
}

// ============================================================================
// Unit Tests
// ============================================================================
