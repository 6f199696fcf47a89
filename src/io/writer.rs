//! Result sink for the line-oriented text format.
//!
//! - Supply result: one line, `{supply_id} {remaining_quantity}`
//! - Demand result: one `{demand_id} {remaining_quantity}` line per processed
//!   demand in rank order, or [`NO_MATCH_MESSAGE`] when nothing was processed

use std::io::Write;

use crate::error::Result;
use crate::types::AllocationReceipt;

/// Written instead of demand lines when the processed set is empty
pub const NO_MATCH_MESSAGE: &str = "No orders match to donation.";

/// Write the remaining supply line
pub fn write_supply<W: Write>(mut writer: W, receipt: &AllocationReceipt) -> Result<()> {
    writeln!(
        writer,
        "{} {}",
        receipt.supply.supply_id, receipt.supply.remaining_quantity
    )?;
    writer.flush()?;
    Ok(())
}

/// Write one line per processed demand
pub fn write_fulfillments<W: Write>(mut writer: W, receipt: &AllocationReceipt) -> Result<()> {
    if receipt.is_empty() {
        writeln!(writer, "{}", NO_MATCH_MESSAGE)?;
    }
    for fulfillment in &receipt.fulfillments {
        writeln!(
            writer,
            "{} {}",
            fulfillment.demand_id, fulfillment.remaining_quantity
        )?;
    }
    writer.flush()?;
    Ok(())
}
