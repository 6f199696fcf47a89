//! Text loader and sink around the allocation core.
//!
//! The engine never touches files; this module turns lines into records and
//! receipts back into lines, matching the batch tool's file formats.

pub mod reader;
pub mod writer;

pub use reader::{parse_record, read_demands, read_supply, FIELD_COUNT};
pub use writer::{write_fulfillments, write_supply, NO_MATCH_MESSAGE};
