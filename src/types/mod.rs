//! Core data types for the donation splitter
//!
//! ## Types
//!
//! - [`Location`]: Planar point with fixed-point coordinates
//! - [`Record`]: Fields shared by supply and demand
//! - [`Supply`]: The donation being split
//! - [`Demand`]: An order for the donation's product
//! - [`AllocationReceipt`]: Immutable result of one batch
//!
//! ## Fixed-Point Coordinates
//!
//! Coordinates and distances use `rust_decimal::Decimal`, so ranks never
//! depend on platform floating-point behavior.

mod location;
mod record;
mod receipt;

pub use location::Location;
pub use record::{Demand, Record, Supply};
pub use receipt::{AllocationReceipt, Fulfillment, SupplyBalance, Warning};
