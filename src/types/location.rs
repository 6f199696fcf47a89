//! Planar location with fixed-point coordinates.
//!
//! Coordinates are `rust_decimal::Decimal` so that distance, and therefore
//! rank, is identical on every platform. The unit is arbitrary (km, m,
//! degrees...); only the Euclidean distance between two locations matters,
//! and the distance coefficient has to be tuned to the chosen unit.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, MathematicalOps};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub x: Decimal,
    pub y: Decimal,
}

impl Location {
    /// Create a location from two coordinates
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }

    /// Create a location from whole-number coordinates
    ///
    /// ```
    /// use donation_splitter::types::Location;
    ///
    /// let here = Location::from_ints(3, 4);
    /// assert_eq!(here.distance(&Location::from_ints(0, 0)), Some(5.into()));
    /// ```
    pub fn from_ints(x: i64, y: i64) -> Self {
        Self::new(Decimal::from(x), Decimal::from(y))
    }

    /// Parse one coordinate from text, accepting plain or scientific notation
    pub fn parse_coordinate(s: &str) -> Option<Decimal> {
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .ok()
    }

    /// Euclidean distance to `other`
    ///
    /// Computed as `m * sqrt(1 + (n / m)^2)` with `m` the larger and `n` the
    /// smaller axis difference, so neither huge nor tiny differences are
    /// squared directly. Returns `None` if a difference or the result
    /// overflows the decimal range.
    pub fn distance(&self, other: &Location) -> Option<Decimal> {
        let dx = self.x.checked_sub(other.x)?.abs();
        let dy = self.y.checked_sub(other.y)?.abs();
        let (major, minor) = if dx >= dy { (dx, dy) } else { (dy, dx) };

        if minor.is_zero() {
            return Some(major);
        }

        let ratio = minor.checked_div(major)?;
        let root = Decimal::ONE.checked_add(ratio.checked_mul(ratio)?)?.sqrt()?;
        major.checked_mul(root)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
