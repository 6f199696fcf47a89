//! Rank formula coefficients.
//!
//! The shape of the formula is fixed; only its two weights are supplied per
//! run:
//!
//! ```text
//! rank = round(distance_coefficient / distance) + time_coefficient * (t_supply - t_demand)
//! ```
//!
//! ## Example
//!
//! ```
//! use donation_splitter::config::RankConfig;
//! use rust_decimal::Decimal;
//!
//! let config = RankConfig::default().with_time_coefficient(2);
//! assert_eq!(config.distance_coefficient, Decimal::from(5000));
//! assert_eq!(config.time_coefficient, 2);
//! ```

use rust_decimal::Decimal;

/// Default weight of the inverse-distance term
pub const DEFAULT_DISTANCE_COEFFICIENT: i64 = 5000;

/// Default weight of the time-difference term
pub const DEFAULT_TIME_COEFFICIENT: i64 = 1;

/// Run-wide weights for the rank formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankConfig {
    /// Numerator of the inverse-distance term
    pub distance_coefficient: Decimal,

    /// Multiplier applied to `supply.timestamp - demand.timestamp`
    pub time_coefficient: i64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            distance_coefficient: Decimal::from(DEFAULT_DISTANCE_COEFFICIENT),
            time_coefficient: DEFAULT_TIME_COEFFICIENT,
        }
    }
}

impl RankConfig {
    /// Create a config with explicit coefficients
    pub fn new(distance_coefficient: Decimal, time_coefficient: i64) -> Self {
        Self {
            distance_coefficient,
            time_coefficient,
        }
    }

    /// Replace the distance coefficient
    pub fn with_distance_coefficient(mut self, coefficient: Decimal) -> Self {
        self.distance_coefficient = coefficient;
        self
    }

    /// Replace the time coefficient
    pub fn with_time_coefficient(mut self, coefficient: i64) -> Self {
        self.time_coefficient = coefficient;
        self
    }
}
