//! Rank calculation for one demand against one supply.
//!
//! ## Formula
//!
//! ```text
//! rank = round(distance_coefficient / distance)
//!      + time_coefficient * (supply.timestamp - demand.timestamp)
//! ```
//!
//! Higher rank is served first. Close orders and old orders win.
//!
//! ## Edge Cases
//!
//! - **Distance 0**: the inverse-distance term is the limit of the formula,
//!   i.e. `i64::MAX` for a positive coefficient (`i64::MIN` for a negative
//!   one, 0 for a zero one). Nothing divides by zero.
//! - **Order newer than donation**: the time difference is negative and is
//!   used as-is. A [`Warning::TimestampInversion`] is returned and logged.
//! - The distance term is capped at the `i64` bounds; the time term and the
//!   sum are exact `i128`, so a capped distance term still orders by age.

use log::warn;
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RankConfig;
use crate::error::{AllocationError, Result};
use crate::types::{Demand, Supply, Warning};

/// Rank of one demand, plus any diagnostic raised while computing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankOutcome {
    pub rank: i128,
    pub warning: Option<Warning>,
}

/// Computes ranks with a fixed pair of coefficients.
///
/// ## Example
///
/// ```
/// use donation_splitter::config::RankConfig;
/// use donation_splitter::ranking::RankCalculator;
/// use donation_splitter::types::{Demand, Location, Record, Supply};
///
/// let calculator = RankCalculator::new(RankConfig::default());
/// let supply = Supply::new(Record::new(1, 1, 10, Location::from_ints(0, 0), 100));
/// let demand = Demand::new(Record::new(2, 1, 5, Location::from_ints(30, 40), 90));
///
/// // 5000 / 50 + 1 * (100 - 90)
/// assert_eq!(calculator.rank(&supply, &demand).unwrap().rank, 110);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RankCalculator {
    config: RankConfig,
}

impl RankCalculator {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Rank `demand` relative to `supply`
    ///
    /// # Errors
    ///
    /// [`AllocationError::ArithmeticOverflow`] if the distance between the two
    /// locations exceeds the decimal range.
    pub fn rank(&self, supply: &Supply, demand: &Demand) -> Result<RankOutcome> {
        let distance = supply
            .location()
            .distance(demand.location())
            .ok_or(AllocationError::ArithmeticOverflow {
                demand_id: demand.id(),
            })?;

        let warning = if supply.timestamp() < demand.timestamp() {
            warn!(
                "order {} timestamp {} is later than donation {} timestamp {}; behavior may be unintuitive",
                demand.id(),
                demand.timestamp(),
                supply.id(),
                supply.timestamp()
            );
            Some(Warning::TimestampInversion {
                demand_id: demand.id(),
                supply_timestamp: supply.timestamp(),
                demand_timestamp: demand.timestamp(),
            })
        } else {
            None
        };

        let rank = i128::from(distance_term(self.config.distance_coefficient, distance))
            + time_term(self.config.time_coefficient, supply.timestamp(), demand.timestamp());

        Ok(RankOutcome { rank, warning })
    }
}

/// `round(coefficient / distance)`, saturated into `i64`
///
/// `distance` must be non-negative.
pub fn distance_term(coefficient: Decimal, distance: Decimal) -> i64 {
    let saturated = || {
        if coefficient.is_zero() {
            0
        } else if coefficient.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    };

    if distance.is_zero() {
        return saturated();
    }

    match coefficient.checked_div(distance) {
        Some(quotient) => quotient
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or_else(saturated),
        None => saturated(),
    }
}

/// `coefficient * (supply_timestamp - demand_timestamp)`
///
/// Exact for every `i64` input: the difference is below `2^64` in magnitude
/// and the coefficient at most `2^63`, so the product fits in `i128`.
pub fn time_term(coefficient: i64, supply_timestamp: i64, demand_timestamp: i64) -> i128 {
    (i128::from(supply_timestamp) - i128::from(demand_timestamp)) * i128::from(coefficient)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Record};

    fn supply_at(x: i64, y: i64, timestamp: i64) -> Supply {
        Supply::new(Record::new(1, 1, 100, Location::from_ints(x, y), timestamp))
    }

    fn demand_at(id: u64, x: i64, y: i64, timestamp: i64) -> Demand {
        Demand::new(Record::new(id, 1, 10, Location::from_ints(x, y), timestamp))
    }

    #[test]
    fn test_distance_term_rounding() {
        let coefficient = Decimal::from(5000);
        assert_eq!(distance_term(coefficient, Decimal::from(3)), 1667); // 1666.67
        assert_eq!(distance_term(coefficient, Decimal::from(8)), 625);
        // 5000 / 400 = 12.5 rounds away from zero
        assert_eq!(distance_term(coefficient, Decimal::from(400)), 13);
        assert_eq!(distance_term(coefficient, Decimal::from(20_000)), 0);
    }

    #[test]
    fn test_distance_term_zero_distance() {
        assert_eq!(distance_term(Decimal::from(5000), Decimal::ZERO), i64::MAX);
        assert_eq!(distance_term(Decimal::from(-5), Decimal::ZERO), i64::MIN);
        assert_eq!(distance_term(Decimal::ZERO, Decimal::ZERO), 0);
    }

    #[test]
    fn test_distance_term_tiny_distance_saturates() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(distance_term(Decimal::from(5000), tiny), i64::MAX);
    }

    #[test]
    fn test_time_term() {
        assert_eq!(time_term(1, 100, 40), 60);
        assert_eq!(time_term(3, 100, 40), 180);
        assert_eq!(time_term(1, 40, 100), -60);
        // No saturation: (2^64 - 1) * 2
        assert_eq!(
            time_term(2, i64::MAX, i64::MIN),
            i128::from(u64::MAX) * 2
        );
    }

    #[test]
    fn test_rank_combines_terms() {
        let calculator = RankCalculator::new(RankConfig::default());
        let outcome = calculator
            .rank(&supply_at(0, 0, 1000), &demand_at(2, 3, 4, 900))
            .unwrap();

        // 5000 / 5 + (1000 - 900)
        assert_eq!(outcome.rank, 1100);
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn test_rank_colocated_demand() {
        let calculator = RankCalculator::new(RankConfig::default());
        let outcome = calculator
            .rank(&supply_at(5, 5, 1000), &demand_at(2, 5, 5, 0))
            .unwrap();

        // Capped distance term plus the full time term
        assert_eq!(outcome.rank, i128::from(i64::MAX) + 1000);
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn test_rank_colocated_keeps_age() {
        let calculator = RankCalculator::default();
        let supply = supply_at(0, 0, 1000);

        let newer = calculator.rank(&supply, &demand_at(2, 0, 0, 990)).unwrap();
        let older = calculator.rank(&supply, &demand_at(3, 0, 0, 0)).unwrap();
        let inverted = calculator.rank(&supply, &demand_at(4, 0, 0, 1010)).unwrap();

        assert!(older.rank > newer.rank);
        assert!(newer.rank > inverted.rank);
        assert_eq!(inverted.rank, i128::from(i64::MAX) - 10);
    }

    #[test]
    fn test_rank_tiny_distance_not_colocated() {
        let calculator = RankCalculator::default();
        let supply = supply_at(0, 0, 0);
        let demand = Demand::new(Record::new(
            2,
            1,
            10,
            Location::new(Decimal::new(5, 15), Decimal::ZERO),
            0,
        ));

        // 5000 / 5e-15
        let outcome = calculator.rank(&supply, &demand).unwrap();
        assert_eq!(outcome.rank, 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_rank_far_coordinates() {
        let calculator = RankCalculator::default();
        let supply = supply_at(0, 0, 1000);
        let far = Location::new(Location::parse_coordinate("3e14").unwrap(), Decimal::ZERO);
        let demand = Demand::new(Record::new(2, 1, 10, far, 1000));

        // 5000 / 3e14 rounds to 0
        let outcome = calculator.rank(&supply, &demand).unwrap();
        assert_eq!(outcome.rank, 0);
    }

    #[test]
    fn test_rank_timestamp_inversion() {
        let calculator = RankCalculator::new(RankConfig::default());
        let outcome = calculator
            .rank(&supply_at(0, 0, 100), &demand_at(9, 0, 10, 150))
            .unwrap();

        // 5000 / 10 - 50
        assert_eq!(outcome.rank, 450);
        assert_eq!(
            outcome.warning,
            Some(Warning::TimestampInversion {
                demand_id: 9,
                supply_timestamp: 100,
                demand_timestamp: 150,
            })
        );
    }

    #[test]
    fn test_rank_custom_coefficients() {
        let config = RankConfig::new(Decimal::from(100), 10);
        let calculator = RankCalculator::new(config);
        let outcome = calculator
            .rank(&supply_at(0, 0, 20), &demand_at(2, 0, 50, 18))
            .unwrap();

        // 100 / 50 + 10 * 2
        assert_eq!(outcome.rank, 22);
    }

    #[test]
    fn test_rank_distance_overflow() {
        let calculator = RankCalculator::default();
        let supply = Supply::new(Record::new(
            1,
            1,
            1,
            Location::new(Decimal::MAX, Decimal::ZERO),
            0,
        ));
        let demand = Demand::new(Record::new(
            7,
            1,
            1,
            Location::new(Decimal::MIN, Decimal::ZERO),
            0,
        ));

        let err = calculator.rank(&supply, &demand).unwrap_err();
        assert!(matches!(err, AllocationError::ArithmeticOverflow { demand_id: 7 }));
    }
}
