//! Rank calculation.
//!
//! A rank is a signed integer priority of one demand relative to one
//! supply; higher ranks are served first. Ranks computed against different
//! supplies are not comparable.

pub mod rank;

pub use rank::{distance_term, time_term, RankCalculator, RankOutcome};
