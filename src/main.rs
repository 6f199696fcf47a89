//! Donation Splitter - batch entry point
//!
//! ```text
//! donation-splitter [DONATION] [ORDERS] [RESULT_DONATION] [RESULT_ORDERS]
//! ```
//!
//! Paths default to `donation.txt`, `orders.txt`, `result_donation.txt` and
//! `result_orders.txt`. The rank coefficients can be overridden with
//! `DONATION_DISTANCE_COEFFICIENT` and `DONATION_TIME_COEFFICIENT`. Logging
//! defaults to `info` and follows `RUST_LOG` when it is set.

use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::process::ExitCode;

use env_logger::Env;
use log::{error, info};
use rust_decimal::Decimal;

use donation_splitter::io::{read_demands, read_supply, write_fulfillments, write_supply};
use donation_splitter::{AllocationEngine, AllocationError, RankConfig};

const DEFAULT_PATHS: [&str; 4] = [
    "donation.txt",
    "orders.txt",
    "result_donation.txt",
    "result_orders.txt",
];

const DISTANCE_COEFFICIENT_VAR: &str = "DONATION_DISTANCE_COEFFICIENT";
const TIME_COEFFICIENT_VAR: &str = "DONATION_TIME_COEFFICIENT";

const DEFAULT_LOG_FILTER: &str = "info";

/// Logger builder reading its filter from `env`
fn logger_builder(env: Env<'_>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp(None);
    builder
}

/// Coefficients from the environment, falling back to the defaults
fn load_config() -> Result<RankConfig, String> {
    let mut config = RankConfig::default();

    if let Ok(raw) = env::var(DISTANCE_COEFFICIENT_VAR) {
        let value = Decimal::from_str_exact(raw.trim())
            .map_err(|e| format!("{}={}: {}", DISTANCE_COEFFICIENT_VAR, raw, e))?;
        config = config.with_distance_coefficient(value);
    }
    if let Ok(raw) = env::var(TIME_COEFFICIENT_VAR) {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("{}={}: {}", TIME_COEFFICIENT_VAR, raw, e))?;
        config = config.with_time_coefficient(value);
    }

    Ok(config)
}

fn run(paths: &[String; 4], config: RankConfig) -> Result<(), AllocationError> {
    let [donation_path, orders_path, result_donation_path, result_orders_path] = paths;

    let supply = read_supply(BufReader::new(File::open(donation_path)?))?;
    let demands = read_demands(
        BufReader::new(File::open(orders_path)?),
        Some(supply.product_id()),
    )?;

    let receipt = AllocationEngine::new(config).allocate(&supply, &demands)?;

    write_supply(BufWriter::new(File::create(result_donation_path)?), &receipt)?;
    write_fulfillments(BufWriter::new(File::create(result_orders_path)?), &receipt)?;

    info!("receipt digest {}", receipt.digest_hex()?);
    Ok(())
}

fn main() -> ExitCode {
    logger_builder(Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();

    let mut args = env::args().skip(1);
    let paths: [String; 4] =
        DEFAULT_PATHS.map(|default| args.next().unwrap_or_else(|| default.to_string()));

    let config = match load_config() {
        Ok(config) => config,
        Err(message) => {
            error!("invalid configuration: {}", message);
            return ExitCode::FAILURE;
        }
    };

    match run(&paths, config) {
        Ok(()) => {
            println!("Order processing is completed!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_logger_defaults_to_info() {
        let env = Env::new().filter_or("DONATION_SPLITTER_UNSET_LOG", DEFAULT_LOG_FILTER);
        assert_eq!(logger_builder(env).build().filter(), LevelFilter::Info);
    }

    #[test]
    fn test_logger_follows_filter_variable() {
        env::set_var("DONATION_SPLITTER_DEBUG_LOG", "debug");
        let env = Env::new().filter_or("DONATION_SPLITTER_DEBUG_LOG", DEFAULT_LOG_FILTER);
        assert_eq!(logger_builder(env).build().filter(), LevelFilter::Debug);
    }
}
