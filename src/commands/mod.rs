// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod config;
pub mod dashboard;
pub mod doctor;
pub mod expenses;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod income;
pub mod reports;
pub mod reset;

use crate::FinanceTracker;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result, ensure};
use chrono::NaiveDate;
use rust_decimal::Decimal;

// The core accepts records as given, so input checks live here.

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .with_context(|| format!("--{} is required", name))
}

pub(crate) fn description(m: &clap::ArgMatches) -> Result<String> {
    let d = required(m, "description")?.trim();
    ensure!(!d.is_empty(), "Please enter a description");
    Ok(d.to_string())
}

pub(crate) fn positive_amount(raw: &str) -> Result<Decimal> {
    let amount = parse_decimal(raw)?;
    ensure!(
        amount > Decimal::ZERO,
        "Amount must be greater than zero, got {}",
        amount
    );
    Ok(amount)
}

/// `--date`, defaulting to today; future dates are refused.
pub(crate) fn entry_date(app: &FinanceTracker, m: &clap::ArgMatches) -> Result<NaiveDate> {
    let today = app.clock().today();
    let date = match m.get_one::<String>("date") {
        Some(raw) => parse_date(raw)?,
        None => today,
    };
    ensure!(date <= today, "Date {} is in the future", date);
    Ok(date)
}
