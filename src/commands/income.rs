// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{description, entry_date, positive_amount, required};
use crate::FinanceTracker;
use crate::aggregation::saturating_sum;
use crate::categories::canonical_income_source;
use crate::models::{Frequency, IncomeEntry, NewIncome};
use crate::reports::{IncomeFilter, filter_income};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use tracing::warn;

pub fn handle(app: &FinanceTracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("delete", sub)) => delete(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_frequency(raw: &str) -> Result<Frequency> {
    Frequency::parse(raw).with_context(|| {
        format!(
            "Invalid frequency '{}', expected one-time, weekly, monthly or yearly",
            raw
        )
    })
}

fn add(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let description = description(sub)?;
    let amount = positive_amount(required(sub, "amount")?)?;
    let raw_source = required(sub, "source")?.trim();
    anyhow::ensure!(!raw_source.is_empty(), "Please select a source");
    let source = match canonical_income_source(raw_source) {
        Some(s) => s.to_string(),
        None => {
            warn!("'{}' is not one of the standard income sources", raw_source);
            raw_source.to_string()
        }
    };
    let frequency = parse_frequency(required(sub, "frequency")?)?;
    let date = entry_date(app, sub)?;

    let entry = app.add_income(NewIncome {
        description,
        amount,
        source,
        frequency,
        date,
    });
    println!(
        "Recorded income #{}: {} from {} on {} ({})",
        entry.id,
        fmt_money(&entry.amount, &app.settings().currency),
        entry.source,
        entry.date,
        entry.frequency
    );
    Ok(())
}

pub fn query_rows(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<Vec<IncomeEntry>> {
    let frequency = match sub.get_one::<String>("frequency") {
        Some(f) if !f.eq_ignore_ascii_case("all") => Some(parse_frequency(f)?),
        _ => None,
    };
    let filter = IncomeFilter {
        source: sub.get_one::<String>("source").cloned(),
        frequency,
        search: sub.get_one::<String>("search").cloned(),
    };
    let mut rows = filter_income(&app.current_income(), &filter);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(app, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = app.settings().currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    e.description.clone(),
                    e.source.clone(),
                    e.frequency.to_string(),
                    fmt_money(&e.amount, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Source", "Frequency", "Amount"],
                rows
            )
        );
        let total = saturating_sum(data.iter().map(|e| e.amount));
        println!("Total: {}", fmt_money(&total, &ccy));
    }
    Ok(())
}

fn delete(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    if app.delete_income(id) {
        println!("Deleted income #{}", id);
    } else {
        println!("No income with id {}", id);
    }
    Ok(())
}
