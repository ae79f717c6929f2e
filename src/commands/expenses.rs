// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{description, entry_date, positive_amount, required};
use crate::FinanceTracker;
use crate::aggregation::saturating_sum;
use crate::categories::canonical_expense_category;
use crate::models::{ExpenseEntry, NewExpense};
use crate::reports::{ExpenseFilter, filter_expenses};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result, ensure};
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

fn add(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let description = description(sub)?;
    let amount = positive_amount(required(sub, "amount")?)?;
    let raw_category = required(sub, "category")?.trim();
    ensure!(!raw_category.is_empty(), "Please select a category");
    let category = match canonical_expense_category(raw_category) {
        Some(c) => c.to_string(),
        None => {
            warn!("'{}' is not one of the standard expense categories", raw_category);
            raw_category.to_string()
        }
    };
    let date = entry_date(app, sub)?;

    let entry = app.add_expense(NewExpense {
        description,
        amount,
        category,
        date,
    });
    println!(
        "Recorded expense #{}: {} for {} on {}",
        entry.id,
        fmt_money(&entry.amount, &app.settings().currency),
        entry.category,
        entry.date
    );
    Ok(())
}

pub fn query_rows(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<Vec<ExpenseEntry>> {
    let filter = ExpenseFilter {
        category: sub.get_one::<String>("category").cloned(),
        search: sub.get_one::<String>("search").cloned(),
    };
    let mut rows = filter_expenses(&app.current_expenses(), &filter);
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
                    e.category.clone(),
                    fmt_money(&e.amount, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Category", "Amount"], rows)
        );
        let total = saturating_sum(data.iter().map(|e| e.amount));
        println!("Total: {}", fmt_money(&total, &ccy));
    }
    Ok(())
}

fn delete(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    if app.delete_expense(id) {
        println!("Deleted expense #{}", id);
    } else {
        println!("No expense with id {}", id);
    }
    Ok(())
}
