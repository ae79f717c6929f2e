// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::FinanceTracker;
use crate::models::Transaction;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
    pub recent_transactions: Vec<Transaction>,
}

pub fn view(app: &FinanceTracker) -> DashboardView {
    let total_income = app.total_income();
    let total_expenses = app.total_expenses();
    DashboardView {
        total_income,
        total_expenses,
        total_savings: total_income.saturating_sub(total_expenses),
        recent_transactions: app.recent_transactions().as_ref().clone(),
    }
}

pub fn handle(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let v = view(app);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        return Ok(());
    }
    let ccy = app.settings().currency;
    println!(
        "{}",
        pretty_table(
            &["Total income", "Total expenses", "Savings"],
            vec![vec![
                fmt_money(&v.total_income, &ccy),
                fmt_money(&v.total_expenses, &ccy),
                fmt_money(&v.total_savings, &ccy),
            ]],
        )
    );
    let rows: Vec<Vec<String>> = v
        .recent_transactions
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.kind.to_string(),
                t.description.clone(),
                t.category.clone(),
                fmt_money(&t.amount, &ccy),
            ]
        })
        .collect();
    println!("Recent transactions");
    println!(
        "{}",
        pretty_table(&["Date", "Type", "Description", "Category", "Amount"], rows)
    );
    Ok(())
}
