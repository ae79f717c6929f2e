// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::FinanceTracker;
use crate::models::{ExpenseEntry, IncomeEntry};
use crate::reports::{
    DateRange, LabelTotal, ReportFilter, TimeRange, category_breakdown, income_by_source,
    monthly_trend, summary_stats,
};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result, ensure};

pub fn handle(app: &FinanceTracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(app, sub)?,
        Some(("trend", sub)) => trend(app, sub)?,
        Some(("categories", sub)) => categories(app, sub)?,
        Some(("sources", sub)) => sources(app, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds the report filter from `--range`, `--from/--to` and `--category`.
pub fn filter_from_args(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<ReportFilter> {
    let today = app.clock().today();
    let range = match (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
        (Some(from), Some(to)) => {
            let (start, end) = (parse_date(from)?, parse_date(to)?);
            ensure!(start <= end, "--from {} is after --to {}", start, end);
            TimeRange::Custom(start, end).resolve(today)
        }
        _ => {
            let raw = sub
                .get_one::<String>("range")
                .map(String::as_str)
                .unwrap_or("alltime");
            if raw.eq_ignore_ascii_case("data") {
                DateRange::from_data(&app.current_income(), &app.current_expenses())
                    .unwrap_or_else(|| TimeRange::AllTime.resolve(today))
            } else {
                TimeRange::parse(raw)
                    .with_context(|| format!("Unknown range '{}'", raw))?
                    .resolve(today)
            }
        }
    };
    Ok(ReportFilter {
        range,
        category: sub.get_one::<String>("category").cloned(),
    })
}

fn filtered(
    app: &FinanceTracker,
    sub: &clap::ArgMatches,
) -> Result<(Vec<IncomeEntry>, Vec<ExpenseEntry>)> {
    let filter = filter_from_args(app, sub)?;
    Ok(filter.apply(&app.current_income(), &app.current_expenses()))
}

fn summary(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let (income, expenses) = filtered(app, sub)?;
    let stats = summary_stats(&income, &expenses);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats)? {
        let ccy = app.settings().currency;
        let rows = vec![
            vec!["Total income".into(), fmt_money(&stats.total_income, &ccy)],
            vec!["Total expenses".into(), fmt_money(&stats.total_expenses, &ccy)],
            vec!["Net savings".into(), fmt_money(&stats.net_savings, &ccy)],
            vec!["Savings rate".into(), format!("{}%", stats.savings_rate)],
            vec![
                "Avg monthly income".into(),
                fmt_money(&stats.average_monthly_income, &ccy),
            ],
            vec![
                "Avg monthly expenses".into(),
                fmt_money(&stats.average_monthly_expenses, &ccy),
            ],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn trend(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let (income, expenses) = filtered(app, sub)?;
    let data = monthly_trend(&income, &expenses);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    format!("{:.2}", m.income),
                    format!("{:.2}", m.expenses),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));
    }
    Ok(())
}

fn print_totals(sub: &clap::ArgMatches, header: &str, data: &[LabelTotal]) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| vec![t.label.clone(), format!("{:.2}", t.total)])
            .collect();
        println!("{}", pretty_table(&[header, "Total"], rows));
    }
    Ok(())
}

fn categories(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let (_, expenses) = filtered(app, sub)?;
    print_totals(sub, "Category", &category_breakdown(&expenses))
}

fn sources(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let (income, _) = filtered(app, sub)?;
    print_totals(sub, "Source", &income_by_source(&income))
}
