// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filtering and summaries behind the list and report commands.

use crate::aggregation::{total_expenses, total_income};
use crate::models::{ExpenseEntry, Frequency, IncomeEntry};
use crate::utils::month_key;
use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const ALL: &str = "all";

fn is_all(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(v) => v.eq_ignore_ascii_case(ALL),
    }
}

fn matches_search(search: &Option<String>, fields: [&str; 2]) -> bool {
    match search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => true,
        Some(term) => {
            let term = term.to_lowercase();
            fields.iter().any(|f| f.to_lowercase().contains(&term))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IncomeFilter {
    pub source: Option<String>,
    pub frequency: Option<Frequency>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Matching income, newest first. A source of "All" means no source filter.
pub fn filter_income(entries: &[IncomeEntry], filter: &IncomeFilter) -> Vec<IncomeEntry> {
    let source_all = is_all(&filter.source);
    let mut out: Vec<IncomeEntry> = entries
        .iter()
        .filter(|e| source_all || Some(e.source.as_str()) == filter.source.as_deref())
        .filter(|e| filter.frequency.is_none_or(|f| e.frequency == f))
        .filter(|e| matches_search(&filter.search, [e.description.as_str(), e.source.as_str()]))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

pub fn filter_expenses(entries: &[ExpenseEntry], filter: &ExpenseFilter) -> Vec<ExpenseEntry> {
    let category_all = is_all(&filter.category);
    let mut out: Vec<ExpenseEntry> = entries
        .iter()
        .filter(|e| category_all || Some(e.category.as_str()) == filter.category.as_deref())
        .filter(|e| matches_search(&filter.search, [e.description.as_str(), e.category.as_str()]))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    AllTime,
    Last30Days,
    Last3Months,
    Last6Months,
    LastYear,
    Custom(NaiveDate, NaiveDate),
}

impl TimeRange {
    pub fn parse(s: &str) -> Option<TimeRange> {
        match s.trim().to_lowercase().as_str() {
            "alltime" | "all" => Some(TimeRange::AllTime),
            "last30days" | "30d" => Some(TimeRange::Last30Days),
            "last3months" | "3m" => Some(TimeRange::Last3Months),
            "last6months" | "6m" => Some(TimeRange::Last6Months),
            "lastyear" | "1y" => Some(TimeRange::LastYear),
            _ => None,
        }
    }

    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let back = |months: u32| today.checked_sub_months(Months::new(months)).unwrap_or(today);
        let start = match self {
            TimeRange::AllTime => NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(today),
            TimeRange::Last30Days => today.checked_sub_days(Days::new(30)).unwrap_or(today),
            TimeRange::Last3Months => back(3),
            TimeRange::Last6Months => back(6),
            TimeRange::LastYear => back(12),
            TimeRange::Custom(start, end) => return DateRange { start, end },
        };
        DateRange { start, end: today }
    }
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Spans every dated record, padded by one day on each side.
    pub fn from_data(income: &[IncomeEntry], expenses: &[ExpenseEntry]) -> Option<DateRange> {
        let dates = income
            .iter()
            .map(|e| e.date)
            .chain(expenses.iter().map(|e| e.date));
        let (min, max) = dates.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })?;
        Some(DateRange {
            start: min.pred_opt().unwrap_or(min),
            end: max.succ_opt().unwrap_or(max),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReportFilter {
    pub range: DateRange,
    pub category: Option<String>,
}

impl ReportFilter {
    /// Income is filtered by date only; expenses by date and category.
    pub fn apply(
        &self,
        income: &[IncomeEntry],
        expenses: &[ExpenseEntry],
    ) -> (Vec<IncomeEntry>, Vec<ExpenseEntry>) {
        let category_all = is_all(&self.category);
        let income = income
            .iter()
            .filter(|e| self.range.contains(e.date))
            .cloned()
            .collect();
        let expenses = expenses
            .iter()
            .filter(|e| self.range.contains(e.date))
            .filter(|e| category_all || Some(e.category.as_str()) == self.category.as_deref())
            .cloned()
            .collect();
        (income, expenses)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Income and expense totals per `YYYY-MM`, oldest month first.
pub fn monthly_trend(income: &[IncomeEntry], expenses: &[ExpenseEntry]) -> Vec<MonthlyTotals> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for e in income {
        let slot = &mut map.entry(month_key(e.date)).or_default().0;
        *slot = slot.saturating_add(e.amount);
    }
    for e in expenses {
        let slot = &mut map.entry(month_key(e.date)).or_default().1;
        *slot = slot.saturating_add(e.amount);
    }
    map.into_iter()
        .map(|(month, (income, expenses))| MonthlyTotals {
            month,
            income,
            expenses,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelTotal {
    pub label: String,
    pub total: Decimal,
}

fn totals_by<'a>(pairs: impl Iterator<Item = (&'a str, Decimal)>) -> Vec<LabelTotal> {
    let mut map: BTreeMap<&str, Decimal> = BTreeMap::new();
    for (label, amount) in pairs {
        let slot = map.entry(label).or_default();
        *slot = slot.saturating_add(amount);
    }
    let mut out: Vec<LabelTotal> = map
        .into_iter()
        .map(|(label, total)| LabelTotal {
            label: label.to_string(),
            total,
        })
        .collect();
    // largest first; equal totals stay alphabetical
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}

pub fn category_breakdown(expenses: &[ExpenseEntry]) -> Vec<LabelTotal> {
    totals_by(expenses.iter().map(|e| (e.category.as_str(), e.amount)))
}

pub fn income_by_source(income: &[IncomeEntry]) -> Vec<LabelTotal> {
    totals_by(income.iter().map(|e| (e.source.as_str(), e.amount)))
}

/// Expense categories present in the data, alphabetical.
pub fn categories_in_use(expenses: &[ExpenseEntry]) -> Vec<String> {
    let set: BTreeSet<&str> = expenses.iter().map(|e| e.category.as_str()).collect();
    set.into_iter().map(String::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_savings: Decimal,
    pub savings_rate: Decimal,
    pub average_monthly_income: Decimal,
    pub average_monthly_expenses: Decimal,
}

fn average_monthly(items: impl Iterator<Item = (NaiveDate, Decimal)>) -> Decimal {
    let mut months = BTreeSet::new();
    let mut total = Decimal::ZERO;
    for (date, amount) in items {
        months.insert(month_key(date));
        total = total.saturating_add(amount);
    }
    if months.is_empty() {
        return Decimal::ZERO;
    }
    total / Decimal::from(months.len())
}

pub fn summary_stats(income: &[IncomeEntry], expenses: &[ExpenseEntry]) -> SummaryStats {
    let ti = total_income(income);
    let te = total_expenses(expenses);
    let net = ti.saturating_sub(te);
    let savings_rate = if ti > Decimal::ZERO {
        net.checked_div(ti)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(|r| r.round_dp(1))
            .unwrap_or(Decimal::MIN)
    } else {
        Decimal::ZERO
    };
    SummaryStats {
        total_income: ti,
        total_expenses: te,
        net_savings: net,
        savings_rate,
        average_monthly_income: average_monthly(income.iter().map(|e| (e.date, e.amount)))
            .round_dp(2),
        average_monthly_expenses: average_monthly(expenses.iter().map(|e| (e.date, e.amount)))
            .round_dp(2),
    }
}
