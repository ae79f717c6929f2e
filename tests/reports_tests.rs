// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbuddy::insights::{
    GoalStatus, InsightKind, LimitStyle, goal_insights, goal_status, quick_goal_limit,
    recommended_goals,
};
use budgetbuddy::models::{BudgetGoal, BudgetProgress, ExpenseEntry, Frequency, IncomeEntry};
use budgetbuddy::reports::{
    DateRange, ExpenseFilter, IncomeFilter, ReportFilter, TimeRange, category_breakdown,
    categories_in_use, filter_expenses, filter_income, income_by_source, monthly_trend,
    summary_stats,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn inc(id: i64, source: &str, freq: Frequency, amount: Decimal, date: NaiveDate) -> IncomeEntry {
    IncomeEntry {
        id,
        description: format!("{} payment", source),
        amount,
        source: source.into(),
        frequency: freq,
        date,
    }
}

fn exp(id: i64, category: &str, amount: Decimal, date: NaiveDate) -> ExpenseEntry {
    ExpenseEntry {
        id,
        description: format!("{} purchase", category),
        amount,
        category: category.into(),
        date,
    }
}

fn progress(spent: Decimal, limit: Decimal, pct: i64) -> BudgetProgress {
    BudgetProgress {
        category: "Groceries".into(),
        monthly_limit: limit,
        current_spent: spent,
        remaining_budget: limit - spent,
        percentage_used: pct,
        is_over_budget: spent > limit,
        days_left_in_month: 10,
    }
}

#[test]
fn income_filters_combine_and_sort_newest_first() {
    let data = vec![
        inc(1, "Salary", Frequency::Monthly, dec!(100), d(2024, 1, 1)),
        inc(2, "Freelance Work", Frequency::OneTime, dec!(50), d(2024, 2, 1)),
        inc(3, "Salary", Frequency::Monthly, dec!(100), d(2024, 2, 1)),
    ];
    let all = filter_income(
        &data,
        &IncomeFilter {
            source: Some("All".into()),
            ..Default::default()
        },
    );
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].id, 1);

    let salary = filter_income(
        &data,
        &IncomeFilter {
            source: Some("Salary".into()),
            frequency: Some(Frequency::Monthly),
            search: None,
        },
    );
    assert_eq!(salary.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 1]);

    let search = filter_income(
        &data,
        &IncomeFilter {
            search: Some("  FREELANCE ".into()),
            ..Default::default()
        },
    );
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].id, 2);
}

#[test]
fn expense_search_matches_description_or_category() {
    let mut data = vec![
        exp(1, "Groceries", dec!(20), d(2024, 1, 5)),
        exp(2, "Travel", dec!(300), d(2024, 1, 9)),
    ];
    data[1].description = "Train to the coast".into();
    let hits = filter_expenses(
        &data,
        &ExpenseFilter {
            category: None,
            search: Some("coast".into()),
        },
    );
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);
    let groceries = filter_expenses(
        &data,
        &ExpenseFilter {
            category: Some("Groceries".into()),
            search: None,
        },
    );
    assert_eq!(groceries.len(), 1);
}

#[test]
fn time_ranges_resolve_against_today() {
    let today = d(2024, 5, 31);
    assert_eq!(TimeRange::parse("LAST30DAYS"), Some(TimeRange::Last30Days));
    assert_eq!(TimeRange::parse("weekly"), None);
    assert_eq!(
        TimeRange::Last30Days.resolve(today),
        DateRange {
            start: d(2024, 5, 1),
            end: today
        }
    );
    assert_eq!(TimeRange::Last3Months.resolve(today).start, d(2024, 2, 29));
    assert_eq!(TimeRange::LastYear.resolve(today).start, d(2023, 5, 31));
    let custom = TimeRange::Custom(d(2024, 1, 1), d(2024, 1, 31)).resolve(today);
    assert!(custom.contains(d(2024, 1, 31)));
    assert!(!custom.contains(d(2024, 2, 1)));
}

#[test]
fn data_range_pads_one_day_each_side() {
    let income = vec![inc(1, "Salary", Frequency::Monthly, dec!(1), d(2024, 2, 10))];
    let expenses = vec![exp(2, "Other", dec!(1), d(2024, 3, 1))];
    let range = DateRange::from_data(&income, &expenses).unwrap();
    assert_eq!(range.start, d(2024, 2, 9));
    assert_eq!(range.end, d(2024, 3, 2));
    assert!(DateRange::from_data(&[], &[]).is_none());
}

#[test]
fn report_filter_limits_expenses_by_category_only() {
    let income = vec![
        inc(1, "Salary", Frequency::Monthly, dec!(1000), d(2024, 1, 1)),
        inc(2, "Salary", Frequency::Monthly, dec!(1000), d(2024, 2, 1)),
    ];
    let expenses = vec![
        exp(3, "Groceries", dec!(80), d(2024, 1, 4)),
        exp(4, "Shopping", dec!(60), d(2024, 2, 4)),
        exp(5, "Groceries", dec!(40), d(2024, 2, 6)),
    ];
    let filter = ReportFilter {
        range: TimeRange::Custom(d(2024, 2, 1), d(2024, 2, 29)).resolve(d(2024, 3, 1)),
        category: Some("Groceries".into()),
    };
    let (i, e) = filter.apply(&income, &expenses);
    assert_eq!(i.len(), 1);
    assert_eq!(e.len(), 1);
    assert_eq!(e[0].id, 5);
}

#[test]
fn monthly_trend_is_oldest_first() {
    let income = vec![
        inc(1, "Salary", Frequency::Monthly, dec!(1000), d(2024, 2, 1)),
        inc(2, "Salary", Frequency::Monthly, dec!(900), d(2024, 1, 1)),
    ];
    let expenses = vec![
        exp(3, "Groceries", dec!(80), d(2024, 1, 4)),
        exp(4, "Groceries", dec!(20), d(2024, 1, 24)),
        exp(5, "Travel", dec!(10), d(2023, 12, 30)),
    ];
    let trend = monthly_trend(&income, &expenses);
    let months: Vec<&str> = trend.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
    assert_eq!(trend[0].income, Decimal::ZERO);
    assert_eq!(trend[1].income, dec!(900));
    assert_eq!(trend[1].expenses, dec!(100));
}

#[test]
fn breakdowns_sort_by_total_then_name() {
    let expenses = vec![
        exp(1, "Shopping", dec!(50), d(2024, 1, 1)),
        exp(2, "Groceries", dec!(30), d(2024, 1, 2)),
        exp(3, "Groceries", dec!(20), d(2024, 1, 3)),
        exp(4, "Travel", dec!(90), d(2024, 1, 4)),
    ];
    let labels: Vec<String> = category_breakdown(&expenses)
        .into_iter()
        .map(|t| format!("{}={}", t.label, t.total))
        .collect();
    assert_eq!(labels, vec!["Travel=90", "Groceries=50", "Shopping=50"]);
    assert_eq!(
        categories_in_use(&expenses),
        vec!["Groceries", "Shopping", "Travel"]
    );

    let income = vec![
        inc(5, "Salary", Frequency::Monthly, dec!(10), d(2024, 1, 1)),
        inc(6, "Bonus", Frequency::OneTime, dec!(40), d(2024, 1, 1)),
    ];
    assert_eq!(income_by_source(&income)[0].label, "Bonus");
}

#[test]
fn summary_stats_rates_and_monthly_averages() {
    let income = vec![
        inc(1, "Salary", Frequency::Monthly, dec!(1000), d(2024, 1, 1)),
        inc(2, "Salary", Frequency::Monthly, dec!(1000), d(2024, 2, 1)),
    ];
    let expenses = vec![
        exp(3, "Groceries", dec!(300), d(2024, 1, 4)),
        exp(4, "Groceries", dec!(450), d(2024, 2, 4)),
    ];
    let s = summary_stats(&income, &expenses);
    assert_eq!(s.net_savings, dec!(1250));
    assert_eq!(s.savings_rate, dec!(62.5));
    assert_eq!(s.average_monthly_income, dec!(1000));
    assert_eq!(s.average_monthly_expenses, dec!(375));

    let empty = summary_stats(&[], &expenses);
    assert_eq!(empty.savings_rate, Decimal::ZERO);
}

#[test]
fn goal_status_thresholds() {
    assert_eq!(goal_status(&progress(dec!(110), dec!(100), 110)), GoalStatus::OverBudget);
    assert_eq!(goal_status(&progress(dec!(80), dec!(100), 80)), GoalStatus::NearLimit);
    assert_eq!(goal_status(&progress(dec!(60), dec!(100), 60)), GoalStatus::Caution);
    assert_eq!(goal_status(&progress(dec!(10), dec!(100), 10)), GoalStatus::OnTrack);
    assert_eq!(GoalStatus::NearLimit.to_string(), "Near Limit");
}

#[test]
fn insights_cover_danger_warning_and_success() {
    let items = goal_insights(&[
        progress(dec!(125), dec!(100), 125),
        progress(dec!(85), dec!(100), 85),
        progress(dec!(20), dec!(100), 20),
        progress(dec!(0), dec!(100), 0),
        progress(dec!(70), dec!(100), 70),
    ]);
    let kinds: Vec<InsightKind> = items.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![InsightKind::Danger, InsightKind::Warning, InsightKind::Success]
    );
    assert_eq!(items[0].message, "You're 25% over budget for Groceries");
}

#[test]
fn recommendations_skip_goaled_categories_and_old_spend() {
    let today = d(2024, 6, 15);
    let expenses = vec![
        exp(1, "Shopping", dec!(30), d(2024, 6, 1)),
        exp(2, "Shopping", dec!(30), d(2024, 5, 1)),
        exp(3, "Shopping", dec!(30), d(2024, 4, 1)),
        exp(4, "Transportation", dec!(45), d(2024, 6, 2)),
        exp(5, "Travel", dec!(900), d(2023, 12, 1)),
        exp(6, "Groceries", dec!(500), d(2024, 6, 3)),
    ];
    let goals = vec![BudgetGoal {
        id: 9,
        category: "Groceries".into(),
        monthly_limit: dec!(400),
        created_date: d(2024, 1, 1),
        is_active: true,
    }];
    let recs = recommended_goals(&expenses, &goals, today);
    let cats: Vec<&str> = recs.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(cats, vec!["Shopping", "Transportation"]);
    assert_eq!(recs[0].suggested_limit, dec!(99));
    assert_eq!(recs[1].suggested_limit, dec!(50));
}

#[test]
fn quick_goal_limit_applies_style_and_floor() {
    assert_eq!(LimitStyle::parse("Flexible"), Some(LimitStyle::Flexible));
    assert_eq!(quick_goal_limit(dec!(40), LimitStyle::Moderate), dec!(50));
    assert_eq!(quick_goal_limit(dec!(100), LimitStyle::Flexible), dec!(130));
    assert_eq!(quick_goal_limit(dec!(101), LimitStyle::Conservative), dec!(81));
}
