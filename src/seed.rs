// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sample data used when the store holds nothing yet, or after a reset.
//! Output depends only on the clock, so a fixed clock gives a fixed bundle.

use crate::models::{BudgetGoal, DataBundle, ExpenseEntry, Frequency, IncomeEntry};
use crate::repository::IdGenerator;
use crate::utils::{Clock, days_in_month};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

const MONTHS_OF_HISTORY: u32 = 3;

// (day, description, category, amount in cents)
const MONTHLY_EXPENSES: [(u32, &str, &str, i64); 10] = [
    (3, "Monthly rent", "Bills & Utilities", 120_000),
    (5, "Weekly grocery run", "Groceries", 8_540),
    (8, "Dinner with friends", "Food & Dining", 4_275),
    (12, "Gas station", "Transportation", 4_800),
    (14, "Electric bill", "Bills & Utilities", 9_630),
    (18, "Movie night", "Entertainment", 2_750),
    (20, "Grocery restock", "Groceries", 11_265),
    (22, "Pharmacy", "Healthcare", 1_899),
    (25, "Running shoes", "Shopping", 7_999),
    (27, "Team lunch", "Food & Dining", 2_340),
];

// (day, description, source, frequency, amount in cents)
const MONTHLY_INCOME: [(u32, &str, &str, Frequency, i64); 2] = [
    (1, "Monthly salary", "Salary", Frequency::Monthly, 420_000),
    (15, "Freelance project", "Freelance Work", Frequency::OneTime, 65_000),
];

// (category, monthly limit)
const GOALS: [(&str, i64); 3] = [
    ("Food & Dining", 300),
    ("Groceries", 400),
    ("Entertainment", 100),
];

fn day_in(month_start: NaiveDate, day: u32) -> Option<NaiveDate> {
    month_start.with_day(day.min(days_in_month(month_start)))
}

/// Amounts drift a little from month to month so charts are not flat.
fn drift(cents: i64, months_back: u32) -> Decimal {
    let factor = Decimal::new(100 + 3 * months_back as i64, 2);
    (Decimal::new(cents, 2) * factor).round_dp(2)
}

pub fn sample_data(clock: &dyn Clock) -> DataBundle {
    let today = clock.today();
    let ids = IdGenerator::new(0);
    let base = clock.now_millis();
    let this_month = today.with_day(1).unwrap_or(today);

    let mut bundle = DataBundle::default();
    for months_back in (0..=MONTHS_OF_HISTORY).rev() {
        let Some(start) = this_month.checked_sub_months(Months::new(months_back)) else {
            continue;
        };
        for (day, description, source, frequency, cents) in MONTHLY_INCOME {
            let Some(date) = day_in(start, day).filter(|d| *d <= today) else {
                continue;
            };
            bundle.income.push(IncomeEntry {
                id: ids.next(base),
                description: description.to_string(),
                amount: drift(cents, months_back),
                source: source.to_string(),
                frequency,
                date,
            });
        }
        for (day, description, category, cents) in MONTHLY_EXPENSES {
            let Some(date) = day_in(start, day).filter(|d| *d <= today) else {
                continue;
            };
            bundle.expenses.push(ExpenseEntry {
                id: ids.next(base),
                description: description.to_string(),
                amount: drift(cents, months_back),
                category: category.to_string(),
                date,
            });
        }
    }

    let created_date = this_month
        .checked_sub_months(Months::new(MONTHS_OF_HISTORY))
        .unwrap_or(this_month);
    for (category, limit) in GOALS {
        bundle.budget_goals.push(BudgetGoal {
            id: ids.next(base),
            category: category.to_string(),
            monthly_limit: Decimal::new(limit, 0),
            created_date,
            is_active: true,
        });
    }
    bundle
}
