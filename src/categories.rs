// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Canonical expense categories and income sources. Records store plain
//! strings and membership is never enforced by the repository.

use crate::models::BudgetGoal;

pub const EXPENSE_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Groceries",
    "Other",
];

pub const INCOME_SOURCES: [&str; 9] = [
    "Salary",
    "Freelance Work",
    "Business Income",
    "Investment Returns",
    "Rental Income",
    "Side Hustle",
    "Bonus",
    "Gift/Prize",
    "Other",
];

pub fn is_expense_category(name: &str) -> bool {
    EXPENSE_CATEGORIES.contains(&name)
}

pub fn is_income_source(name: &str) -> bool {
    INCOME_SOURCES.contains(&name)
}

/// Case-insensitive lookup returning the canonical spelling.
pub fn canonical_expense_category(name: &str) -> Option<&'static str> {
    let name = name.trim();
    EXPENSE_CATEGORIES
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(name))
}

pub fn canonical_income_source(name: &str) -> Option<&'static str> {
    let name = name.trim();
    INCOME_SOURCES
        .into_iter()
        .find(|s| s.eq_ignore_ascii_case(name))
}

/// Expense categories that do not yet have an active goal.
pub fn available_categories(goals: &[BudgetGoal]) -> Vec<&'static str> {
    EXPENSE_CATEGORIES
        .into_iter()
        .filter(|c| !goals.iter().any(|g| g.is_active && g.category == *c))
        .collect()
}
