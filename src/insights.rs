// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget goal status, insights and suggested limits.

use crate::aggregation::saturating_sum;
use crate::categories::EXPENSE_CATEGORIES;
use crate::models::{BudgetGoal, BudgetProgress, ExpenseEntry};
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalStatus {
    OverBudget,
    NearLimit,
    Caution,
    OnTrack,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoalStatus::OverBudget => "Over Budget",
            GoalStatus::NearLimit => "Near Limit",
            GoalStatus::Caution => "Caution",
            GoalStatus::OnTrack => "On Track",
        })
    }
}

pub fn goal_status(progress: &BudgetProgress) -> GoalStatus {
    if progress.is_over_budget {
        GoalStatus::OverBudget
    } else if progress.percentage_used >= 80 {
        GoalStatus::NearLimit
    } else if progress.percentage_used >= 60 {
        GoalStatus::Caution
    } else {
        GoalStatus::OnTrack
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

pub fn goal_insights(progress: &[BudgetProgress]) -> Vec<Insight> {
    progress
        .iter()
        .filter_map(|p| {
            if p.is_over_budget {
                Some(Insight {
                    kind: InsightKind::Danger,
                    message: format!(
                        "You're {}% over budget for {}",
                        p.percentage_used.saturating_sub(100),
                        p.category
                    ),
                })
            } else if p.percentage_used >= 80 {
                Some(Insight {
                    kind: InsightKind::Warning,
                    message: format!(
                        "You're approaching your {} budget limit ({}%)",
                        p.category, p.percentage_used
                    ),
                })
            } else if p.percentage_used <= 50 && p.current_spent > Decimal::ZERO {
                Some(Insight {
                    kind: InsightKind::Success,
                    message: format!("Great job staying under budget for {}!", p.category),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Rough monthly average: one month of data per ten expenses, at least one.
pub fn average_monthly_spending(expenses: &[&ExpenseEntry]) -> Decimal {
    if expenses.is_empty() {
        return Decimal::ZERO;
    }
    let total = saturating_sum(expenses.iter().map(|e| e.amount));
    let months = expenses.len().div_ceil(10).max(1);
    total / Decimal::from(months)
}

/// Expenses in `category` dated within the three months before `today`.
pub fn recent_expenses_for_category<'a>(
    expenses: &'a [ExpenseEntry],
    category: &str,
    today: NaiveDate,
) -> Vec<&'a ExpenseEntry> {
    let since = today.checked_sub_months(Months::new(3)).unwrap_or(today);
    expenses
        .iter()
        .filter(|e| e.category == category && e.date >= since)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: String,
    pub suggested_limit: Decimal,
    pub reason: String,
}

/// Up to three suggested goals for categories without an active goal,
/// largest suggestion first.
pub fn recommended_goals(
    expenses: &[ExpenseEntry],
    goals: &[BudgetGoal],
    today: NaiveDate,
) -> Vec<Recommendation> {
    let buffer = Decimal::new(11, 1);
    let mut out: Vec<Recommendation> = EXPENSE_CATEGORIES
        .into_iter()
        .filter(|c| !goals.iter().any(|g| g.is_active && g.category == *c))
        .map(|category| {
            let recent = recent_expenses_for_category(expenses, category, today);
            let average = average_monthly_spending(&recent);
            Recommendation {
                category: category.to_string(),
                suggested_limit: average.saturating_mul(buffer).ceil(),
                reason: format!("Based on your average {} spending", category.to_lowercase()),
            }
        })
        .filter(|r| r.suggested_limit > Decimal::ZERO)
        .collect();
    out.sort_by(|a, b| b.suggested_limit.cmp(&a.suggested_limit));
    out.truncate(3);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStyle {
    Conservative,
    Moderate,
    Flexible,
}

impl LimitStyle {
    pub fn parse(s: &str) -> Option<LimitStyle> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Some(LimitStyle::Conservative),
            "moderate" => Some(LimitStyle::Moderate),
            "flexible" => Some(LimitStyle::Flexible),
            _ => None,
        }
    }

    fn multiplier(self) -> Decimal {
        match self {
            LimitStyle::Conservative => Decimal::new(8, 1),
            LimitStyle::Moderate => Decimal::ONE,
            LimitStyle::Flexible => Decimal::new(13, 1),
        }
    }
}

/// Suggested limit for a one-step goal, never below 50.
pub fn quick_goal_limit(average: Decimal, style: LimitStyle) -> Decimal {
    average
        .saturating_mul(style.multiplier())
        .ceil()
        .max(Decimal::new(50, 0))
}
