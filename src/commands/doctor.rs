// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::FinanceTracker;
use crate::categories::{is_expense_category, is_income_source};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub fn handle(app: &FinanceTracker) -> Result<()> {
    let rows = issues(app);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Each row is `[issue, detail]`.
pub fn issues(app: &FinanceTracker) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let today = app.clock().today();

    if !app.storage().is_available() {
        rows.push(vec![
            "storage_unavailable".into(),
            "changes are kept in memory only".into(),
        ]);
    }

    let goals = app.current_budget_goals();
    let mut active: BTreeMap<&str, usize> = BTreeMap::new();
    for g in goals.iter().filter(|g| g.is_active) {
        *active.entry(g.category.as_str()).or_default() += 1;
    }
    for (category, n) in active.into_iter().filter(|(_, n)| *n > 1) {
        rows.push(vec![
            "duplicate_active_goal".into(),
            format!("{} ({} active goals)", category, n),
        ]);
    }
    for g in goals.iter().filter(|g| !is_expense_category(&g.category)) {
        rows.push(vec![
            "goal_unknown_category".into(),
            format!("#{} {}", g.id, g.category),
        ]);
    }

    for e in app.current_income().iter() {
        if !is_income_source(&e.source) {
            rows.push(vec![
                "income_unknown_source".into(),
                format!("income #{} {}", e.id, e.source),
            ]);
        }
        if e.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("income #{} {}", e.id, e.amount),
            ]);
        }
        if e.date > today {
            rows.push(vec![
                "future_date".into(),
                format!("income #{} {}", e.id, e.date),
            ]);
        }
    }
    for e in app.current_expenses().iter() {
        if e.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("expense #{} {}", e.id, e.amount),
            ]);
        }
        if e.date > today {
            rows.push(vec![
                "future_date".into(),
                format!("expense #{} {}", e.id, e.date),
            ]);
        }
    }
    rows
}
