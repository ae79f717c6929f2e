// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbuddy::FinanceTracker;
use budgetbuddy::errors::Error;
use budgetbuddy::models::{Frequency, GoalUpdate, NewBudgetGoal, NewExpense, NewIncome};
use budgetbuddy::store::{EXPENSES_KEY, GOALS_KEY, INCOME_KEY, Storage};
use budgetbuddy::utils::FixedClock;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn empty_tracker() -> FinanceTracker {
    let storage = Storage::in_memory();
    for key in [INCOME_KEY, EXPENSES_KEY, GOALS_KEY] {
        assert!(storage.set_item(key, &json!([])));
    }
    FinanceTracker::open(storage, Arc::new(FixedClock(d(2024, 3, 15))))
}

fn salary(amount: rust_decimal::Decimal, date: NaiveDate) -> NewIncome {
    NewIncome {
        description: "Salary".into(),
        amount,
        source: "Salary".into(),
        frequency: Frequency::Monthly,
        date,
    }
}

fn lunch(amount: rust_decimal::Decimal, date: NaiveDate) -> NewExpense {
    NewExpense {
        description: "Lunch".into(),
        amount,
        category: "Food & Dining".into(),
        date,
    }
}

#[test]
fn adds_and_deletes_track_collection_length() {
    let app = empty_tracker();
    let a = app.add_income(salary(dec!(100), d(2024, 3, 1)));
    let b = app.add_income(salary(dec!(200), d(2024, 3, 2)));
    app.add_expense(lunch(dec!(12.50), d(2024, 3, 3)));
    assert_eq!(app.current_income().len(), 2);
    assert_eq!(app.current_expenses().len(), 1);

    assert!(app.delete_income(a.id));
    let income = app.current_income();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].id, b.id);
    assert_eq!(income[0].amount, dec!(200));
    assert_eq!(income[0].date, d(2024, 3, 2));
    assert_eq!(income[0].description, "Salary");
}

#[test]
fn rapid_inserts_get_distinct_increasing_ids() {
    let app = empty_tracker();
    let ids: Vec<i64> = (0..20)
        .map(|_| app.add_expense(lunch(dec!(1), d(2024, 3, 1))).id)
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn deleting_unknown_id_changes_nothing_and_publishes_nothing() {
    let app = empty_tracker();
    app.add_expense(lunch(dec!(5), d(2024, 3, 1)));
    let before = app.current_expenses();

    let seen = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&seen);
    let _sub = app.repository().subscribe_expenses(move |_| {
        *counter.lock().unwrap() += 1;
    });
    assert_eq!(*seen.lock().unwrap(), 1, "replayed once on subscribe");

    assert!(!app.delete_expense(999));
    assert_eq!(*seen.lock().unwrap(), 1);
    assert_eq!(app.current_expenses(), before);
}

#[test]
fn duplicate_active_goal_is_rejected() {
    let app = empty_tracker();
    let goal = NewBudgetGoal {
        category: "Food & Dining".into(),
        monthly_limit: dec!(200),
        is_active: true,
    };
    let first = app.add_budget_goal(goal.clone()).unwrap();
    assert_eq!(first.created_date, d(2024, 3, 15));

    let err = app.add_budget_goal(goal).unwrap_err();
    assert!(matches!(err, Error::DuplicateActiveGoal(ref c) if c == "Food & Dining"));
    assert_eq!(app.current_budget_goals().len(), 1);
}

#[test]
fn inactive_goal_does_not_block_a_new_active_one() {
    let app = empty_tracker();
    app.add_budget_goal(NewBudgetGoal {
        category: "Groceries".into(),
        monthly_limit: dec!(100),
        is_active: false,
    })
    .unwrap();
    app.add_budget_goal(NewBudgetGoal {
        category: "Groceries".into(),
        monthly_limit: dec!(150),
        is_active: true,
    })
    .unwrap();
    assert_eq!(app.current_budget_goals().len(), 2);
}

#[test]
fn paused_goal_can_sit_beside_the_active_one() {
    let app = empty_tracker();
    let goal = |active| NewBudgetGoal {
        category: "Groceries".into(),
        monthly_limit: dec!(100),
        is_active: active,
    };
    app.add_budget_goal(goal(true)).unwrap();
    app.add_budget_goal(goal(false)).unwrap();
    assert_eq!(app.current_budget_goals().len(), 2);
    assert!(app.add_budget_goal(goal(true)).is_err());
    assert_eq!(
        app.current_budget_goals()
            .iter()
            .filter(|g| g.is_active)
            .count(),
        1
    );
}

#[test]
fn update_merges_fields_and_unknown_id_returns_none() {
    let app = empty_tracker();
    let goal = app
        .add_budget_goal(NewBudgetGoal {
            category: "Transportation".into(),
            monthly_limit: dec!(80),
            is_active: true,
        })
        .unwrap();

    let updated = app
        .update_budget_goal(
            goal.id,
            GoalUpdate {
                monthly_limit: Some(dec!(120)),
                is_active: None,
            },
        )
        .unwrap();
    assert_eq!(updated.monthly_limit, dec!(120));
    assert!(updated.is_active);
    assert_eq!(updated.category, "Transportation");
    assert_eq!(updated.created_date, goal.created_date);

    assert!(app.update_budget_goal(12345, GoalUpdate::default()).is_none());
    assert_eq!(app.current_budget_goals()[0].monthly_limit, dec!(120));
}

#[test]
fn delete_goal_reports_whether_it_existed() {
    let app = empty_tracker();
    let goal = app
        .add_budget_goal(NewBudgetGoal {
            category: "Shopping".into(),
            monthly_limit: dec!(60),
            is_active: true,
        })
        .unwrap();
    assert!(app.delete_budget_goal(goal.id));
    assert!(!app.delete_budget_goal(goal.id));
    assert!(app.current_budget_goals().is_empty());
}
