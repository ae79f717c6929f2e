// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbuddy::FinanceTracker;
use budgetbuddy::db::SqliteBackend;
use budgetbuddy::models::{
    BudgetGoal, ExpenseEntry, Frequency, IncomeEntry, NewBudgetGoal, NewExpense, NewIncome,
};
use budgetbuddy::settings::Settings;
use budgetbuddy::store::{
    EXPENSES_KEY, GOALS_KEY, INCOME_KEY, SETTINGS_KEY, Storage, UnavailableBackend,
};
use budgetbuddy::utils::FixedClock;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(d(2024, 3, 15)))
}

fn blank(storage: &Storage) {
    for key in [INCOME_KEY, EXPENSES_KEY, GOALS_KEY] {
        assert!(storage.set_item(key, &json!([])));
    }
}

fn populate(app: &FinanceTracker) {
    app.add_income(NewIncome {
        description: "March salary".into(),
        amount: dec!(4200),
        source: "Salary".into(),
        frequency: Frequency::Monthly,
        date: d(2024, 3, 1),
    });
    app.add_expense(NewExpense {
        description: "Dinner out".into(),
        amount: dec!(64.30),
        category: "Food & Dining".into(),
        date: d(2024, 3, 9),
    });
    app.add_budget_goal(NewBudgetGoal {
        category: "Food & Dining".into(),
        monthly_limit: dec!(250),
        is_active: true,
    })
    .unwrap();
}

#[test]
fn fresh_store_is_seeded_and_written_through() {
    let storage = Storage::in_memory();
    let app = FinanceTracker::open(storage, clock());
    assert!(!app.current_income().is_empty());
    assert!(!app.current_expenses().is_empty());
    assert_eq!(app.current_budget_goals().len(), 3);

    let stored: Vec<ExpenseEntry> = app.storage().get_item(EXPENSES_KEY).unwrap();
    assert_eq!(stored, *app.current_expenses());
}

#[test]
fn partial_store_is_reseeded() {
    let storage = Storage::in_memory();
    assert!(storage.set_item(INCOME_KEY, &json!([])));
    let app = FinanceTracker::open(storage, clock());
    assert!(!app.current_income().is_empty());
}

#[test]
fn mutations_survive_reopening_a_sqlite_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.sqlite");

    let before = {
        let storage = Storage::new(SqliteBackend::open(&path).unwrap());
        blank(&storage);
        let app = FinanceTracker::open(storage, clock());
        populate(&app);
        app.export_all_data()
    };

    let storage = Storage::new(SqliteBackend::open(&path).unwrap());
    let app = FinanceTracker::open(storage, clock());
    assert_eq!(*app.current_income(), before.income);
    assert_eq!(*app.current_expenses(), before.expenses);
    assert_eq!(*app.current_budget_goals(), before.budget_goals);
    assert_eq!(app.current_expenses()[0].date, d(2024, 3, 9));
}

#[test]
fn dates_are_stored_as_calendar_strings() {
    let storage = Storage::in_memory();
    blank(&storage);
    let app = FinanceTracker::open(storage, clock());
    populate(&app);

    let raw: serde_json::Value = app.storage().get_item(GOALS_KEY).unwrap();
    assert_eq!(raw[0]["createdDate"], "2024-03-15");
    assert_eq!(raw[0]["monthlyLimit"], "250");
    assert_eq!(raw[0]["isActive"], true);
}

#[test]
fn legacy_timestamps_revive_to_their_calendar_day() {
    let storage = Storage::in_memory();
    blank(&storage);
    assert!(storage.set_item(
        INCOME_KEY,
        &json!([{
            "id": 1,
            "description": "Bonus",
            "amount": 500,
            "source": "Bonus",
            "frequency": "one-time",
            "date": "2024-02-10T12:00:00"
        }])
    ));
    let app = FinanceTracker::open(storage, clock());
    let income: Vec<IncomeEntry> = app.current_income().as_ref().clone();
    assert_eq!(income[0].date, d(2024, 2, 10));
    assert_eq!(income[0].amount, dec!(500));
}

#[test]
fn export_then_import_leaves_data_unchanged() {
    let storage = Storage::in_memory();
    blank(&storage);
    let app = FinanceTracker::open(storage, clock());
    populate(&app);

    let bundle = app.export_all_data();
    assert!(bundle.export_date.is_some());
    let (income, expenses, goals) = (
        app.current_income(),
        app.current_expenses(),
        app.current_budget_goals(),
    );
    assert!(app.import_all_data(bundle));
    assert_eq!(app.current_income(), income);
    assert_eq!(app.current_expenses(), expenses);
    assert_eq!(app.current_budget_goals(), goals);
}

#[test]
fn import_json_replaces_everything_and_persists() {
    let storage = Storage::in_memory();
    let app = FinanceTracker::open(storage, clock());
    let body = json!({
        "income": [],
        "expenses": [{
            "id": 7,
            "description": "Bus pass",
            "amount": "45.00",
            "category": "Transportation",
            "date": "2024-03-02"
        }],
        "budgetGoals": [],
        "exportDate": "2024-03-14T09:30:00Z"
    });
    assert!(app.import_all_data_json(&body.to_string()));
    assert!(app.current_income().is_empty());
    assert_eq!(app.current_expenses().len(), 1);
    assert_eq!(app.total_expenses(), dec!(45));

    let stored: Vec<ExpenseEntry> = app.storage().get_item(EXPENSES_KEY).unwrap();
    assert_eq!(stored[0].id, 7);

    // ids issued after an import never reuse imported ones
    let next = app.add_expense(NewExpense {
        description: "Taxi".into(),
        amount: dec!(12),
        category: "Transportation".into(),
        date: d(2024, 3, 3),
    });
    assert!(next.id > 7);
}

#[test]
fn malformed_import_is_rejected_without_changes() {
    let storage = Storage::in_memory();
    blank(&storage);
    let app = FinanceTracker::open(storage, clock());
    populate(&app);
    let before = app.current_expenses();
    assert!(!app.import_all_data_json("{ not json"));
    assert!(!app.import_all_data_json(r#"{"income": 3}"#));
    assert_eq!(app.current_expenses(), before);
}

#[test]
fn reset_clears_settings_and_reseeds() {
    let storage = Storage::in_memory();
    blank(&storage);
    let app = FinanceTracker::open(storage, clock());
    populate(&app);
    assert!(app.save_settings(&Settings {
        currency: "EUR".into()
    }));

    assert!(app.reset_all_data());
    assert_eq!(app.settings().currency, "USD");
    assert!(app.storage().get_item::<Settings>(SETTINGS_KEY).is_none());
    assert_eq!(app.current_budget_goals().len(), 3);
    assert!(
        app.current_expenses()
            .iter()
            .all(|e| e.description != "Dinner out")
    );
    let stored: Vec<BudgetGoal> = app.storage().get_item(GOALS_KEY).unwrap();
    assert_eq!(stored.len(), 3);
}

#[test]
fn unavailable_store_keeps_working_in_memory() {
    let storage = Storage::new(UnavailableBackend::new("disk full"));
    assert!(!storage.is_available());
    let app = FinanceTracker::open(storage, clock());
    let before = app.current_expenses().len();
    app.add_expense(NewExpense {
        description: "Coffee".into(),
        amount: dec!(3.20),
        category: "Food & Dining".into(),
        date: d(2024, 3, 15),
    });
    assert_eq!(app.current_expenses().len(), before + 1);
    assert!(!app.reset_all_data());
    assert!(!app.save_settings(&Settings::default()));
}
