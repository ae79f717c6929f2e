// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keeps the store in step with the repository.
//!
//! At startup the three collections are read back from the store (or seeded
//! when any is missing). Afterwards every published collection is written
//! through under its key. Write failures are logged by [`Storage`] and never
//! undo the in-memory change.

use crate::models::{BudgetGoal, DataBundle, ExpenseEntry, IncomeEntry};
use crate::reactive::Subscription;
use crate::repository::Repository;
use crate::seed;
use crate::store::{EXPENSES_KEY, GOALS_KEY, INCOME_KEY, Storage};
use crate::utils::Clock;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

/// Reads all three collections; seeds sample data when any of them is
/// missing or unreadable.
pub fn load_or_seed(storage: &Storage, clock: &dyn Clock) -> DataBundle {
    let income = storage.get_item::<Vec<IncomeEntry>>(INCOME_KEY);
    let expenses = storage.get_item::<Vec<ExpenseEntry>>(EXPENSES_KEY);
    let goals = storage.get_item::<Vec<BudgetGoal>>(GOALS_KEY);
    match (income, expenses, goals) {
        (Some(income), Some(expenses), Some(budget_goals)) => {
            info!(
                "loaded {} income, {} expense and {} goal records",
                income.len(),
                expenses.len(),
                budget_goals.len()
            );
            DataBundle {
                income,
                expenses,
                budget_goals,
                export_date: None,
            }
        }
        _ => {
            info!("no complete saved data found, starting from sample data");
            seed::sample_data(clock)
        }
    }
}

pub struct PersistenceSync {
    _subscriptions: Vec<Subscription>,
}

impl PersistenceSync {
    /// Starts writing every publish of `repo` to `storage`. Because the
    /// subscriptions replay, the current state is written once immediately.
    pub fn attach(repo: &Repository, storage: Arc<Storage>) -> Self {
        let mut subs = Vec::with_capacity(3);

        let store = Arc::clone(&storage);
        subs.push(repo.subscribe_income(move |income| {
            store.set_item(INCOME_KEY, income.as_slice());
        }));
        let store = Arc::clone(&storage);
        subs.push(repo.subscribe_expenses(move |expenses| {
            store.set_item(EXPENSES_KEY, expenses.as_slice());
        }));
        let store = storage;
        subs.push(repo.subscribe_budget_goals(move |goals| {
            store.set_item(GOALS_KEY, goals.as_slice());
        }));

        Self {
            _subscriptions: subs,
        }
    }
}

pub fn export_all_data(repo: &Repository) -> DataBundle {
    let mut bundle = repo.snapshot();
    bundle.export_date = Some(Utc::now());
    bundle
}

pub fn import_all_data(repo: &Repository, bundle: DataBundle) -> bool {
    info!(
        "importing {} income, {} expense and {} goal records",
        bundle.income.len(),
        bundle.expenses.len(),
        bundle.budget_goals.len()
    );
    repo.replace_all(bundle);
    true
}

/// Parses an exported bundle; on any parse error nothing is replaced.
pub fn import_all_data_json(repo: &Repository, json: &str) -> bool {
    match serde_json::from_str::<DataBundle>(json) {
        Ok(bundle) => import_all_data(repo, bundle),
        Err(e) => {
            error!("failed to import data: {}", e);
            false
        }
    }
}

/// Clears the store and reseeds. Memory is reseeded even when clearing
/// fails; the return value reports the clear.
pub fn reset_all_data(repo: &Repository, storage: &Storage) -> bool {
    let cleared = storage.clear_all_data();
    repo.replace_all(seed::sample_data(repo.clock().as_ref()));
    info!("all data reset to sample data");
    cleared
}
