// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Composition root: builds the repository from the store, then attaches the
//! aggregation engine and the persistence synchronizer, in that order, so
//! observers added later always see derived values that match the publish.

use crate::aggregation::AggregationEngine;
use crate::errors::Result;
use crate::models::{
    BudgetGoal, BudgetProgress, DataBundle, ExpenseEntry, GoalUpdate, IncomeEntry, NewBudgetGoal,
    NewExpense, NewIncome, Transaction,
};
use crate::persistence::{self, PersistenceSync};
use crate::repository::{Repository, Snapshot};
use crate::settings::Settings;
use crate::store::Storage;
use crate::utils::{Clock, SystemClock};
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct FinanceTracker {
    repository: Repository,
    storage: Arc<Storage>,
    aggregations: AggregationEngine,
    _persistence: PersistenceSync,
}

impl FinanceTracker {
    pub fn open(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        let storage = Arc::new(storage);
        let initial = persistence::load_or_seed(&storage, clock.as_ref());
        let repository = Repository::new(initial, clock);
        let aggregations = AggregationEngine::attach(&repository);
        let persistence = PersistenceSync::attach(&repository, Arc::clone(&storage));
        Self {
            repository,
            storage,
            aggregations,
            _persistence: persistence,
        }
    }

    pub fn open_with_system_clock(storage: Storage) -> Self {
        Self::open(storage, Arc::new(SystemClock))
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn aggregations(&self) -> &AggregationEngine {
        &self.aggregations
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        self.repository.clock()
    }

    pub fn add_income(&self, income: NewIncome) -> IncomeEntry {
        self.repository.add_income(income)
    }

    pub fn add_expense(&self, expense: NewExpense) -> ExpenseEntry {
        self.repository.add_expense(expense)
    }

    pub fn delete_income(&self, id: i64) -> bool {
        self.repository.delete_income(id)
    }

    pub fn delete_expense(&self, id: i64) -> bool {
        self.repository.delete_expense(id)
    }

    pub fn add_budget_goal(&self, goal: NewBudgetGoal) -> Result<BudgetGoal> {
        self.repository.add_budget_goal(goal)
    }

    pub fn update_budget_goal(&self, id: i64, update: GoalUpdate) -> Option<BudgetGoal> {
        self.repository.update_budget_goal(id, update)
    }

    pub fn delete_budget_goal(&self, id: i64) -> bool {
        self.repository.delete_budget_goal(id)
    }

    pub fn current_income(&self) -> Snapshot<IncomeEntry> {
        self.repository.current_income()
    }

    pub fn current_expenses(&self) -> Snapshot<ExpenseEntry> {
        self.repository.current_expenses()
    }

    pub fn current_budget_goals(&self) -> Snapshot<BudgetGoal> {
        self.repository.current_budget_goals()
    }

    pub fn total_income(&self) -> Decimal {
        self.aggregations.total_income().get()
    }

    pub fn total_expenses(&self) -> Decimal {
        self.aggregations.total_expenses().get()
    }

    pub fn recent_transactions(&self) -> Snapshot<Transaction> {
        self.aggregations.recent_transactions().get()
    }

    pub fn budget_progress(&self) -> Snapshot<BudgetProgress> {
        self.aggregations.budget_progress().get()
    }

    pub fn export_all_data(&self) -> DataBundle {
        persistence::export_all_data(&self.repository)
    }

    pub fn import_all_data(&self, bundle: DataBundle) -> bool {
        persistence::import_all_data(&self.repository, bundle)
    }

    pub fn import_all_data_json(&self, json: &str) -> bool {
        persistence::import_all_data_json(&self.repository, json)
    }

    pub fn reset_all_data(&self) -> bool {
        persistence::reset_all_data(&self.repository, &self.storage)
    }

    pub fn settings(&self) -> Settings {
        Settings::load(&self.storage)
    }

    pub fn save_settings(&self, settings: &Settings) -> bool {
        settings.save(&self.storage)
    }
}
