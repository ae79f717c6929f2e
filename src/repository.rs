// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Authoritative in-memory holder of income, expense and goal records.
//!
//! Every mutation builds a new collection and publishes it whole; snapshots
//! handed out are shared and immutable. Mutations run to completion on the
//! caller's thread, including every observer they trigger.

use crate::errors::{Error, Result};
use crate::models::{
    BudgetGoal, DataBundle, ExpenseEntry, GoalUpdate, IncomeEntry, NewBudgetGoal, NewExpense,
    NewIncome,
};
use crate::reactive::{Subject, Subscription};
use crate::utils::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, info, warn};

pub type Snapshot<T> = Arc<Vec<T>>;

/// Hands out timestamp-like ids that are strictly increasing, so several
/// inserts within the same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new(floor: i64) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    pub fn next(&self, now_millis: i64) -> i64 {
        let mut current = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now_millis.max(current + 1);
            match self.last.compare_exchange(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }

    /// Raises the floor so later ids stay above `id`.
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}

pub struct Repository {
    income: Subject<Snapshot<IncomeEntry>>,
    expenses: Subject<Snapshot<ExpenseEntry>>,
    goals: Subject<Snapshot<BudgetGoal>>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
}

impl Repository {
    pub fn new(initial: DataBundle, clock: Arc<dyn Clock>) -> Self {
        let ids = IdGenerator::new(initial.max_id());
        Self {
            income: Subject::new(Arc::new(initial.income)),
            expenses: Subject::new(Arc::new(initial.expenses)),
            goals: Subject::new(Arc::new(initial.budget_goals)),
            ids,
            clock,
        }
    }

    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self::new(DataBundle::default(), clock)
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn next_id(&self) -> i64 {
        self.ids.next(self.clock.now_millis())
    }

    pub fn current_income(&self) -> Snapshot<IncomeEntry> {
        self.income.get()
    }

    pub fn current_expenses(&self) -> Snapshot<ExpenseEntry> {
        self.expenses.get()
    }

    pub fn current_budget_goals(&self) -> Snapshot<BudgetGoal> {
        self.goals.get()
    }

    pub fn snapshot(&self) -> DataBundle {
        DataBundle {
            income: self.current_income().as_ref().clone(),
            expenses: self.current_expenses().as_ref().clone(),
            budget_goals: self.current_budget_goals().as_ref().clone(),
            export_date: None,
        }
    }

    pub fn add_income(&self, income: NewIncome) -> IncomeEntry {
        let entry = IncomeEntry {
            id: self.next_id(),
            description: income.description,
            amount: income.amount,
            source: income.source,
            frequency: income.frequency,
            date: income.date,
        };
        let mut next = self.current_income().as_ref().clone();
        next.push(entry.clone());
        self.income.publish(Arc::new(next));
        info!("income {} added for {}", entry.id, entry.date);
        entry
    }

    pub fn add_expense(&self, expense: NewExpense) -> ExpenseEntry {
        let entry = ExpenseEntry {
            id: self.next_id(),
            description: expense.description,
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
        };
        let mut next = self.current_expenses().as_ref().clone();
        next.push(entry.clone());
        self.expenses.publish(Arc::new(next));
        info!("expense {} added for {}", entry.id, entry.date);
        entry
    }

    /// Returns whether a record was removed. Unknown ids publish nothing.
    pub fn delete_income(&self, id: i64) -> bool {
        let current = self.current_income();
        if !current.iter().any(|e| e.id == id) {
            debug!("delete_income: no income with id {}", id);
            return false;
        }
        let next: Vec<IncomeEntry> = current.iter().filter(|e| e.id != id).cloned().collect();
        self.income.publish(Arc::new(next));
        info!("income {} deleted", id);
        true
    }

    pub fn delete_expense(&self, id: i64) -> bool {
        let current = self.current_expenses();
        if !current.iter().any(|e| e.id == id) {
            debug!("delete_expense: no expense with id {}", id);
            return false;
        }
        let next: Vec<ExpenseEntry> = current.iter().filter(|e| e.id != id).cloned().collect();
        self.expenses.publish(Arc::new(next));
        info!("expense {} deleted", id);
        true
    }

    pub fn add_budget_goal(&self, goal: NewBudgetGoal) -> Result<BudgetGoal> {
        let current = self.current_budget_goals();
        if goal.is_active
            && current
                .iter()
                .any(|g| g.is_active && g.category == goal.category)
        {
            warn!("active budget goal already exists for {}", goal.category);
            return Err(Error::DuplicateActiveGoal(goal.category));
        }
        let created = BudgetGoal {
            id: self.next_id(),
            category: goal.category,
            monthly_limit: goal.monthly_limit,
            created_date: self.clock.today(),
            is_active: goal.is_active,
        };
        let mut next = current.as_ref().clone();
        next.push(created.clone());
        self.goals.publish(Arc::new(next));
        info!("budget goal {} added for {}", created.id, created.category);
        Ok(created)
    }

    /// Merges `update` into the goal with `id`; `None` when no goal matches.
    pub fn update_budget_goal(&self, id: i64, update: GoalUpdate) -> Option<BudgetGoal> {
        let mut next = self.current_budget_goals().as_ref().clone();
        let goal = next.iter_mut().find(|g| g.id == id)?;
        update.apply(goal);
        let updated = goal.clone();
        self.goals.publish(Arc::new(next));
        info!("budget goal {} updated", id);
        Some(updated)
    }

    pub fn delete_budget_goal(&self, id: i64) -> bool {
        let current = self.current_budget_goals();
        if !current.iter().any(|g| g.id == id) {
            debug!("delete_budget_goal: no goal with id {}", id);
            return false;
        }
        let next: Vec<BudgetGoal> = current.iter().filter(|g| g.id != id).cloned().collect();
        self.goals.publish(Arc::new(next));
        info!("budget goal {} deleted", id);
        true
    }

    /// Swaps all three collections, publishing income, expenses, then goals.
    pub fn replace_all(&self, bundle: DataBundle) {
        self.ids.observe(bundle.max_id());
        self.income.publish(Arc::new(bundle.income));
        self.expenses.publish(Arc::new(bundle.expenses));
        self.goals.publish(Arc::new(bundle.budget_goals));
    }

    pub fn subscribe_income<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Snapshot<IncomeEntry>) + Send + Sync + 'static,
    {
        self.income.subscribe(observer)
    }

    pub fn subscribe_expenses<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Snapshot<ExpenseEntry>) + Send + Sync + 'static,
    {
        self.expenses.subscribe(observer)
    }

    pub fn subscribe_budget_goals<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Snapshot<BudgetGoal>) + Send + Sync + 'static,
    {
        self.goals.subscribe(observer)
    }
}
