// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over the repository: totals, the recent-transaction feed
//! and budget progress for the current month.
//!
//! The pure functions take their inputs (and the reference date) explicitly.
//! [`AggregationEngine`] wires them to the repository so that every publish
//! recomputes the affected views before the publish returns.

use crate::models::{BudgetGoal, BudgetProgress, ExpenseEntry, IncomeEntry, Transaction};
use crate::reactive::{Derived, Subject, Subscription};
use crate::repository::{Repository, Snapshot};
use crate::utils::{Clock, days_in_month, same_month};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::{Arc, Mutex};
use tracing::trace;

pub const RECENT_LIMIT: usize = 5;

/// Sum that clamps at `Decimal::MAX` / `Decimal::MIN` instead of panicking.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, x| acc.saturating_add(x))
}

pub fn total_income(income: &[IncomeEntry]) -> Decimal {
    saturating_sum(income.iter().map(|e| e.amount))
}

pub fn total_expenses(expenses: &[ExpenseEntry]) -> Decimal {
    saturating_sum(expenses.iter().map(|e| e.amount))
}

/// Income then expenses, stably sorted newest first.
pub fn merge_transactions(income: &[IncomeEntry], expenses: &[ExpenseEntry]) -> Vec<Transaction> {
    let mut all: Vec<Transaction> = income
        .iter()
        .map(Transaction::from)
        .chain(expenses.iter().map(Transaction::from))
        .collect();
    all.sort_by(|a, b| b.date.cmp(&a.date));
    all
}

pub fn recent_transactions(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    limit: usize,
) -> Vec<Transaction> {
    let mut all = merge_transactions(income, expenses);
    all.truncate(limit);
    all
}

/// spent / limit as a whole percentage, 0 for a zero limit. Results too
/// large for `i64` clamp to `i64::MAX` / `i64::MIN`.
pub fn percentage_used(spent: Decimal, limit: Decimal) -> i64 {
    if limit.is_zero() {
        return 0;
    }
    let clamped = if spent.is_sign_negative() != limit.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };
    spent
        .checked_div(limit)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| {
            pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .unwrap_or(clamped)
}

pub fn budget_progress(
    goals: &[BudgetGoal],
    expenses: &[ExpenseEntry],
    today: NaiveDate,
) -> Vec<BudgetProgress> {
    let this_month: Vec<&ExpenseEntry> = expenses
        .iter()
        .filter(|e| same_month(e.date, today))
        .collect();
    let days_left = days_in_month(today) - today.day();

    goals
        .iter()
        .filter(|g| g.is_active)
        .map(|goal| {
            let spent = saturating_sum(
                this_month
                    .iter()
                    .filter(|e| e.category == goal.category)
                    .map(|e| e.amount),
            );
            BudgetProgress {
                category: goal.category.clone(),
                monthly_limit: goal.monthly_limit,
                current_spent: spent,
                remaining_budget: goal.monthly_limit.saturating_sub(spent),
                percentage_used: percentage_used(spent, goal.monthly_limit),
                is_over_budget: spent > goal.monthly_limit,
                days_left_in_month: days_left,
            }
        })
        .collect()
}

/// Latest value of each input to a two-input derived view.
struct Latest<A, B> {
    a: Mutex<A>,
    b: Mutex<B>,
}

impl<A: Clone, B: Clone> Latest<A, B> {
    fn new(a: A, b: B) -> Arc<Self> {
        Arc::new(Self {
            a: Mutex::new(a),
            b: Mutex::new(b),
        })
    }

    fn set_a(&self, a: A) -> (A, B) {
        *self.a.lock().unwrap_or_else(|p| p.into_inner()) = a;
        self.both()
    }

    fn set_b(&self, b: B) -> (A, B) {
        *self.b.lock().unwrap_or_else(|p| p.into_inner()) = b;
        self.both()
    }

    fn both(&self) -> (A, B) {
        let a = self.a.lock().unwrap_or_else(|p| p.into_inner()).clone();
        let b = self.b.lock().unwrap_or_else(|p| p.into_inner()).clone();
        (a, b)
    }
}

pub struct AggregationEngine {
    total_income: Subject<Decimal>,
    total_expenses: Subject<Decimal>,
    recent_transactions: Subject<Snapshot<Transaction>>,
    budget_progress: Subject<Snapshot<BudgetProgress>>,
    _subscriptions: Vec<Subscription>,
}

impl AggregationEngine {
    /// Subscribes to `repo`; the engine stays live until it is dropped.
    pub fn attach(repo: &Repository) -> Self {
        let income = repo.current_income();
        let expenses = repo.current_expenses();
        let goals = repo.current_budget_goals();
        let clock: Arc<dyn Clock> = Arc::clone(repo.clock());

        let total_income_s = Subject::new(total_income(&income));
        let total_expenses_s = Subject::new(total_expenses(&expenses));
        let recent_s = Subject::new(Arc::new(recent_transactions(
            &income,
            &expenses,
            RECENT_LIMIT,
        )));
        let progress_s = Subject::new(Arc::new(budget_progress(
            &goals,
            &expenses,
            clock.today(),
        )));

        let mut subs = Vec::new();

        let out = total_income_s.clone();
        subs.push(repo.subscribe_income(move |income| {
            out.publish(total_income(income));
        }));

        let out = total_expenses_s.clone();
        subs.push(repo.subscribe_expenses(move |expenses| {
            out.publish(total_expenses(expenses));
        }));

        let feed = Latest::new(income.clone(), expenses.clone());
        let (cell, out) = (Arc::clone(&feed), recent_s.clone());
        subs.push(repo.subscribe_income(move |income| {
            let (i, e) = cell.set_a(Arc::clone(income));
            trace!("recent transactions: income updated");
            out.publish(Arc::new(recent_transactions(&i, &e, RECENT_LIMIT)));
        }));
        let (cell, out) = (feed, recent_s.clone());
        subs.push(repo.subscribe_expenses(move |expenses| {
            let (i, e) = cell.set_b(Arc::clone(expenses));
            trace!("recent transactions: expenses updated");
            out.publish(Arc::new(recent_transactions(&i, &e, RECENT_LIMIT)));
        }));

        let budget = Latest::new(goals, expenses);
        let (cell, out, clk) = (Arc::clone(&budget), progress_s.clone(), Arc::clone(&clock));
        subs.push(repo.subscribe_budget_goals(move |goals| {
            let (g, e) = cell.set_a(Arc::clone(goals));
            out.publish(Arc::new(budget_progress(&g, &e, clk.today())));
        }));
        let (cell, out, clk) = (budget, progress_s.clone(), clock);
        subs.push(repo.subscribe_expenses(move |expenses| {
            let (g, e) = cell.set_b(Arc::clone(expenses));
            out.publish(Arc::new(budget_progress(&g, &e, clk.today())));
        }));

        Self {
            total_income: total_income_s,
            total_expenses: total_expenses_s,
            recent_transactions: recent_s,
            budget_progress: progress_s,
            _subscriptions: subs,
        }
    }

    pub fn total_income(&self) -> Derived<Decimal> {
        self.total_income.read_only()
    }

    pub fn total_expenses(&self) -> Derived<Decimal> {
        self.total_expenses.read_only()
    }

    pub fn recent_transactions(&self) -> Derived<Snapshot<Transaction>> {
        self.recent_transactions.read_only()
    }

    pub fn budget_progress(&self) -> Derived<Snapshot<BudgetProgress>> {
        self.budget_progress.read_only()
    }
}
