// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    OneTime,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::OneTime,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Frequency> {
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub source: String,
    pub frequency: Frequency,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncome {
    pub description: String,
    pub amount: Decimal,
    pub source: String,
    pub frequency: Frequency,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetGoal {
    pub id: i64,
    pub category: String,
    pub monthly_limit: Decimal,
    #[serde(with = "date_format")]
    pub created_date: NaiveDate,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetGoal {
    pub category: String,
    pub monthly_limit: Decimal,
    pub is_active: bool,
}

/// Partial update for a goal. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalUpdate {
    pub monthly_limit: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl GoalUpdate {
    pub fn apply(&self, goal: &mut BudgetGoal) {
        if let Some(limit) = self.monthly_limit {
            goal.monthly_limit = limit;
        }
        if let Some(active) = self.is_active {
            goal.is_active = active;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => f.write_str("income"),
            TransactionKind::Expense => f.write_str("expense"),
        }
    }
}

/// Unified read-only view over income and expense entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: Decimal, // negative for expenses
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl From<&IncomeEntry> for Transaction {
    fn from(income: &IncomeEntry) -> Self {
        Transaction {
            id: income.id,
            description: income.description.clone(),
            amount: income.amount,
            kind: TransactionKind::Income,
            category: income.source.clone(),
            date: income.date,
        }
    }
}

impl From<&ExpenseEntry> for Transaction {
    fn from(expense: &ExpenseEntry) -> Self {
        Transaction {
            id: expense.id,
            description: expense.description.clone(),
            amount: -expense.amount,
            kind: TransactionKind::Expense,
            category: expense.category.clone(),
            date: expense.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub category: String,
    pub monthly_limit: Decimal,
    pub current_spent: Decimal,
    pub remaining_budget: Decimal,
    pub percentage_used: i64,
    pub is_over_budget: bool,
    pub days_left_in_month: u32,
}

/// Everything the store holds, as exported and imported in one piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBundle {
    #[serde(default)]
    pub income: Vec<IncomeEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    #[serde(default)]
    pub budget_goals: Vec<BudgetGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

impl DataBundle {
    pub fn max_id(&self) -> i64 {
        let income = self.income.iter().map(|e| e.id);
        let expenses = self.expenses.iter().map(|e| e.id);
        let goals = self.budget_goals.iter().map(|g| g.id);
        income.chain(expenses).chain(goals).max().unwrap_or(0)
    }
}

/// Calendar dates travel as `YYYY-MM-DD`. Reading also accepts full ISO-8601
/// timestamps written by older exports; those are revived in local time.
pub mod date_format {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        revive(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{}'", raw)))
    }

    pub fn revive(raw: &str) -> Option<NaiveDate> {
        let s = raw.trim();
        if let Ok(d) = NaiveDate::parse_from_str(s, FORMAT) {
            return Some(d);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Local).date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        None
    }
}
