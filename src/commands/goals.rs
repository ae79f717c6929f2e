// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{positive_amount, required};
use crate::FinanceTracker;
use crate::categories::{available_categories, canonical_expense_category};
use crate::insights::{
    LimitStyle, average_monthly_spending, goal_insights, goal_status, quick_goal_limit,
    recent_expenses_for_category, recommended_goals,
};
use crate::models::{BudgetGoal, GoalUpdate, NewBudgetGoal};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result, bail, ensure};
use rust_decimal::Decimal;
use tracing::warn;

pub fn handle(app: &FinanceTracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("update", sub)) => update(app, sub)?,
        Some(("delete", sub)) => delete(app, sub)?,
        Some(("progress", sub)) => progress(app, sub)?,
        Some(("insights", sub)) => insights(app, sub)?,
        Some(("recommend", sub)) => recommend(app, sub)?,
        Some(("quick", sub)) => quick(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn category_arg(sub: &clap::ArgMatches) -> Result<String> {
    let raw = required(sub, "category")?.trim();
    ensure!(!raw.is_empty(), "Please select a category");
    Ok(match canonical_expense_category(raw) {
        Some(c) => c.to_string(),
        None => {
            warn!("'{}' is not one of the standard expense categories", raw);
            raw.to_string()
        }
    })
}

fn create(
    app: &FinanceTracker,
    category: String,
    limit: Decimal,
    active: bool,
) -> Result<BudgetGoal> {
    let goal = app
        .add_budget_goal(NewBudgetGoal {
            category,
            monthly_limit: limit,
            is_active: active,
        })
        .context("Budget goal not added")?;
    Ok(goal)
}

fn add(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let category = category_arg(sub)?;
    let limit = positive_amount(required(sub, "limit")?)?;
    let goal = create(app, category, limit, !sub.get_flag("inactive"))?;
    println!(
        "Budget goal #{} set: {} / month for {}",
        goal.id,
        fmt_money(&goal.monthly_limit, &app.settings().currency),
        goal.category
    );
    Ok(())
}

fn list(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let goals = app.current_budget_goals();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &*goals)? {
        let ccy = app.settings().currency;
        let rows: Vec<Vec<String>> = goals
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.category.clone(),
                    fmt_money(&g.monthly_limit, &ccy),
                    g.created_date.to_string(),
                    if g.is_active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Category", "Monthly limit", "Created", "Active"], rows)
        );
        let open = available_categories(&goals);
        if !open.is_empty() {
            println!("Categories without an active goal: {}", open.join(", "));
        }
    }
    Ok(())
}

fn update(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let monthly_limit = match sub.get_one::<String>("limit") {
        Some(raw) => {
            let limit = parse_decimal(raw)?;
            ensure!(limit >= Decimal::ZERO, "Monthly limit cannot be negative");
            Some(limit)
        }
        None => None,
    };
    let is_active = sub.get_one::<bool>("active").copied();
    if monthly_limit.is_none() && is_active.is_none() {
        bail!("Nothing to update: pass --limit and/or --active");
    }
    if is_active == Some(true) {
        let goals = app.current_budget_goals();
        if let Some(target) = goals.iter().find(|g| g.id == id) {
            let clash = goals
                .iter()
                .any(|g| g.id != id && g.is_active && g.category == target.category);
            ensure!(
                !clash,
                "Another active budget goal already exists for '{}'",
                target.category
            );
        }
    }
    match app.update_budget_goal(
        id,
        GoalUpdate {
            monthly_limit,
            is_active,
        },
    ) {
        Some(g) => println!(
            "Updated goal #{}: {} limit {} ({})",
            g.id,
            g.category,
            g.monthly_limit,
            if g.is_active { "active" } else { "paused" }
        ),
        None => println!("No budget goal with id {}", id),
    }
    Ok(())
}

fn delete(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    if app.delete_budget_goal(id) {
        println!("Deleted budget goal #{}", id);
    } else {
        println!("No budget goal with id {}", id);
    }
    Ok(())
}

fn progress(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let progress = app.budget_progress();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &*progress)? {
        let ccy = app.settings().currency;
        let rows: Vec<Vec<String>> = progress
            .iter()
            .map(|p| {
                vec![
                    p.category.clone(),
                    fmt_money(&p.monthly_limit, &ccy),
                    fmt_money(&p.current_spent, &ccy),
                    fmt_money(&p.remaining_budget, &ccy),
                    format!("{}%", p.percentage_used),
                    goal_status(p).to_string(),
                    p.days_left_in_month.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Remaining", "Used", "Status", "Days left"],
                rows
            )
        );
    }
    Ok(())
}

fn insights(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let insights = goal_insights(&app.budget_progress());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &insights)? {
        if insights.is_empty() {
            println!("No insights yet");
        }
        for i in insights {
            println!("[{:?}] {}", i.kind, i.message);
        }
    }
    Ok(())
}

fn recommend(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let recs = recommended_goals(
        &app.current_expenses(),
        &app.current_budget_goals(),
        app.clock().today(),
    );
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &recs)? {
        let ccy = app.settings().currency;
        let rows: Vec<Vec<String>> = recs
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    fmt_money(&r.suggested_limit, &ccy),
                    r.reason.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Suggested limit", "Reason"], rows)
        );
    }
    Ok(())
}

fn quick(app: &FinanceTracker, sub: &clap::ArgMatches) -> Result<()> {
    let category = category_arg(sub)?;
    let raw_style = required(sub, "style")?;
    let style = LimitStyle::parse(raw_style).with_context(|| {
        format!(
            "Invalid style '{}', expected conservative, moderate or flexible",
            raw_style
        )
    })?;
    let expenses = app.current_expenses();
    let recent = recent_expenses_for_category(&expenses, &category, app.clock().today());
    let limit = quick_goal_limit(average_monthly_spending(&recent), style);
    let goal = create(app, category, limit, true)?;
    println!(
        "Quick goal created: {} - {} ({:?})",
        goal.category,
        fmt_money(&goal.monthly_limit, &app.settings().currency),
        style
    );
    Ok(())
}
