// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::FinanceTracker;
use anyhow::{Context, Result, bail};
use std::path::Path;

pub fn handle(app: &FinanceTracker, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("json", sub)) = m.subcommand() {
        let path = required(sub, "path")?;
        import_json(app, Path::new(path))?;
        println!(
            "Imported {} income, {} expenses, {} goals from {}",
            app.current_income().len(),
            app.current_expenses().len(),
            app.current_budget_goals().len(),
            path
        );
    }
    Ok(())
}

/// Replaces everything with the bundle in `path`. Nothing changes on a parse failure.
pub fn import_json(app: &FinanceTracker, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading {}", path.display()))?;
    if !app.import_all_data_json(&raw) {
        bail!("{} is not a valid BudgetBuddy export", path.display());
    }
    Ok(())
}
