// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::FinanceTracker;
use crate::aggregation::merge_transactions;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn handle(app: &FinanceTracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => {
            let out = required(sub, "out")?;
            write_json(app, Path::new(out))?;
            println!("Exported data to {}", out);
        }
        Some(("csv", sub)) => {
            let out = required(sub, "out")?;
            let n = write_csv(app, Path::new(out))?;
            println!("Exported {} transactions to {}", n, out);
        }
        _ => {}
    }
    Ok(())
}

/// Writes the full bundle, stamped with the export time.
pub fn write_json(app: &FinanceTracker, out: &Path) -> Result<()> {
    let bundle = app.export_all_data();
    let body = serde_json::to_string_pretty(&bundle)?;
    std::fs::write(out, body).with_context(|| format!("Writing {}", out.display()))?;
    info!(path = %out.display(), "exported data bundle");
    Ok(())
}

/// One row per income or expense, newest first; expense amounts are negative.
pub fn write_csv(app: &FinanceTracker, out: &Path) -> Result<usize> {
    let rows = merge_transactions(&app.current_income(), &app.current_expenses());
    let mut wtr =
        csv::Writer::from_path(out).with_context(|| format!("Creating {}", out.display()))?;
    wtr.write_record(["date", "type", "description", "category", "amount"])?;
    for t in &rows {
        wtr.write_record([
            t.date.to_string(),
            t.kind.to_string(),
            t.description.clone(),
            t.category.clone(),
            t.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    info!(path = %out.display(), rows = rows.len(), "exported transactions csv");
    Ok(rows.len())
}
