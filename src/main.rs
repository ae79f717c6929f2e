// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use budgetbuddy::{FinanceTracker, cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    cli::init_logging(matches.get_count("verbose"));

    let storage = db::open_storage(&matches)?;
    let app = FinanceTracker::open_with_system_clock(storage);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Data ready: {} income, {} expenses, {} goals",
                app.current_income().len(),
                app.current_expenses().len(),
                app.current_budget_goals().len()
            );
        }
        Some(("income", sub)) => commands::income::handle(&app, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&app, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&app, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&app, sub)?,
        Some(("report", sub)) => commands::reports::handle(&app, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&app, sub)?,
        Some(("import", sub)) => commands::importer::handle(&app, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&app, sub)?,
        Some(("config", sub)) => commands::config::handle(&app, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&app)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
