// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::FinanceTracker;
use crate::utils::pretty_table;
use anyhow::{Result, bail, ensure};

pub fn handle(app: &FinanceTracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let settings = app.settings();
            let rows = vec![
                vec!["currency".to_string(), settings.currency],
                vec![
                    "storage".to_string(),
                    if app.storage().is_available() {
                        "available"
                    } else {
                        "unavailable"
                    }
                    .to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set-currency", sub)) => {
            let code = currency_code(required(sub, "currency")?)?;
            let mut settings = app.settings();
            settings.currency = code.clone();
            if !app.save_settings(&settings) {
                bail!("Could not save settings");
            }
            println!("Currency set to {}", code);
        }
        _ => {}
    }
    Ok(())
}

/// Three ASCII letters, uppercased.
pub fn currency_code(raw: &str) -> Result<String> {
    let code = raw.trim();
    ensure!(
        code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()),
        "Currency must be a 3-letter code, got '{}'",
        raw
    );
    Ok(code.to_ascii_uppercase())
}
