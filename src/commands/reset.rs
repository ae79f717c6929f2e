// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::FinanceTracker;
use anyhow::{Result, bail};

pub fn handle(app: &FinanceTracker, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        bail!("This erases every entry, goal and setting. Re-run with --yes to confirm");
    }
    if app.reset_all_data() {
        println!("All data cleared; sample data restored");
    } else {
        println!("Storage could not be cleared; sample data restored for this session");
    }
    Ok(())
}
