// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use crate::aggregate::current_balance;
use crate::snapshot;
use crate::utils::fmt_currency;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => import_snapshot(conn, sub),
        _ => Ok(()),
    }
}

fn import_snapshot(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").map_or("", |s| s.trim());
    let ledger = snapshot::import_from_path(conn, Path::new(path))?;
    println!(
        "Imported {} transactions, {} investments, {} budgets from {} (balance {})",
        ledger.transactions.len(),
        ledger.investments.len(),
        ledger.budgets.len(),
        path,
        fmt_currency(current_balance(&ledger.transactions))
    );
    Ok(())
}
