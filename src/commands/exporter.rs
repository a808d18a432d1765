// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use crate::snapshot;
use crate::store;
use anyhow::{anyhow, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => export_snapshot(conn, sub),
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_snapshot(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").map_or("", |s| s.trim());
    let snap = snapshot::export_to_path(conn, Path::new(out))?;
    println!(
        "Exported {} transactions, {} investments, {} budgets to {}",
        snap.transactions.len(),
        snap.investments.len(),
        snap.budgets.len(),
        out
    );
    Ok(())
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map_or("csv", String::as_str)
        .to_lowercase();
    let out = sub.get_one::<String>("out").map_or("", |s| s.trim());

    let mut rows = store::list_transactions(conn)?;
    rows.reverse(); // oldest first

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "description", "amount", "category", "type"])?;
            for t in &rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.r#type.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        other => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", other));
        }
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
