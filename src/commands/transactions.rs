// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewTransaction, Transaction, TxnType};
use crate::store;
use crate::utils::{fmt_currency, maybe_print_json, parse_date, parse_decimal, parse_period, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn new_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let amount = parse_decimal(sub.get_one::<String>("amount").map_or("", String::as_str))?;
    let kind = sub
        .get_one::<String>("type")
        .map_or("", String::as_str)
        .parse::<TxnType>()?;
    Ok(NewTransaction {
        date,
        description: sub.get_one::<String>("description").cloned().unwrap_or_default(),
        amount,
        category: sub.get_one::<String>("category").cloned().unwrap_or_default(),
        r#type: kind,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let t = new_from_args(sub)?;
    let id = store::add_transaction(conn, &t)?;
    log::debug!("transaction {} stored", id);
    println!(
        "Recorded {} {} on {} for '{}' ({})",
        t.r#type,
        fmt_currency(t.amount),
        t.date,
        t.description.trim(),
        t.category.trim()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    fmt_currency(t.amount),
                    t.r#type.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount", "Type"], rows)
        );
    }
    Ok(())
}

/// Newest first, narrowed by the `--month`, `--category` and `--type` filters.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let period = sub
        .get_one::<String>("month")
        .map(|m| parse_period(m))
        .transpose()?;
    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxnType>())
        .transpose()?;

    let rows = store::list_transactions(conn)?
        .into_iter()
        .filter(|t| period.is_none_or(|p| p.contains(t.date)))
        .filter(|t| category.as_ref().is_none_or(|c| &t.category == c))
        .filter(|t| kind.is_none_or(|k| t.r#type == k));
    Ok(match sub.get_one::<usize>("limit") {
        Some(limit) => rows.take(*limit).collect(),
        None => rows.collect(),
    })
}
