// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{investment_gain, return_percent, total_investment_value};
use crate::models::NewInvestment;
use crate::store;
use crate::utils::{fmt_currency, fmt_percent, maybe_print_json, parse_date, parse_decimal, pretty_table};
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

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").map_or("", String::as_str))?;
    let current = sub
        .get_one::<String>("current")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let inv = NewInvestment {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        r#type: sub.get_one::<String>("type").cloned().unwrap_or_default(),
        amount_invested: amount,
        current_value: current,
        date_invested: date,
    };
    store::add_investment(conn, &inv)?;
    println!(
        "Added investment '{}' ({}): {} invested, now {}",
        inv.name.trim(),
        inv.r#type.trim(),
        fmt_currency(inv.amount_invested),
        fmt_currency(inv.current_value_or_invested())
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = store::list_investments(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|inv| {
            vec![
                inv.name.clone(),
                inv.r#type.replace('-', " ").to_uppercase(),
                fmt_currency(inv.amount_invested),
                fmt_currency(inv.current_value),
                fmt_currency(investment_gain(inv)),
                fmt_percent(return_percent(inv)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Name", "Type", "Invested", "Current", "Gain/Loss", "Return"],
            rows
        )
    );
    println!("Total value: {}", fmt_currency(total_investment_value(&data)));
    Ok(())
}
