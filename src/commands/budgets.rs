// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::budget_status;
use crate::models::{NewBudget, Period};
use crate::store;
use crate::utils::{
    fmt_currency, fmt_percent, maybe_print_json, parse_decimal, parse_period, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let now = Period::current();
    let b = NewBudget {
        category: sub.get_one::<String>("category").cloned().unwrap_or_default(),
        amount: parse_decimal(sub.get_one::<String>("amount").map_or("", String::as_str))?,
        month: sub
            .get_one::<String>("month")
            .cloned()
            .unwrap_or_else(|| now.month_name().to_string()),
        year: sub.get_one::<i32>("year").copied().unwrap_or(now.year()),
    };
    store::upsert_budget(conn, &b)?;
    println!(
        "Budget set for {} ({} {}) = {}",
        b.category.trim(),
        b.month,
        b.year,
        fmt_currency(b.amount)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = if sub.get_flag("all") {
        store::list_all_budgets(conn)?
    } else {
        let now = Period::current();
        let month = sub
            .get_one::<String>("month")
            .cloned()
            .unwrap_or_else(|| now.month_name().to_string());
        let year = sub.get_one::<i32>("year").copied().unwrap_or(now.year());
        store::list_budgets(conn, &month, year)?
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.category.clone(),
                    fmt_currency(b.amount),
                    format!("{} {}", b.month, b.year),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Budget", "Period"], rows));
    }
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period = match sub.get_one::<String>("month") {
        Some(m) => parse_period(m)?,
        None => Period::current(),
    };
    let budgets = store::list_all_budgets(conn)?;
    let transactions = store::list_transactions(conn)?;
    let overview = budget_status(&budgets, &transactions, period);

    if maybe_print_json(json_flag, jsonl_flag, &overview)? {
        return Ok(());
    }
    let rows = overview
        .lines
        .iter()
        .map(|l| {
            vec![
                l.category.clone(),
                fmt_currency(l.budgeted),
                fmt_currency(l.spent),
                fmt_currency(l.remaining),
                fmt_percent(l.percent_used),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Budget", "Spent", "Remaining", "Used"], rows)
    );
    println!(
        "{}: budget {}, spent {}, remaining {}",
        overview.period,
        fmt_currency(overview.total_budget),
        fmt_currency(overview.total_spent),
        fmt_currency(overview.remaining)
    );
    Ok(())
}
