// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Regime;
use crate::store;
use crate::tax::{estimate_tax, financial_year_for, TaxEstimate};
use crate::utils::{fmt_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("estimate", sub)) => estimate(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Runs the estimate and, unless `--no-save`, records it. Returns the
/// estimate and the new record id.
pub fn run_estimate(conn: &Connection, sub: &clap::ArgMatches) -> Result<(TaxEstimate, Option<i64>)> {
    let income = parse_decimal(sub.get_one::<String>("income").map_or("", String::as_str))?;
    let regime = sub
        .get_one::<String>("regime")
        .map_or("new", String::as_str)
        .parse::<Regime>()?;
    let deductions = parse_decimal(sub.get_one::<String>("deductions").map_or("0", String::as_str))?;

    let est = estimate_tax(income, regime, deductions)?;
    if sub.get_flag("no-save") {
        return Ok((est, None));
    }
    let fy = financial_year_for(chrono::Local::now().date_naive());
    let id = store::add_tax_record(conn, &est.to_record(fy))?;
    Ok((est, Some(id)))
}

fn estimate(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (est, id) = run_estimate(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &est)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Regime".to_string(), est.regime.to_string()],
        vec!["Gross income".to_string(), fmt_currency(est.gross_income)],
        vec!["Taxable income".to_string(), fmt_currency(est.taxable_income)],
        vec!["Tax payable".to_string(), fmt_currency(est.tax_payable)],
        vec!["In hand".to_string(), fmt_currency(est.in_hand)],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    if let Some(id) = id {
        println!("Tax record #{} saved", id);
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = store::list_tax_records(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.financial_year.clone(),
                r.regime.to_string(),
                fmt_currency(r.gross_income),
                fmt_currency(r.deductions),
                fmt_currency(r.taxable_income),
                fmt_currency(r.tax_paid),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["FY", "Regime", "Gross", "Deductions", "Taxable", "Tax"],
            rows
        )
    );
    Ok(())
}
