// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Write as _;

use crate::aggregate::{self, budget_status, dashboard_summary, monthly_series};
use crate::insights::{self, savings_rate};
use crate::ledger::Ledger;
use crate::models::Period;
use crate::utils::{fmt_currency, fmt_percent, maybe_print_json, parse_period, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        Some(("insights", sub)) => show_insights(conn, sub)?,
        Some(("full", sub)) => full(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn period_arg(sub: &clap::ArgMatches) -> Result<Period> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_period(m),
        None => Ok(Period::current()),
    }
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_arg(sub)?;
    let ledger = Ledger::load_or_empty(conn);
    let s = dashboard_summary(&ledger, period);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Current balance".to_string(), fmt_currency(s.current_balance)],
        vec![
            format!("Expenses ({})", period),
            fmt_currency(s.monthly_expenses),
        ],
        vec!["Total investments".to_string(), fmt_currency(s.total_investments)],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    Ok(())
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let end = period_arg(sub)?;
    let months = usize::from(sub.get_one::<u16>("months").copied().unwrap_or(6));
    let ledger = Ledger::load_or_empty(conn);
    let series = monthly_series(&ledger.transactions, end, months);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    let rows = series
        .iter()
        .map(|m| {
            vec![
                m.period.clone(),
                fmt_currency(m.income),
                fmt_currency(m.expenses),
                fmt_currency(m.income.saturating_sub(m.expenses)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
    );
    Ok(())
}

fn show_insights(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_arg(sub)?;
    let ledger = Ledger::load_or_empty(conn);
    for line in insights::messages(&insights::for_ledger(&ledger, period)) {
        println!("{}", line);
    }
    Ok(())
}

fn full(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_arg(sub)?;
    let ledger = Ledger::load_or_empty(conn);
    let text = render_report(&ledger, period, chrono::Local::now().naive_local());
    match sub.get_one::<String>("out") {
        Some(out) => {
            std::fs::write(out, &text).with_context(|| format!("Write report to {}", out))?;
            println!("Report written to {}", out);
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Plain-text financial report for `period`.
pub fn render_report(ledger: &Ledger, period: Period, generated: NaiveDateTime) -> String {
    let balance = aggregate::current_balance(&ledger.transactions);
    let invested = aggregate::total_investment_value(&ledger.investments);
    let income = aggregate::monthly_income(&ledger.transactions, period);
    let expenses = aggregate::monthly_expenses(&ledger.transactions, period);

    let mut out = String::new();
    let _ = writeln!(out, "FINANCIAL REPORT - {}", generated.format("%Y-%m-%d"));
    let _ = writeln!(out, "================================================");
    let _ = writeln!(out);
    let _ = writeln!(out, "CURRENT FINANCIAL STATUS:");
    let _ = writeln!(out, "- Current Balance: {}", fmt_currency(balance));
    let _ = writeln!(out, "- Total Investments: {}", fmt_currency(invested));
    let _ = writeln!(out, "- Net Worth: {}", fmt_currency(balance.saturating_add(invested)));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "MONTHLY SUMMARY ({} {}):",
        period.month_name(),
        period.year()
    );
    let _ = writeln!(out, "- Total Income: {}", fmt_currency(income));
    let _ = writeln!(out, "- Total Expenses: {}", fmt_currency(expenses));
    let _ = writeln!(out, "- Net Savings: {}", fmt_currency(income.saturating_sub(expenses)));
    let _ = writeln!(
        out,
        "- Savings Rate: {}",
        fmt_percent(Some(savings_rate(income, expenses)))
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "INVESTMENT PORTFOLIO:");
    for inv in &ledger.investments {
        let _ = writeln!(
            out,
            "- {}: {} ({} return)",
            inv.name,
            fmt_currency(inv.current_value),
            fmt_percent(aggregate::return_percent(inv))
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "BUDGET ANALYSIS:");
    for line in budget_status(&ledger.budgets, &ledger.transactions, period).lines {
        let _ = writeln!(
            out,
            "- {}: {}/{} ({})",
            capitalize(&line.category),
            fmt_currency(line.spent),
            fmt_currency(line.budgeted),
            fmt_percent(line.percent_used)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "INSIGHTS:");
    for line in insights::messages(&insights::for_ledger(ledger, period)) {
        let _ = writeln!(out, "- {}", line);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated on: {}", generated.format("%Y-%m-%d %H:%M:%S"));
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
