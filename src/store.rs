// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record collections over SQLite: four append-only tables, with budgets
//! overwritten per category.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::models::{
    parse_month_name, Budget, Investment, NewBudget, NewInvestment, NewTaxRecord,
    NewTransaction, Regime, TaxRecord, Transaction, TxnType,
};

fn stored_decimal(raw: &str, what: &str, id: i64) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid stored {} '{}' (row {})", what, raw, id))
}

fn stored_date(raw: &str, what: &str, id: i64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid stored {} '{}' (row {})", what, raw, id))
}

pub fn list_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, amount, category, type
         FROM transactions ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, date, description, amount, category, kind) = row?;
        data.push(Transaction {
            id,
            date: stored_date(&date, "transaction date", id)?,
            description,
            amount: stored_decimal(&amount, "transaction amount", id)?,
            category,
            r#type: kind
                .parse::<TxnType>()
                .with_context(|| format!("Invalid stored transaction type (row {})", id))?,
        });
    }
    Ok(data)
}

pub fn add_transaction(conn: &Connection, t: &NewTransaction) -> Result<i64> {
    t.validate()?;
    conn.execute(
        "INSERT INTO transactions(date, description, amount, category, type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            t.date.to_string(),
            t.description.trim(),
            t.amount.to_string(),
            t.category.trim(),
            t.r#type.as_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_investments(conn: &Connection) -> Result<Vec<Investment>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, amount_invested, current_value, date_invested
         FROM investments ORDER BY date_invested DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, name, kind, invested, current, date) = row?;
        data.push(Investment {
            id,
            name,
            r#type: kind,
            amount_invested: stored_decimal(&invested, "amount invested", id)?,
            current_value: stored_decimal(&current, "current value", id)?,
            date_invested: stored_date(&date, "investment date", id)?,
        });
    }
    Ok(data)
}

pub fn add_investment(conn: &Connection, i: &NewInvestment) -> Result<i64> {
    i.validate()?;
    conn.execute(
        "INSERT INTO investments(name, type, amount_invested, current_value, date_invested)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            i.name.trim(),
            i.r#type.trim(),
            i.amount_invested.to_string(),
            i.current_value_or_invested().to_string(),
            i.date_invested.to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn query_budgets(conn: &Connection, sql: &str, p: &[&dyn rusqlite::ToSql]) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(p, |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, i32>(4)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, category, amount, month, year) = row?;
        data.push(Budget {
            id,
            category,
            amount: stored_decimal(&amount, "budget amount", id)?,
            month,
            year,
        });
    }
    Ok(data)
}

/// Budgets last set for the given month (name or abbreviation) and year.
pub fn list_budgets(conn: &Connection, month: &str, year: i32) -> Result<Vec<Budget>> {
    let month = parse_month_name(month)?;
    query_budgets(
        conn,
        "SELECT id, category, amount, month, year FROM budgets
         WHERE month=?1 AND year=?2 ORDER BY id",
        &[&month.name(), &year],
    )
}

pub fn list_all_budgets(conn: &Connection) -> Result<Vec<Budget>> {
    query_budgets(
        conn,
        "SELECT id, category, amount, month, year FROM budgets ORDER BY id",
        &[],
    )
}

/// Inserts the budget, or overwrites amount, month and year of the existing
/// budget for the same category. Returns the row id, which is stable across
/// overwrites.
pub fn upsert_budget(conn: &Connection, b: &NewBudget) -> Result<i64> {
    b.validate()?;
    let month = parse_month_name(&b.month)?;
    let category = b.category.trim();
    conn.execute(
        "INSERT INTO budgets(category, amount, month, year) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(category) DO UPDATE SET
            amount=excluded.amount, month=excluded.month, year=excluded.year",
        params![category, b.amount.to_string(), month.name(), b.year],
    )?;
    let id: i64 = conn.query_row(
        "SELECT id FROM budgets WHERE category=?1",
        params![category],
        |r| r.get(0),
    )?;
    Ok(id)
}

pub fn list_tax_records(conn: &Connection) -> Result<Vec<TaxRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, financial_year, gross_income, taxable_income, tax_paid, regime, deductions
         FROM tax_records ORDER BY financial_year DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, fy, gross, taxable, paid, regime, deductions) = row?;
        data.push(TaxRecord {
            id,
            financial_year: fy,
            gross_income: stored_decimal(&gross, "gross income", id)?,
            taxable_income: stored_decimal(&taxable, "taxable income", id)?,
            tax_paid: stored_decimal(&paid, "tax paid", id)?,
            regime: regime
                .parse::<Regime>()
                .with_context(|| format!("Invalid stored regime (row {})", id))?,
            deductions: stored_decimal(&deductions, "deductions", id)?,
        });
    }
    Ok(data)
}

pub fn add_tax_record(conn: &Connection, r: &NewTaxRecord) -> Result<i64> {
    r.validate()?;
    conn.execute(
        "INSERT INTO tax_records(financial_year, gross_income, taxable_income, tax_paid, regime, deductions)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            r.financial_year.trim(),
            r.gross_income.to_string(),
            r.taxable_income.to_string(),
            r.tax_paid.to_string(),
            r.regime.as_str(),
            r.deductions.to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Swaps the stored transactions, investments and budgets for the ledger's,
/// keeping their ids. Tax records are not part of a ledger and stay as they
/// are. Runs in a single SQLite transaction: on any error nothing changes.
pub fn replace_ledger(conn: &mut Connection, ledger: &Ledger) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "DELETE FROM transactions; DELETE FROM investments; DELETE FROM budgets;",
    )?;
    {
        let mut ins = tx.prepare(
            "INSERT INTO transactions(id, date, description, amount, category, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for t in &ledger.transactions {
            ins.execute(params![
                t.id,
                t.date.to_string(),
                t.description.trim(),
                t.amount.to_string(),
                t.category.trim(),
                t.r#type.as_str()
            ])
            .with_context(|| format!("Import transaction {}", t.id))?;
        }

        let mut ins = tx.prepare(
            "INSERT INTO investments(id, name, type, amount_invested, current_value, date_invested)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for i in &ledger.investments {
            ins.execute(params![
                i.id,
                i.name.trim(),
                i.r#type.trim(),
                i.amount_invested.to_string(),
                i.current_value.to_string(),
                i.date_invested.to_string()
            ])
            .with_context(|| format!("Import investment {}", i.id))?;
        }

        let mut ins = tx.prepare(
            "INSERT INTO budgets(id, category, amount, month, year) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for b in &ledger.budgets {
            let month = parse_month_name(&b.month)
                .with_context(|| format!("Import budget '{}'", b.category))?;
            ins.execute(params![
                b.id,
                b.category.trim(),
                b.amount.to_string(),
                month.name(),
                b.year
            ])
                .with_context(|| format!("Import budget '{}'", b.category))?;
        }
    }
    tx.commit()?;
    Ok(())
}
