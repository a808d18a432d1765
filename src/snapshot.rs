// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The JSON interchange document:
//! `{transactions, investments, budgets, currentBalance, exportDate}`.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate;
use crate::error::ValidationError;
use crate::ledger::Ledger;
use crate::models::{parse_month_name, Budget, Investment, Transaction};
use crate::store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub current_balance: Decimal,
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn capture(ledger: &Ledger, at: DateTime<Utc>) -> Self {
        Snapshot {
            transactions: ledger.transactions.clone(),
            investments: ledger.investments.clone(),
            budgets: ledger.budgets.clone(),
            current_balance: aggregate::current_balance(&ledger.transactions),
            export_date: Some(at),
        }
    }

    /// Parses, normalizes and validates the whole document; nothing is
    /// returned unless every record is acceptable.
    pub fn parse(json: &str) -> Result<Self> {
        let mut snap: Snapshot =
            serde_json::from_str(json).context("Malformed import document")?;
        snap.normalize()?;
        snap.validate()?;
        Ok(snap)
    }

    /// Trims text fields and spells budget months out in full, the same
    /// way records entered one at a time are stored.
    pub fn normalize(&mut self) -> Result<()> {
        for t in &mut self.transactions {
            trim_in_place(&mut t.description);
            trim_in_place(&mut t.category);
        }
        for i in &mut self.investments {
            trim_in_place(&mut i.name);
            trim_in_place(&mut i.r#type);
        }
        for b in &mut self.budgets {
            trim_in_place(&mut b.category);
            let month = parse_month_name(&b.month)
                .with_context(|| format!("Invalid budget {}", b.id))?;
            b.month = month.name().to_string();
        }
        Ok(())
    }

    /// Applies the rules used for new records, plus id and budget-category
    /// uniqueness.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for t in &self.transactions {
            if !ids.insert(t.id) {
                return Err(anyhow!("Duplicate transaction id {}", t.id));
            }
            check(t.id, "transaction", || t.to_new().validate())?;
        }

        ids.clear();
        for i in &self.investments {
            if !ids.insert(i.id) {
                return Err(anyhow!("Duplicate investment id {}", i.id));
            }
            check(i.id, "investment", || i.to_new().validate())?;
        }

        ids.clear();
        let mut categories = HashSet::new();
        for b in &self.budgets {
            if !ids.insert(b.id) {
                return Err(anyhow!("Duplicate budget id {}", b.id));
            }
            if !categories.insert(b.category.as_str()) {
                return Err(anyhow!("Duplicate budget category '{}'", b.category));
            }
            check(b.id, "budget", || b.to_new().validate())?;
        }
        Ok(())
    }

    /// Like [`Snapshot::into_ledger`], warning when the recorded
    /// `currentBalance` disagrees with the transactions it carries.
    pub fn into_imported_ledger(self) -> Ledger {
        let recomputed = aggregate::current_balance(&self.transactions);
        if self.current_balance != recomputed {
            log::warn!(
                "imported currentBalance {} differs from transactions ({}); using transactions",
                self.current_balance,
                recomputed
            );
        }
        self.into_ledger()
    }

    pub fn into_ledger(self) -> Ledger {
        Ledger {
            transactions: self.transactions,
            investments: self.investments,
            budgets: self.budgets,
        }
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

fn check<F>(id: i64, what: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<(), ValidationError>,
{
    f().with_context(|| format!("Invalid {} {}", what, id))
}

pub fn export_to_path(conn: &Connection, out: &Path) -> Result<Snapshot> {
    let ledger = Ledger::load(conn)?;
    let snap = Snapshot::capture(&ledger, Utc::now());
    std::fs::write(out, serde_json::to_string_pretty(&snap)?)
        .with_context(|| format!("Write {}", out.display()))?;
    Ok(snap)
}

/// Replaces the stored ledger with the document at `path`. A document that
/// fails to read, parse or validate leaves the store untouched.
pub fn import_from_path(conn: &mut Connection, path: &Path) -> Result<Ledger> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Read {}", path.display()))?;
    import_str(conn, &raw)
}

pub fn import_str(conn: &mut Connection, raw: &str) -> Result<Ledger> {
    let ledger = Snapshot::parse(raw)?.into_imported_ledger();
    apply(conn, &ledger)?;
    Ok(ledger)
}

/// Writes an already parsed and validated ledger over the stored one.
pub fn apply(conn: &mut Connection, ledger: &Ledger) -> Result<()> {
    store::replace_ledger(conn, ledger)?;
    log::info!(
        "imported {} transactions, {} investments, {} budgets",
        ledger.transactions.len(),
        ledger.investments.len(),
        ledger.budgets.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_default_to_empty() {
        let snap = Snapshot::parse("{}").unwrap();
        assert!(snap.transactions.is_empty());
        assert!(snap.investments.is_empty());
        assert!(snap.budgets.is_empty());
        assert_eq!(snap.current_balance, Decimal::ZERO);
        assert_eq!(snap.export_date, None);
    }

    #[test]
    fn bad_record_rejects_document() {
        let doc = r#"{"transactions":[
            {"id":1,"date":"2025-01-01","description":"Pay","amount":"10","category":"salary","type":"income"},
            {"id":2,"date":"2025-01-02","description":"Bad","amount":"-5","category":"food","type":"expense"}
        ]}"#;
        assert!(Snapshot::parse(doc).is_err());
    }

    #[test]
    fn unknown_type_rejects_document() {
        let doc = r#"{"transactions":[
            {"id":1,"date":"2025-01-01","description":"Pay","amount":"10","category":"salary","type":"transfer"}
        ]}"#;
        assert!(Snapshot::parse(doc).is_err());
    }

    #[test]
    fn budgets_are_normalized_like_new_ones() {
        let doc = r#"{"budgets":[
            {"id":1,"category":" food ","amount":"10","month":"oct","year":2025}
        ]}"#;
        let snap = Snapshot::parse(doc).unwrap();
        assert_eq!(snap.budgets[0].category, "food");
        assert_eq!(snap.budgets[0].month, "October");
    }

    #[test]
    fn budget_year_out_of_range_rejects_document() {
        let doc = r#"{"budgets":[
            {"id":1,"category":"food","amount":"10","month":"May","year":0}
        ]}"#;
        assert!(Snapshot::parse(doc).is_err());
    }

    #[test]
    fn categories_differing_only_by_padding_are_duplicates() {
        let doc = r#"{"budgets":[
            {"id":1,"category":"food","amount":"10","month":"May","year":2025},
            {"id":2,"category":"food ","amount":"20","month":"May","year":2025}
        ]}"#;
        assert!(Snapshot::parse(doc).is_err());
    }

    #[test]
    fn duplicate_budget_categories_are_rejected() {
        let doc = r#"{"budgets":[
            {"id":1,"category":"food","amount":"10","month":"May","year":2025},
            {"id":2,"category":"food","amount":"20","month":"June","year":2025}
        ]}"#;
        assert!(Snapshot::parse(doc).is_err());
    }
}
