// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_text, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }
}

impl FromStr for TxnType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            other => Err(ValidationError::UnknownTransactionType(other.to_string())),
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Old => "old",
            Regime::New => "new",
        }
    }
}

impl FromStr for Regime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Ok(Regime::Old),
            "new" => Ok(Regime::New),
            other => Err(ValidationError::UnknownRegime(other.to_string())),
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal, // magnitude, sign comes from type
    pub category: String,
    pub r#type: TxnType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub r#type: TxnType,
}

impl Transaction {
    /// The insertable form, for running the same checks on stored rows.
    pub fn to_new(&self) -> NewTransaction {
        NewTransaction {
            date: self.date,
            description: self.description.clone(),
            amount: self.amount,
            category: self.category.clone(),
            r#type: self.r#type,
        }
    }
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("description", &self.description)?;
        require_text("category", &self.category)?;
        require_non_negative("amount", self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub name: String,
    pub r#type: String,
    pub amount_invested: Decimal,
    pub current_value: Decimal,
    pub date_invested: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvestment {
    pub name: String,
    pub r#type: String,
    pub amount_invested: Decimal,
    /// Falls back to `amount_invested` when not supplied.
    pub current_value: Option<Decimal>,
    pub date_invested: NaiveDate,
}

impl Investment {
    pub fn to_new(&self) -> NewInvestment {
        NewInvestment {
            name: self.name.clone(),
            r#type: self.r#type.clone(),
            amount_invested: self.amount_invested,
            current_value: Some(self.current_value),
            date_invested: self.date_invested,
        }
    }
}

impl NewInvestment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("type", &self.r#type)?;
        require_non_negative("amount_invested", self.amount_invested)?;
        if let Some(v) = self.current_value {
            require_non_negative("current_value", v)?;
        }
        Ok(())
    }

    pub fn current_value_or_invested(&self) -> Decimal {
        self.current_value.unwrap_or(self.amount_invested)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
    pub month: String, // English month name, e.g. "October"
    pub year: i32,
}

impl Budget {
    pub fn to_new(&self) -> NewBudget {
        NewBudget {
            category: self.category.clone(),
            amount: self.amount,
            month: self.month.clone(),
            year: self.year,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    pub month: String,
    pub year: i32,
}

impl NewBudget {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("category", &self.category)?;
        require_non_negative("amount", self.amount)?;
        parse_month_name(&self.month)?;
        if !(1..=9999).contains(&self.year) {
            return Err(ValidationError::InvalidYear(self.year));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRecord {
    pub id: i64,
    pub financial_year: String,
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    pub tax_paid: Decimal,
    pub regime: Regime,
    pub deductions: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaxRecord {
    pub financial_year: String,
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    pub tax_paid: Decimal,
    pub regime: Regime,
    pub deductions: Decimal,
}

impl NewTaxRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("financial_year", &self.financial_year)?;
        require_non_negative("gross_income", self.gross_income)?;
        require_non_negative("taxable_income", self.taxable_income)?;
        require_non_negative("tax_paid", self.tax_paid)?;
        require_non_negative("deductions", self.deductions)
    }
}

/// Accepts full English names and three-letter abbreviations in any case.
pub fn parse_month_name(s: &str) -> Result<Month, ValidationError> {
    s.trim()
        .parse::<Month>()
        .map_err(|_| ValidationError::InvalidMonth(s.to_string()))
}

/// A calendar month, the unit every monthly aggregate is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Period { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Period::of(chrono::Local::now().date_naive())
    }

    /// Parses `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map(Period::of)
            .map_err(|_| ValidationError::InvalidMonth(s.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Period {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Period {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }

    /// Three-letter label used on chart axes.
    pub fn short_label(&self) -> &'static str {
        let name = self.month_name();
        &name[..3.min(name.len())]
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
