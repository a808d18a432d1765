// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rule-based advice over the month's figures. Every rule is checked; the
//! output keeps rule order, with overspend alerts last in budget order.

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;

use crate::aggregate;
use crate::ledger::Ledger;
use crate::models::Period;
use crate::utils::fmt_currency;

pub const MIN_SAVINGS_RATE_PCT: i64 = 20;
pub const EMERGENCY_FUND_MONTHS: i64 = 3;
pub const MIN_INVESTMENT_TYPES: usize = 3;

/// Shown when no rule fires.
pub const HEALTHY: &str = "🎉 Great job! Your finances look healthy.";

#[derive(Debug, Clone, PartialEq)]
pub struct Figures {
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub current_balance: Decimal,
    pub investment_count: usize,
    pub investment_types: usize,
    /// (category, budgeted, spent) in budget order.
    pub budgets: Vec<(String, Decimal, Decimal)>,
}

impl Figures {
    pub fn from_ledger(ledger: &Ledger, period: Period) -> Self {
        let types: HashSet<&str> = ledger
            .investments
            .iter()
            .map(|i| i.r#type.as_str())
            .collect();
        Figures {
            monthly_income: aggregate::monthly_income(&ledger.transactions, period),
            monthly_expenses: aggregate::monthly_expenses(&ledger.transactions, period),
            current_balance: aggregate::current_balance(&ledger.transactions),
            investment_count: ledger.investments.len(),
            investment_types: types.len(),
            budgets: ledger
                .budgets
                .iter()
                .map(|b| {
                    let spent = aggregate::budget_spend(&ledger.transactions, &b.category, period);
                    (b.category.clone(), b.amount, spent)
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Insight {
    LowSavingsRate { rate: Decimal },
    ThinEmergencyFund { balance: Decimal, target: Decimal },
    LowDiversification { types: usize },
    Overspent { category: String, overage: Decimal },
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::LowSavingsRate { .. } => write!(
                f,
                "💡 Consider increasing your savings rate. Financial experts recommend saving at least {}% of your income.",
                MIN_SAVINGS_RATE_PCT
            ),
            Insight::ThinEmergencyFund { .. } => f.write_str(
                "🚨 Build an emergency fund covering 3-6 months of expenses before investing heavily.",
            ),
            Insight::LowDiversification { .. } => f.write_str(
                "📈 Consider diversifying your investment portfolio across different asset classes.",
            ),
            Insight::Overspent { category, overage } => write!(
                f,
                "⚠️ You've exceeded your {} budget by {}",
                category,
                fmt_currency(*overage)
            ),
        }
    }
}

/// Percent of income kept; 0 when there was no income.
pub fn savings_rate(income: Decimal, expenses: Decimal) -> Decimal {
    aggregate::percent_of(income.saturating_sub(expenses), income).unwrap_or(Decimal::ZERO)
}

pub fn evaluate(f: &Figures) -> Vec<Insight> {
    let mut out = Vec::new();

    let rate = savings_rate(f.monthly_income, f.monthly_expenses);
    if rate < Decimal::from(MIN_SAVINGS_RATE_PCT) {
        out.push(Insight::LowSavingsRate { rate });
    }

    let target = f
        .monthly_expenses
        .saturating_mul(Decimal::from(EMERGENCY_FUND_MONTHS));
    if f.current_balance < target {
        out.push(Insight::ThinEmergencyFund {
            balance: f.current_balance,
            target,
        });
    }

    if f.investment_count > 0 && f.investment_types < MIN_INVESTMENT_TYPES {
        out.push(Insight::LowDiversification {
            types: f.investment_types,
        });
    }

    for (category, budgeted, spent) in &f.budgets {
        if spent > budgeted {
            out.push(Insight::Overspent {
                category: category.clone(),
                overage: spent.saturating_sub(*budgeted),
            });
        }
    }
    out
}

pub fn for_ledger(ledger: &Ledger, period: Period) -> Vec<Insight> {
    evaluate(&Figures::from_ledger(ledger, period))
}

/// The advisory lines to display, falling back to [`HEALTHY`].
pub fn messages(insights: &[Insight]) -> Vec<String> {
    if insights.is_empty() {
        vec![HEALTHY.to_string()]
    } else {
        insights.iter().map(ToString::to_string).collect()
    }
}
