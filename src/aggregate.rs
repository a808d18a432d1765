// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures for the dashboard. Everything here is a pure function of
//! the records passed in.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::Ledger;
use crate::models::{Budget, Investment, Period, Transaction, TxnType};

fn sum_where<F>(transactions: &[Transaction], keep: F) -> Decimal
where
    F: Fn(&Transaction) -> bool,
{
    transactions
        .iter()
        .filter(|t| keep(t))
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

/// Income minus expenses over all time. Totals saturate at the `Decimal`
/// range instead of overflowing.
pub fn current_balance(transactions: &[Transaction]) -> Decimal {
    let income = sum_where(transactions, |t| t.r#type == TxnType::Income);
    let expense = sum_where(transactions, |t| t.r#type == TxnType::Expense);
    income.saturating_sub(expense)
}

pub fn monthly_expenses(transactions: &[Transaction], period: Period) -> Decimal {
    sum_where(transactions, |t| {
        t.r#type == TxnType::Expense && period.contains(t.date)
    })
}

pub fn monthly_income(transactions: &[Transaction], period: Period) -> Decimal {
    sum_where(transactions, |t| {
        t.r#type == TxnType::Income && period.contains(t.date)
    })
}

pub fn total_investment_value(investments: &[Investment]) -> Decimal {
    investments
        .iter()
        .fold(Decimal::ZERO, |acc, i| acc.saturating_add(i.current_value))
}

pub fn investment_gain(inv: &Investment) -> Decimal {
    inv.current_value.saturating_sub(inv.amount_invested)
}

/// `None` when nothing was invested or the ratio is out of range; render it
/// as "N/A".
pub fn return_percent(inv: &Investment) -> Option<Decimal> {
    percent_of(inv.current_value.checked_sub(inv.amount_invested)?, inv.amount_invested)
}

/// `part / whole * 100`, or `None` for a zero `whole` or an overflow.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

pub fn budget_spend(transactions: &[Transaction], category: &str, period: Period) -> Decimal {
    sum_where(transactions, |t| {
        t.r#type == TxnType::Expense && t.category == category && period.contains(t.date)
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub current_balance: Decimal,
    pub monthly_expenses: Decimal,
    pub total_investments: Decimal,
}

pub fn dashboard_summary(ledger: &Ledger, period: Period) -> DashboardSummary {
    DashboardSummary {
        current_balance: current_balance(&ledger.transactions),
        monthly_expenses: monthly_expenses(&ledger.transactions, period),
        total_investments: total_investment_value(&ledger.investments),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub period: String,
    pub label: &'static str,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Longest window [`monthly_series`] will produce.
pub const MAX_SERIES_MONTHS: usize = 120;

/// Income and expense totals for the `months` calendar months ending at
/// `end`, oldest first. `months` is capped at [`MAX_SERIES_MONTHS`].
pub fn monthly_series(transactions: &[Transaction], end: Period, months: usize) -> Vec<MonthlyTotals> {
    let months = months.min(MAX_SERIES_MONTHS);
    let mut periods = Vec::with_capacity(months);
    let mut p = end;
    for _ in 0..months {
        periods.push(p);
        p = p.previous();
    }
    periods
        .into_iter()
        .rev()
        .map(|p| MonthlyTotals {
            period: p.to_string(),
            label: p.short_label(),
            income: monthly_income(transactions, p),
            expenses: monthly_expenses(transactions, p),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// Share of the budget already spent; `None` for a zero budget.
    pub percent_used: Option<Decimal>,
}

impl BudgetLine {
    pub fn overage(&self) -> Option<Decimal> {
        (self.spent > self.budgeted).then(|| self.spent.saturating_sub(self.budgeted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub period: String,
    pub lines: Vec<BudgetLine>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
}

/// Budget against spend in `period`, one line per budget in the order given.
pub fn budget_status(budgets: &[Budget], transactions: &[Transaction], period: Period) -> BudgetOverview {
    let lines: Vec<BudgetLine> = budgets
        .iter()
        .map(|b| {
            let spent = budget_spend(transactions, &b.category, period);
            BudgetLine {
                category: b.category.clone(),
                budgeted: b.amount,
                spent,
                remaining: b.amount.saturating_sub(spent),
                percent_used: percent_of(spent, b.amount),
            }
        })
        .collect();
    let total_budget = lines
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.budgeted));
    let total_spent = lines
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.spent));
    BudgetOverview {
        period: period.to_string(),
        lines,
        total_budget,
        total_spent,
        remaining: total_budget.saturating_sub(total_spent),
    }
}
