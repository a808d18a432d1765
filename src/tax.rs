// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income-tax estimation over progressive slab tables.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{require_non_negative, ValidationError};
use crate::models::{NewTaxRecord, Regime};

/// One bracket: income up to `upper` (the previous bracket's bound is the
/// lower edge) is taxed at `rate_pct` percent. `upper == None` is the
/// open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slab {
    pub upper: Option<u64>,
    pub rate_pct: u32,
}

impl Slab {
    const fn upto(upper: u64, rate_pct: u32) -> Self {
        Slab {
            upper: Some(upper),
            rate_pct,
        }
    }

    const fn above(rate_pct: u32) -> Self {
        Slab {
            upper: None,
            rate_pct,
        }
    }

    fn rate(&self) -> Decimal {
        Decimal::new(i64::from(self.rate_pct), 2)
    }
}

pub const OLD_REGIME_SLABS: &[Slab] = &[
    Slab::upto(250_000, 0),
    Slab::upto(500_000, 5),
    Slab::upto(1_000_000, 20),
    Slab::above(30),
];

pub const NEW_REGIME_SLABS: &[Slab] = &[
    Slab::upto(300_000, 0),
    Slab::upto(600_000, 5),
    Slab::upto(900_000, 10),
    Slab::upto(1_200_000, 15),
    Slab::upto(1_500_000, 20),
    Slab::above(30),
];

pub fn slabs_for(regime: Regime) -> &'static [Slab] {
    match regime {
        Regime::Old => OLD_REGIME_SLABS,
        Regime::New => NEW_REGIME_SLABS,
    }
}

/// Walks the brackets in order, charging each one's rate on the part of
/// `taxable` that falls inside it.
pub fn tax_on(taxable: Decimal, slabs: &[Slab]) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for slab in slabs {
        if taxable <= lower {
            break;
        }
        let upper = slab.upper.map(Decimal::from);
        let top = match upper {
            Some(u) if taxable > u => u,
            _ => taxable,
        };
        tax += (top - lower) * slab.rate();
        match upper {
            Some(u) => lower = u,
            None => break,
        }
    }
    tax
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxEstimate {
    pub gross_income: Decimal,
    pub regime: Regime,
    pub deductions: Decimal,
    pub taxable_income: Decimal,
    pub tax_payable: Decimal,
    pub in_hand: Decimal,
}

impl TaxEstimate {
    /// The audit record to persist for this estimate.
    pub fn to_record(&self, financial_year: impl Into<String>) -> NewTaxRecord {
        NewTaxRecord {
            financial_year: financial_year.into(),
            gross_income: self.gross_income,
            taxable_income: self.taxable_income,
            tax_paid: self.tax_payable,
            regime: self.regime,
            deductions: self.deductions,
        }
    }
}

/// Deductions only count under the old regime.
pub fn estimate_tax(
    gross_income: Decimal,
    regime: Regime,
    deductions: Decimal,
) -> Result<TaxEstimate, ValidationError> {
    require_non_negative("gross_income", gross_income)?;
    require_non_negative("deductions", deductions)?;

    let taxable_income = match regime {
        Regime::Old => (gross_income - deductions).max(Decimal::ZERO),
        Regime::New => gross_income,
    };
    let tax_payable = tax_on(taxable_income, slabs_for(regime));
    Ok(TaxEstimate {
        gross_income,
        regime,
        deductions,
        taxable_income,
        tax_payable,
        in_hand: gross_income - tax_payable,
    })
}

/// `"2025-2026"` for any date in 2025.
pub fn financial_year_for(date: NaiveDate) -> String {
    format!("{}-{}", date.year(), date.year() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tax(gross: i64, regime: Regime, deductions: i64) -> Decimal {
        estimate_tax(Decimal::from(gross), regime, Decimal::from(deductions))
            .unwrap()
            .tax_payable
    }

    #[test]
    fn slab_boundaries_match_published_figures() {
        assert_eq!(tax(300_000, Regime::New, 0), Decimal::ZERO);
        assert_eq!(tax(300_000, Regime::New, 250_000), Decimal::ZERO);
        assert_eq!(tax(1_500_000, Regime::New, 0), Decimal::from(150_000));
        assert_eq!(tax(250_000, Regime::Old, 0), Decimal::ZERO);
        assert_eq!(tax(1_000_000, Regime::Old, 0), Decimal::from(112_500));
        assert_eq!(tax(600_000, Regime::New, 0), Decimal::from(15_000));
        assert_eq!(tax(500_000, Regime::Old, 0), Decimal::from(12_500));
    }

    #[test]
    fn top_bracket_is_open_ended() {
        // 150000 + 500000 * 30%
        assert_eq!(tax(2_000_000, Regime::New, 0), Decimal::from(300_000));
        // 112500 + 1000000 * 30%
        assert_eq!(tax(2_000_000, Regime::Old, 0), Decimal::from(412_500));
    }

    #[test]
    fn old_regime_applies_deductions_and_floors_at_zero() {
        let e = estimate_tax(Decimal::from(1_150_000), Regime::Old, Decimal::from(150_000)).unwrap();
        assert_eq!(e.taxable_income, Decimal::from(1_000_000));
        assert_eq!(e.tax_payable, Decimal::from(112_500));
        assert_eq!(e.in_hand, Decimal::from(1_037_500));

        let e = estimate_tax(Decimal::from(100_000), Regime::Old, Decimal::from(400_000)).unwrap();
        assert_eq!(e.taxable_income, Decimal::ZERO);
    }

    #[test]
    fn new_regime_ignores_deductions() {
        let e = estimate_tax(Decimal::from(900_000), Regime::New, Decimal::from(200_000)).unwrap();
        assert_eq!(e.taxable_income, Decimal::from(900_000));
        assert_eq!(e.tax_payable, Decimal::from(45_000));
    }

    #[test]
    fn negative_income_is_rejected() {
        let err = estimate_tax(Decimal::from(-1), Regime::New, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { field: "gross_income", .. }));
    }

    #[test]
    fn record_carries_estimate_fields() {
        let e = estimate_tax(Decimal::from(800_000), Regime::Old, Decimal::from(50_000)).unwrap();
        let r = e.to_record(financial_year_for(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
        assert_eq!(r.financial_year, "2025-2026");
        assert_eq!(r.tax_paid, e.tax_payable);
        assert_eq!(r.deductions, Decimal::from(50_000));
        assert_eq!(r.regime, Regime::Old);
    }

    proptest! {
        #[test]
        fn tax_never_decreases_with_income(a in 0u64..5_000_000, b in 0u64..5_000_000, d in 0u64..500_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for regime in [Regime::Old, Regime::New] {
                let t_lo = estimate_tax(Decimal::from(lo), regime, Decimal::from(d)).unwrap().tax_payable;
                let t_hi = estimate_tax(Decimal::from(hi), regime, Decimal::from(d)).unwrap().tax_payable;
                prop_assert!(t_lo <= t_hi);
            }
        }

        #[test]
        fn tax_never_exceeds_income(g in 0u64..10_000_000) {
            for regime in [Regime::Old, Regime::New] {
                let e = estimate_tax(Decimal::from(g), regime, Decimal::ZERO).unwrap();
                prop_assert!(e.tax_payable <= e.gross_income);
                prop_assert!(e.in_hand >= Decimal::ZERO);
            }
        }
    }
}
