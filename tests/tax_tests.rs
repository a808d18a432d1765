// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{cli, commands::tax, db, models::Regime, store};
use rust_decimal::Decimal;

fn estimate_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["fintrack", "tax", "estimate"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tax", tax_m)) = matches.subcommand() else {
        panic!("no tax subcommand");
    };
    let Some(("estimate", est_m)) = tax_m.subcommand() else {
        panic!("no estimate subcommand");
    };
    est_m.clone()
}

#[test]
fn estimate_persists_one_record() {
    let conn = db::open_in_memory().unwrap();
    let (est, id) = tax::run_estimate(&conn, &estimate_matches(&["--income", "1000000"])).unwrap();

    assert_eq!(est.regime, Regime::New);
    assert_eq!(est.tax_payable, Decimal::from(60_000));
    assert_eq!(est.in_hand, Decimal::from(940_000));

    let records = store::list_tax_records(&conn).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(Some(records[0].id), id);
    assert_eq!(records[0].tax_paid, Decimal::from(60_000));
    assert_eq!(records[0].regime, Regime::New);
}

#[test]
fn old_regime_subtracts_deductions() {
    let conn = db::open_in_memory().unwrap();
    let (est, _) = tax::run_estimate(
        &conn,
        &estimate_matches(&["--income", "800000", "--regime", "old", "--deductions", "150000"]),
    )
    .unwrap();
    assert_eq!(est.taxable_income, Decimal::from(650_000));
    // 12,500 on the 5% slab plus 20% of 150,000
    assert_eq!(est.tax_payable, Decimal::from(42_500));
}

#[test]
fn no_save_skips_persistence() {
    let conn = db::open_in_memory().unwrap();
    let (_, id) = tax::run_estimate(
        &conn,
        &estimate_matches(&["--income", "500000", "--no-save"]),
    )
    .unwrap();
    assert_eq!(id, None);
    assert!(store::list_tax_records(&conn).unwrap().is_empty());
}

#[test]
fn unknown_regime_is_rejected() {
    let conn = db::open_in_memory().unwrap();
    assert!(tax::run_estimate(&conn, &estimate_matches(&["--income", "1", "--regime", "flat"])).is_err());
    assert!(store::list_tax_records(&conn).unwrap().is_empty());
}
