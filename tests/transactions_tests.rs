// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{aggregate, cli, commands::transactions, db, models::Period, store};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = db::open_in_memory().unwrap();
    for (date, amount, category, kind) in [
        ("2025-01-01", "1000", "salary", "income"),
        ("2025-01-02", "150", "food", "expense"),
        ("2025-01-03", "250", "rent", "expense"),
        ("2025-02-01", "40", "food", "expense"),
    ] {
        conn.execute(
            "INSERT INTO transactions(date,description,amount,category,type) VALUES (?1,'x',?2,?3,?4)",
            params![date, amount, category, kind],
        )
        .unwrap();
    }
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["fintrack", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-02-01");
    assert_eq!(rows[1].date.to_string(), "2025-01-03");
}

#[test]
fn list_filters_by_month_and_type() {
    let conn = setup();
    let rows = transactions::query_rows(
        &conn,
        &list_matches(&["--month", "2025-01", "--type", "expense"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|t| t.date.to_string().starts_with("2025-01")));

    let food = transactions::query_rows(&conn, &list_matches(&["--category", "food"])).unwrap();
    assert_eq!(food.len(), 2);
}

#[test]
fn unknown_type_filter_is_rejected() {
    let conn = setup();
    assert!(transactions::query_rows(&conn, &list_matches(&["--type", "transfer"])).is_err());
}

#[test]
fn balance_and_monthly_expenses() {
    let conn = setup();
    let rows = store::list_transactions(&conn).unwrap();
    assert_eq!(aggregate::current_balance(&rows), Decimal::from(560));
    let jan = Period::new(2025, 1).unwrap();
    assert_eq!(aggregate::monthly_expenses(&rows, jan), Decimal::from(400));
    assert_eq!(aggregate::monthly_income(&rows, jan), Decimal::from(1000));
}

#[test]
fn add_parses_arguments_and_persists() {
    let conn = db::open_in_memory().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "tx",
        "add",
        "--amount",
        " 1200.50 ",
        "--description",
        "Salary",
        "--category",
        "salary",
        "--type",
        "income",
        "--date",
        "2025-03-01",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, tx_m).unwrap();

    let rows = store::list_transactions(&conn).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, "1200.50".parse::<Decimal>().unwrap());
    assert_eq!(aggregate::current_balance(&rows), rows[0].amount);
}

#[test]
fn add_rejects_negative_amount() {
    let conn = db::open_in_memory().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "tx",
        "add",
        "--amount=-5",
        "--description",
        "Oops",
        "--category",
        "food",
        "--type",
        "expense",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    assert!(transactions::handle(&conn, tx_m).is_err());
    assert!(store::list_transactions(&conn).unwrap().is_empty());
}
