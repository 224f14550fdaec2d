// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use expense_tracker::{cli, commands::transactions, config::Settings, db, service::SqliteService};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(amount, type, category, date, notes) VALUES
            ('12.50', 'expense', 'Food', '2025-01-01', NULL),
            ('3000', 'income', 'Salary', '2025-01-03', 'January pay'),
            ('40', 'expense', 'Transport', '2025-01-02T08:15:00Z', NULL),
            ('7', 'expense', 'Food', '2024-12-31', NULL);
        "#,
    )
    .unwrap();
    conn
}

fn tx_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["expense-tracker", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => tx_m.clone(),
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn add_records_transaction() {
    let conn = setup();
    let settings = Settings::default();
    let svc = SqliteService::new(&conn, settings.reporting_offset);
    let m = tx_matches(&[
        "add", "--amount", "99.90", "--type", "expense", "--category", "Bills", "--date",
        "2025-01-15", "--notes", "power",
    ]);
    let Some(("add", add_m)) = m.subcommand() else {
        panic!("no add subcommand");
    };
    let rec = transactions::add_transaction(&svc, &settings, add_m).unwrap();
    assert_eq!(rec.id, "5");
    assert_eq!(rec.category, "Bills");
    assert_eq!(rec.date, "2025-01-15");

    let (amount, notes): (String, Option<String>) = conn
        .query_row(
            "SELECT amount, notes FROM transactions WHERE id=5",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(amount, "99.90");
    assert_eq!(notes.as_deref(), Some("power"));
}

#[test]
fn add_requires_category_text() {
    let conn = setup();
    let settings = Settings::default();
    let svc = SqliteService::new(&conn, settings.reporting_offset);
    let m = tx_matches(&["add", "--amount", "5", "--category", "  "]);
    let Some(("add", add_m)) = m.subcommand() else {
        panic!("no add subcommand");
    };
    let err = transactions::add_transaction(&svc, &settings, add_m).unwrap_err();
    assert!(format!("{:#}", err).contains("a category is required"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 4);
}

#[test]
fn list_filters_by_month_newest_first() {
    let conn = setup();
    let settings = Settings::default();
    let svc = SqliteService::new(&conn, settings.reporting_offset);
    let m = tx_matches(&["list", "--month", "January", "--year", "2025"]);
    let Some(("list", list_m)) = m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&svc, &settings, list_m).unwrap();
    let dates: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["2025-01-03", "2025-01-02", "2025-01-01"]);
    assert_eq!(rows[0].amount, "+3000.00");
    assert_eq!(rows[2].amount, "-12.50");
}

#[test]
fn list_month_without_year_matches_every_year() {
    let conn = setup();
    let settings = Settings::default();
    let svc = SqliteService::new(&conn, settings.reporting_offset);
    let m = tx_matches(&["list", "--month", "1"]);
    let Some(("list", list_m)) = m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&svc, &settings, list_m).unwrap();
    let dates: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["2025-01-03", "2025-01-02", "2025-01-01"]);
}

#[test]
fn add_strips_currency_formatting_from_amount() {
    let conn = setup();
    let settings = Settings::default();
    let svc = SqliteService::new(&conn, settings.reporting_offset);
    let m = tx_matches(&[
        "add", "--amount", "₹1,250.00", "--category", "Rent", "--date", "2025-01-20",
    ]);
    let Some(("add", add_m)) = m.subcommand() else {
        panic!("no add subcommand");
    };
    let rec = transactions::add_transaction(&svc, &settings, add_m).unwrap();
    assert_eq!(rec.amount.to_string(), "1250.00");

    let amount: String = conn
        .query_row("SELECT amount FROM transactions WHERE id=5", [], |r| r.get(0))
        .unwrap();
    assert_eq!(amount, "1250.00");
}

#[test]
fn recent_respects_limit() {
    let conn = setup();
    let settings = Settings::default();
    let svc = SqliteService::new(&conn, settings.reporting_offset);
    let m = tx_matches(&["recent", "--limit", "2"]);
    let Some(("recent", recent_m)) = m.subcommand() else {
        panic!("no recent subcommand");
    };
    let rows = transactions::recent_rows(&svc, &settings, recent_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "Salary");
    assert_eq!(rows[1].category, "Transport");
}

#[test]
fn recent_defaults_to_configured_limit() {
    let conn = setup();
    let settings = Settings {
        recent_limit: 3,
        ..Settings::default()
    };
    let svc = SqliteService::new(&conn, settings.reporting_offset);
    let m = tx_matches(&["recent"]);
    let Some(("recent", recent_m)) = m.subcommand() else {
        panic!("no recent subcommand");
    };
    let rows = transactions::recent_rows(&svc, &settings, recent_m).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].date, "2025-01-01");
}
