// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use expense_tracker::config::{get_setting, set_setting, Settings, API_URL, RECENT_LIMIT, REPORTING_OFFSET};
use expense_tracker::{cli, commands, db};
use tempfile::NamedTempFile;

#[test]
fn defaults_apply_without_stored_settings() {
    let conn = db::open_in_memory().unwrap();
    let s = Settings::load(&conn).unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.reporting_offset.local_minus_utc(), 0);
    assert_eq!(s.recent_limit, 5);
    assert!(s.api_url.is_none());
}

#[test]
fn set_normalizes_and_load_reads_back() {
    let conn = db::open_in_memory().unwrap();
    set_setting(&conn, REPORTING_OFFSET, "+0530").unwrap();
    set_setting(&conn, API_URL, "https://api.example.com/v1/").unwrap();
    set_setting(&conn, RECENT_LIMIT, " 10 ").unwrap();

    assert_eq!(get_setting(&conn, REPORTING_OFFSET).unwrap().as_deref(), Some("+05:30"));
    let s = Settings::load(&conn).unwrap();
    assert_eq!(s.reporting_offset.local_minus_utc(), 19800);
    assert_eq!(s.api_url.as_deref(), Some("https://api.example.com/v1"));
    assert_eq!(s.recent_limit, 10);
}

#[test]
fn empty_value_resets_to_default() {
    let conn = db::open_in_memory().unwrap();
    set_setting(&conn, RECENT_LIMIT, "3").unwrap();
    set_setting(&conn, RECENT_LIMIT, "").unwrap();
    assert_eq!(get_setting(&conn, RECENT_LIMIT).unwrap(), None);
    assert_eq!(Settings::load(&conn).unwrap().recent_limit, 5);
}

#[test]
fn invalid_values_are_rejected() {
    let conn = db::open_in_memory().unwrap();
    let err = set_setting(&conn, RECENT_LIMIT, "0").unwrap_err();
    assert!(err.to_string().contains("recent_limit"));
    assert!(set_setting(&conn, REPORTING_OFFSET, "India").is_err());
    assert!(set_setting(&conn, API_URL, "ftp://nope").is_err());
    let err = set_setting(&conn, "currency", "INR").unwrap_err();
    assert!(err.to_string().contains("unknown setting 'currency'"));
}

#[test]
fn config_set_accepts_negative_offsets_from_cli() {
    let conn = db::open_in_memory().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "expense-tracker",
        "config",
        "set",
        "reporting_offset",
        "-08:00",
    ]);
    if let Some(("config", m)) = matches.subcommand() {
        commands::config::handle(&conn, m).unwrap();
    } else {
        panic!("no config subcommand");
    }
    let s = Settings::load(&conn).unwrap();
    assert_eq!(s.reporting_offset.local_minus_utc(), -28800);
}

#[test]
fn settings_persist_in_database_file() {
    let file = NamedTempFile::new().unwrap();
    {
        let conn = db::open_at(file.path()).unwrap();
        set_setting(&conn, RECENT_LIMIT, "7").unwrap();
    }
    let conn = db::open_at(file.path()).unwrap();
    assert_eq!(Settings::load(&conn).unwrap().recent_limit, 7);
}
