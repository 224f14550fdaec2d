// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{get_setting, set_setting, Settings, API_URL, KEYS, RECENT_LIMIT, REPORTING_OFFSET};
use crate::error::ConfigError;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => get(conn, sub.get_one::<String>("key").map(String::as_str))?,
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").map(String::as_str).unwrap_or_default();
            let value = sub.get_one::<String>("value").map(String::as_str).unwrap_or_default();
            set_setting(conn, key, value)?;
            match get_setting(conn, key)? {
                Some(v) => println!("{} = {}", key, v),
                None => println!("{} reset to default", key),
            }
        }
        _ => {}
    }
    Ok(())
}

/// Effective value of every setting, defaults included.
pub fn effective(settings: &Settings) -> Vec<Vec<String>> {
    vec![
        vec![REPORTING_OFFSET.to_string(), settings.reporting_offset.to_string()],
        vec![
            API_URL.to_string(),
            settings.api_url.clone().unwrap_or_else(|| "(local database)".into()),
        ],
        vec![RECENT_LIMIT.to_string(), settings.recent_limit.to_string()],
    ]
}

fn get(conn: &Connection, key: Option<&str>) -> Result<()> {
    let settings = Settings::load(conn)?;
    let rows = effective(&settings);
    match key {
        Some(k) => {
            if !KEYS.contains(&k) {
                return Err(ConfigError::UnknownKey(k.to_string()).into());
            }
            for row in rows.into_iter().filter(|r| r[0] == k) {
                println!("{}", row[1]);
            }
        }
        None => println!("{}", pretty_table(&["Setting", "Value"], rows)),
    }
    Ok(())
}
