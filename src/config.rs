// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::aggregate::{Aggregator, DEFAULT_RECENT};
use crate::error::ConfigError;

pub const REPORTING_OFFSET: &str = "reporting_offset";
pub const API_URL: &str = "api_url";
pub const RECENT_LIMIT: &str = "recent_limit";

pub const KEYS: [&str; 3] = [REPORTING_OFFSET, API_URL, RECENT_LIMIT];

/// Settings persisted in the `settings` table, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Zone whose calendar days, months and years reports are bucketed by.
    pub reporting_offset: FixedOffset,
    /// Base URL of a remote transaction API; local storage when unset.
    pub api_url: Option<String>,
    pub recent_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reporting_offset: Utc.fix(),
            api_url: None,
            recent_limit: DEFAULT_RECENT,
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut s = Settings::default();
        if let Some(v) = get_setting(conn, REPORTING_OFFSET)? {
            s.reporting_offset = parse_offset(&v)
                .map_err(|reason| invalid(REPORTING_OFFSET, &v, reason))
                .context("Stored settings are invalid")?;
        }
        s.api_url = get_setting(conn, API_URL)?.filter(|v| !v.is_empty());
        if let Some(v) = get_setting(conn, RECENT_LIMIT)? {
            s.recent_limit = parse_limit(&v)
                .map_err(|reason| invalid(RECENT_LIMIT, &v, reason))
                .context("Stored settings are invalid")?;
        }
        Ok(s)
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.reporting_offset)
    }
}

fn invalid(key: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

/// Validate and persist a setting. An empty value resets the key to its default.
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    let key = KEYS
        .iter()
        .copied()
        .find(|k| *k == key)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    if value.is_empty() {
        conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
        return Ok(());
    }
    let normalized = match key {
        REPORTING_OFFSET => parse_offset(value)
            .map_err(|reason| invalid(REPORTING_OFFSET, value, reason))?
            .to_string(),
        RECENT_LIMIT => parse_limit(value)
            .map_err(|reason| invalid(RECENT_LIMIT, value, reason))?
            .to_string(),
        API_URL => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(API_URL, value, "expected an http(s) URL".into()).into());
            }
            value.trim_end_matches('/').to_string()
        }
        _ => unreachable!("key validated above"),
    };
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, normalized],
    )?;
    tracing::info!(key, value = %normalized, "setting updated");
    Ok(())
}

/// Parse `Z`, `+05:30`, `-0800` or `+02`.
pub fn parse_offset(s: &str) -> std::result::Result<FixedOffset, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    let sign = match s.as_bytes().first() {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => return Err("expected a sign, e.g. +05:30".into()),
    };
    let digits: String = s[1..].chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) || !matches!(digits.len(), 2 | 4) {
        return Err("expected HH:MM".into());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| "bad hours".to_string())?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| "bad minutes".to_string())?
    } else {
        0
    };
    if hours > 14 || minutes > 59 {
        return Err("offset out of range".into());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| "offset out of range".to_string())
}

fn parse_limit(s: &str) -> std::result::Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("expected a positive integer".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_parse_in_common_spellings() {
        assert_eq!(parse_offset("Z").unwrap(), Utc.fix());
        assert_eq!(parse_offset("+05:30").unwrap().local_minus_utc(), 19800);
        assert_eq!(parse_offset("-0800").unwrap().local_minus_utc(), -28800);
        assert_eq!(parse_offset("+02").unwrap().local_minus_utc(), 7200);
        assert!(parse_offset("05:30").is_err());
        assert!(parse_offset("+5:30").is_err());
        assert!(parse_offset("+15:00").is_err());
    }

    #[test]
    fn offsets_round_trip_through_display() {
        let off = parse_offset("+05:30").unwrap();
        assert_eq!(parse_offset(&off.to_string()).unwrap(), off);
    }
}
