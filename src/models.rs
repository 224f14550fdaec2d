// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Expense, TransactionType::Income];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Title-case label used in legends and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expenses",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" | "expenses" => Ok(TransactionType::Expense),
            other => Err(format!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

/// A single income or expense event as supplied by the transaction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    /// Raw date as transported; resolved against a reporting zone on demand.
    pub date: String,
    #[serde(default, alias = "description", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransactionRecord {
    /// The instant of this record seen from `zone`, or `None` when the date is malformed.
    pub fn timestamp(&self, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.date, zone)
    }

    /// Calendar day of this record in `zone`.
    pub fn local_date(&self, zone: FixedOffset) -> Option<NaiveDate> {
        self.timestamp(zone).map(|ts| ts.date_naive())
    }
}

/// A transaction built by the submission path, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Resolve a transported date string into `zone`.
///
/// Offset-carrying timestamps are converted; naive timestamps and bare calendar
/// dates are read as wall-clock time in `zone`.
pub fn parse_timestamp(raw: &str, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&zone));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return zone.from_local_datetime(&ndt).single();
        }
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    zone.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Offset, Utc};

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    #[test]
    fn rfc3339_is_shifted_into_reporting_zone() {
        let ts = parse_timestamp("2024-03-31T20:00:00.000Z", ist()).unwrap();
        assert_eq!(ts.month(), 4);
        assert_eq!(ts.day(), 1);

        let utc = parse_timestamp("2024-03-31T20:00:00.000Z", Utc.fix()).unwrap();
        assert_eq!(utc.day(), 31);
    }

    #[test]
    fn bare_dates_stay_on_their_calendar_day() {
        let d = parse_timestamp("2024-03-05", ist()).unwrap();
        assert_eq!(d.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let d = parse_timestamp(" 2024-02-29 ", Utc.fix()).unwrap();
        assert_eq!(d.day(), 29);
    }

    #[test]
    fn malformed_dates_do_not_resolve() {
        for raw in ["", "yesterday", "2023-02-29", "05/03/2024"] {
            assert!(parse_timestamp(raw, Utc.fix()).is_none(), "{raw}");
        }
    }

    #[test]
    fn records_accept_service_aliases() {
        let json = r#"{"_id":"abc","amount":120.5,"type":"expense","category":"Food","date":"2024-03-05T09:30:00Z","description":"lunch"}"#;
        let rec: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, "abc");
        assert_eq!(rec.kind, TransactionType::Expense);
        assert_eq!(rec.amount, Decimal::new(1205, 1));
        assert_eq!(rec.notes.as_deref(), Some("lunch"));
    }

    #[test]
    fn transaction_type_parses_case_insensitively() {
        assert_eq!("Income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!(" expense ".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
